//! Persistent records, one module per collection.

pub mod customers;
pub mod orders;
pub mod products;
pub mod users;

pub use customers::Customer;
pub use orders::{Order, OrderStatus};
pub use products::Product;
pub use users::User;
