pub mod request;
pub mod response;

pub use request::{CreateOrderRequest, StatusQuery};
pub use response::OrderResponse;
