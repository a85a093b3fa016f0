//! Data access layer
//!
//! Every repository is an `async_trait` trait so services can hold
//! `Arc<dyn Repository>` and tests can swap in the in-memory versions from
//! `memory`. Production implementations live next to their trait.
//!
//! | Trait | Backing store |
//! |-------|---------------|
//! | [`users::UserRepository`] | MongoDB `users` |
//! | [`customers::CustomerRepository`] | MongoDB `customers` |
//! | [`products::ProductRepository`] | MongoDB `products` |
//! | [`orders::OrderRepository`] | MongoDB `orders` |
//! | [`oauth::AuthorizationRepository`] | Redis |

pub mod customers;
pub mod oauth;
pub mod orders;
pub mod products;
pub mod users;

#[cfg(test)]
pub mod memory;
