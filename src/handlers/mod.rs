//! HTTP handlers, one module per resource.
//!
//! Handlers validate input, delegate to a service from `web::Data` and map the result
//! to a response; [`AppError`](crate::core::errors::AppError) renders every failure.
//! Route registration lives in [`crate::routes`].

pub mod admin;
pub mod customers;
pub mod health;
pub mod oauth;
pub mod orders;
pub mod products;
pub mod users;
