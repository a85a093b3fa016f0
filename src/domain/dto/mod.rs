//! Request and response bodies.
//!
//! Requests derive [`validator::Validate`]; handlers call `validate()` before anything
//! reaches a service. Response types are what the REST API serializes, with camelCase
//! field names.

pub mod customers;
pub mod oauth;
pub mod orders;
pub mod products;
pub mod users;
pub mod validation;
