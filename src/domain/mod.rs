//! Domain layer
//!
//! - [`entities`] - documents stored by the repositories
//! - [`dto`] - HTTP request/response bodies
//! - [`models`] - token claims, caller identity, OAuth2 grant state

pub mod dto;
pub mod entities;
pub mod models;
