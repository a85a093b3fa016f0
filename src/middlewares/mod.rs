//! Middleware
//!
//! Cross-cutting request processing shared by every service.
//!
//! ### AuthMiddleware
//! - Extracts the bearer token from `Authorization`
//! - Verifies it with the service's [`JwtVerifier`](crate::services::auth::JwtVerifier)
//! - Stores an [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser) in the
//!   request extensions
//! - Required and optional modes
//!
//! # Usage
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use shop_services::middlewares::AuthMiddleware;
//!
//! App::new().service(
//!     web::scope("/products")
//!         .wrap(AuthMiddleware::required(verifier.clone()))
//!         .service(get_products),
//! )
//! ```

mod auth_inner;
pub mod auth_middleware;

pub use auth_middleware::AuthMiddleware;
