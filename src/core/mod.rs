//! # Core Module
//!
//! Cross-cutting pieces every service shares.
//!
//! ## [`errors`] - unified error handling
//! - **AppError**: the single error type returned by repositories, services and handlers
//! - **HTTP integration**: `actix_web::ResponseError` turns every variant into a JSON response
//! - **OAuth2 errors**: RFC 6749 `error` / `error_description` bodies for the authorization server
//! - **Conversions**: MongoDB and Redis errors convert with `?`
//!
//! ## Error handling
//!
//! ```rust,ignore
//! use shop_services::core::errors::AppError;
//!
//! async fn get_product(id: i64) -> Result<ProductResponse, AppError> {
//!     product_repo
//!         .find_by_id(id)
//!         .await?
//!         .map(ProductResponse::from)
//!         .ok_or_else(|| AppError::NotFound(format!("Product {} not found", id)))
//! }
//! ```
//!
//! Handlers return `Result<HttpResponse, AppError>` and the error becomes the response.

pub mod errors;

pub use errors::*;
