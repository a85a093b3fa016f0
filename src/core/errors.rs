//! # Application Error Handling
//!
//! One error type shared by every service. Each variant carries a message and maps to a
//! fixed HTTP status through [`actix_web::ResponseError`], so handlers can return
//! `Result<HttpResponse, AppError>` and let `?` do the rest.
//!
//! ## HTTP mapping
//!
//! | AppError | HTTP Status | Typical cause |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | request body rejected, token has no `userId` |
//! | `NotFound` | 404 Not Found | id lookup missed |
//! | `ConflictError` | 409 Conflict | duplicate username, email or customer profile |
//! | `AuthenticationError` | 401 Unauthorized | missing/invalid bearer token, bad credentials |
//! | `AuthorizationError` | 403 Forbidden | caller does not own the resource |
//! | `OAuth2Error` | 400 / 401 | token endpoint protocol errors (RFC 6749 §5.2) |
//! | `DatabaseError` | 500 | MongoDB failure |
//! | `RedisError` | 500 | Redis failure |
//! | `ExternalServiceError` | 500 | downstream HTTP call failed |
//! | `InternalError` | 500 | anything else |
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::core::errors::AppError;
//!
//! let customer = repo.find_by_id(id).await?
//!     .ok_or_else(|| AppError::NotFound(format!("Customer {} not found", id)))?;
//! ```

use actix_web::http::StatusCode;
use thiserror::Error;

/// Error code MongoDB reports when a unique index rejects a write.
const DUPLICATE_KEY_CODE: i32 = 11000;

/// Application-wide error type.
///
/// Infrastructure failures (`DatabaseError`, `RedisError`, `ExternalServiceError`,
/// `InternalError`) surface as 500. Domain violations carry their own status.
#[derive(Error, Debug)]
pub enum AppError {
    /// MongoDB operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis operation failed.
    #[error("Redis error: {0}")]
    RedisError(String),

    /// Request shape or a required token claim is invalid.
    ///
    /// ```rust,ignore
    /// let user_id = user.user_id
    ///     .ok_or_else(|| AppError::ValidationError("User ID not found in token".to_string()))?;
    /// ```
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A uniqueness rule would be violated.
    ///
    /// ```rust,ignore
    /// if self.user_repo.exists_by_username(&request.username).await? {
    ///     return Err(AppError::ConflictError("Username already exists".to_string()));
    /// }
    /// ```
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// The caller could not be identified.
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The caller is known but not allowed to touch the resource.
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// Protocol error raised by the authorization server endpoints.
    ///
    /// `code` is one of the RFC 6749 error codes (`invalid_client`, `invalid_grant`, ...).
    #[error("OAuth2 error: {code}: {description}")]
    OAuth2Error { code: String, description: String },

    /// A call to another service failed or returned an unexpected status.
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// Unexpected failure.
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Builds an [`AppError::OAuth2Error`].
    pub fn oauth2(code: &str, description: impl Into<String>) -> Self {
        AppError::OAuth2Error {
            code: code.to_string(),
            description: description.into(),
        }
    }

    /// Returns `true` for errors the client caused (4xx).
    pub fn is_client_error(&self) -> bool {
        actix_web::ResponseError::status_code(self).is_client_error()
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::OAuth2Error { code, .. } if code == "invalid_client" => {
                StatusCode::UNAUTHORIZED
            }
            AppError::OAuth2Error { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Renders `{"error": "..."}`, or the RFC 6749 error body for OAuth2 errors.
    fn error_response(&self) -> actix_web::HttpResponse {
        if !self.is_client_error() {
            log::error!("Request failed: {}", self);
        }

        let mut builder = actix_web::HttpResponse::build(self.status_code());

        match self {
            AppError::OAuth2Error { code, description } => builder
                .insert_header(("Cache-Control", "no-store"))
                .json(serde_json::json!({
                    "error": code,
                    "error_description": description,
                })),
            _ => builder.json(serde_json::json!({
                "error": self.to_string()
            })),
        }
    }
}

impl From<mongodb::error::Error> for AppError {
    fn from(error: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind, WriteFailure};

        let duplicate = match error.kind.as_ref() {
            ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
                write_error.code == DUPLICATE_KEY_CODE
            }
            ErrorKind::Command(command_error) => command_error.code == DUPLICATE_KEY_CODE,
            _ => false,
        };

        if duplicate {
            AppError::ConflictError(format!("Duplicate key: {}", error))
        } else {
            AppError::DatabaseError(error.to_string())
        }
    }
}

impl From<redis::RedisError> for AppError {
    fn from(error: redis::RedisError) -> Self {
        AppError::RedisError(error.to_string())
    }
}

impl From<askama::Error> for AppError {
    fn from(error: askama::Error) -> Self {
        AppError::InternalError(format!("Template error: {}", error))
    }
}

/// Shorthand for `Result<T, AppError>`.
pub type AppResult<T> = Result<T, AppError>;

/// Converts foreign errors into [`AppError::InternalError`] with a context prefix.
///
/// ```rust,ignore
/// let pem = std::fs::read_to_string(&path).context("Failed to read private key")?;
/// ```
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
