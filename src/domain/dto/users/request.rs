//! # User Request DTOs
//!
//! | Field | Rule |
//! |-------|------|
//! | `username` | 3-50 characters |
//! | `password` | 6-100 characters |
//! | `email` | RFC 5322 address |
//!
//! Updates accept the same fields, each optional. Uniqueness is checked by the
//! service, not here.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: String,

    #[validate(length(min = 6, max = 100, message = "Password must be between 6 and 100 characters"))]
    pub password: String,

    #[validate(email(message = "Email should be valid"))]
    pub email: String,
}

/// Partial update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be between 3 and 50 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 6, max = 100, message = "Password must be between 6 and 100 characters"))]
    pub password: Option<String>,

    #[validate(email(message = "Email should be valid"))]
    pub email: Option<String>,
}
