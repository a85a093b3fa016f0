//! User account management for the auth service.
//!
//! ```rust,ignore
//! use shop_services::services::users::UserService;
//!
//! let user_service = UserService::new(user_repo, PasswordConfig::bcrypt_cost());
//! let created = user_service.create_user(request).await?;
//! ```

pub mod user_service;

pub use user_service::UserService;
