//! User data access.
//!
//! [`UserRepository`](user_repo::UserRepository) is the seam the user service depends
//! on; [`MongoUserRepository`](user_repo::MongoUserRepository) backs it with the
//! `users` collection.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use shop_services::repositories::users::{MongoUserRepository, UserRepository};
//!
//! let user_repo: Arc<dyn UserRepository> = Arc::new(MongoUserRepository::new(database));
//! let user = user_repo.find_by_username("alice").await?;
//! ```

pub mod user_repo;

pub use user_repo::{MongoUserRepository, UserRepository};
