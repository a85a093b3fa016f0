pub mod authorization_repo;

pub use authorization_repo::{AuthorizationRepository, RedisAuthorizationRepository};
