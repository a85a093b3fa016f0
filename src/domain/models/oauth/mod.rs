pub mod authorization;
pub mod registered_client;

pub use authorization::{AuthorizationCodeGrant, RefreshTokenRecord};
pub use registered_client::{ClientAuthMethod, GrantType, RegisteredClient};
