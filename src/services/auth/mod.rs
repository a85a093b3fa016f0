//! Token issuing and validation.
//!
//! - [`JwtRsaService`]: RSA key pair, RS256 signing, JWK set (auth service only)
//! - [`JwtVerifier`]: signature and claim checks for incoming bearer tokens (every service)
//! - [`OAuth2Service`]: authorization-code and refresh-token grants (auth service only)
//!
//! # Examples
//!
//! ```rust,ignore
//! use shop_services::services::auth::{JwtRsaService, JwtVerifier};
//!
//! // auth service
//! let jwt_service = Arc::new(JwtRsaService::from_config()?);
//! let verifier = Arc::new(jwt_service.verifier()?);
//!
//! // resource services
//! let verifier = Arc::new(JwtVerifier::fetch(&JwtConfig::jwk_set_uri(), JwtConfig::issuer()).await?);
//! ```

pub mod jwt_rsa_service;
pub mod jwt_verifier;
pub mod oauth2_service;

pub use jwt_rsa_service::JwtRsaService;
pub use jwt_verifier::{JwtVerifier, extract_bearer_token};
pub use oauth2_service::{AuthorizeError, ClientCredentials, OAuth2Service, ValidatedAuthorization};
