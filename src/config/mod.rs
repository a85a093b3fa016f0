//! # Configuration
//!
//! Environment-variable backed settings for every service. Each concern gets a unit
//! struct with associated functions that read one variable and fall back to a default
//! suitable for local development, so nothing here has to be threaded through
//! constructors.
//!
//! - [`data_config`] - environment profile, server binding, rate limits, CORS, storage
//! - [`auth_config`] - token lifetimes, key files, the registered OAuth2 client
//! - [`service_config`] - downstream service URLs and the admin dashboard targets
//!
//! ## Variables
//!
//! ```bash
//! export HOST="0.0.0.0"
//! export PORT="9000"
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="shop_auth"
//! export REDIS_URL="redis://localhost:6379"
//! export AUTH_ISSUER="http://127.0.0.1:9000"
//! export APP_OAUTH2_REDIRECT_URI="http://127.0.0.1:8080/login/oauth2/code/shop-client"
//! export CUSTOMER_SERVICE_URL="http://127.0.0.1:8081"
//! export PRODUCT_SERVICE_URL="http://127.0.0.1:8082"
//! ```

pub mod auth_config;
pub mod data_config;
pub mod service_config;

pub use auth_config::*;
pub use data_config::*;
pub use service_config::*;

use std::env;
use std::str::FromStr;

/// Reads `key` and parses it, falling back to `default` when unset or malformed.
pub(crate) fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("{} has an invalid value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Reads `key` as a string, falling back to `default` when unset.
pub(crate) fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
