//! # Authorization Server Configuration
//!
//! Token lifetimes, signing key locations and the single registered OAuth2 client.
//!
//! ```bash
//! export AUTH_ISSUER="http://127.0.0.1:9000"
//! export JWT_PRIVATE_KEY_PATH="./secrets/jwt_private_key.pem"
//! export JWT_PUBLIC_KEY_PATH="./secrets/jwt_public_key.pem"
//! export JWT_ACCESS_TOKEN_TTL_SECONDS="3600"
//! export JWT_REFRESH_TOKEN_TTL_SECONDS="604800"
//!
//! export OAUTH2_CLIENT_ID="shop-client"
//! export OAUTH2_CLIENT_SECRET="shop-secret"
//! export APP_OAUTH2_REDIRECT_URI="http://127.0.0.1:8080/login/oauth2/code/shop-client"
//! ```
//!
//! Resource services only need `AUTH_ISSUER` and, when the JWKS is not served at
//! `{issuer}/oauth2/jwks`, `AUTH_JWK_SET_URI`.

use super::{env_parse, env_string};

pub struct JwtConfig;

impl JwtConfig {
    /// `iss` claim written into every token and expected by every verifier.
    pub fn issuer() -> String {
        env_string("AUTH_ISSUER", "http://127.0.0.1:9000")
            .trim_end_matches('/')
            .to_string()
    }

    /// Where resource services download the signing keys.
    pub fn jwk_set_uri() -> String {
        std::env::var("AUTH_JWK_SET_URI")
            .unwrap_or_else(|_| format!("{}/oauth2/jwks", Self::issuer()))
    }

    pub fn access_token_ttl_seconds() -> i64 {
        env_parse("JWT_ACCESS_TOKEN_TTL_SECONDS", 3600)
    }

    pub fn refresh_token_ttl_seconds() -> i64 {
        env_parse("JWT_REFRESH_TOKEN_TTL_SECONDS", 7 * 24 * 3600)
    }

    pub fn authorization_code_ttl_seconds() -> i64 {
        env_parse("OAUTH2_AUTHORIZATION_CODE_TTL_SECONDS", 300)
    }

    pub fn private_key_path() -> String {
        env_string("JWT_PRIVATE_KEY_PATH", "./secrets/jwt_private_key.pem")
    }

    pub fn public_key_path() -> String {
        env_string("JWT_PUBLIC_KEY_PATH", "./secrets/jwt_public_key.pem")
    }
}

pub struct OAuthClientConfig;

impl OAuthClientConfig {
    pub fn client_id() -> String {
        env_string("OAUTH2_CLIENT_ID", "shop-client")
    }

    pub fn client_secret() -> String {
        std::env::var("OAUTH2_CLIENT_SECRET").unwrap_or_else(|_| {
            log::warn!("OAUTH2_CLIENT_SECRET not set, using default (not secure for production!)");
            "shop-secret".to_string()
        })
    }

    pub fn redirect_uri() -> String {
        env_string(
            "APP_OAUTH2_REDIRECT_URI",
            "http://127.0.0.1:8080/login/oauth2/code/shop-client",
        )
    }

    /// Space separated `OAUTH2_CLIENT_SCOPES`.
    pub fn scopes() -> Vec<String> {
        env_string("OAUTH2_CLIENT_SCOPES", "openid profile read write")
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}
