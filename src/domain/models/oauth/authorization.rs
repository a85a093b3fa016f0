//! Server-side state behind opaque authorization codes and refresh tokens.

use serde::{Deserialize, Serialize};

/// What an authorization code stands for until it is exchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizationCodeGrant {
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub username: String,
    pub user_id: i64,
    #[serde(default)]
    pub code_challenge: Option<String>,
    #[serde(default)]
    pub nonce: Option<String>,
    /// Unix time the user logged in.
    pub auth_time: i64,
}

/// What a refresh token stands for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    pub client_id: String,
    pub scopes: Vec<String>,
    pub username: String,
    pub user_id: i64,
    pub auth_time: i64,
    /// Unix time after which the token is refused.
    pub expires_at: i64,
}

impl RefreshTokenRecord {
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
