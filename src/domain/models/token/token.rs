//! JWT claim sets issued by the authorization server.

use serde::{Deserialize, Deserializer, Serialize};

/// Access token payload.
///
/// Standard RFC 7519 claims plus `scope` and the shop-specific `userId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub iss: String,
    /// Username of the resource owner.
    pub sub: String,
    /// Client the token was issued to.
    #[serde(default)]
    pub aud: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
    pub jti: String,
    #[serde(default)]
    pub scope: Vec<String>,
    /// Numeric user id. Missing or non-integer values read as `None`.
    #[serde(
        rename = "userId",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_user_id"
    )]
    pub user_id: Option<i64>,
}

/// OpenID Connect ID token payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    pub iss: String,
    pub sub: String,
    pub aud: String,
    pub azp: String,
    pub iat: i64,
    pub exp: i64,
    pub auth_time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

fn lenient_user_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64())
}
