//! Storage for authorization codes and refresh tokens.
//!
//! Tokens are opaque to clients; Redis keys are derived from a SHA-256 digest of the
//! token so a key listing never reveals a usable credential. Expiry is the key TTL.
//!
//! | Key | Value | TTL |
//! |-----|-------|-----|
//! | `oauth2:code:{sha256}` | [`AuthorizationCodeGrant`] | code lifetime |
//! | `oauth2:refresh:{sha256}` | [`RefreshTokenRecord`] | refresh lifetime |

use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::{
    caching::redis::RedisClient,
    core::errors::AppError,
    domain::models::oauth::{AuthorizationCodeGrant, RefreshTokenRecord},
};

#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    async fn save_code(
        &self,
        code: &str,
        grant: &AuthorizationCodeGrant,
        ttl_seconds: u64,
    ) -> Result<(), AppError>;

    /// Returns the grant and removes it, so a code can be exchanged once.
    async fn take_code(&self, code: &str) -> Result<Option<AuthorizationCodeGrant>, AppError>;

    async fn save_refresh_token(
        &self,
        token: &str,
        record: &RefreshTokenRecord,
        ttl_seconds: u64,
    ) -> Result<(), AppError>;

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AppError>;
}

/// Redis key for an opaque token.
pub fn token_key(prefix: &str, token: &str) -> String {
    format!("oauth2:{}:{:x}", prefix, Sha256::digest(token.as_bytes()))
}

pub struct RedisAuthorizationRepository {
    redis: Arc<RedisClient>,
}

impl RedisAuthorizationRepository {
    pub fn new(redis: Arc<RedisClient>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl AuthorizationRepository for RedisAuthorizationRepository {
    async fn save_code(
        &self,
        code: &str,
        grant: &AuthorizationCodeGrant,
        ttl_seconds: u64,
    ) -> Result<(), AppError> {
        self.redis
            .set_with_expiry(&token_key("code", code), grant, ttl_seconds)
            .await
    }

    async fn take_code(&self, code: &str) -> Result<Option<AuthorizationCodeGrant>, AppError> {
        self.redis.take(&token_key("code", code)).await
    }

    async fn save_refresh_token(
        &self,
        token: &str,
        record: &RefreshTokenRecord,
        ttl_seconds: u64,
    ) -> Result<(), AppError> {
        self.redis
            .set_with_expiry(&token_key("refresh", token), record, ttl_seconds)
            .await
    }

    async fn find_refresh_token(&self, token: &str) -> Result<Option<RefreshTokenRecord>, AppError> {
        self.redis.get(&token_key("refresh", token)).await
    }
}
