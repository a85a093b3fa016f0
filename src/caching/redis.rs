use redis::{AsyncCommands, Client, aio::ConnectionManager};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::DatabaseConfig;
use crate::core::errors::AppError;

/// JSON-over-Redis client.
///
/// Values are stored as serialized JSON strings. A [`ConnectionManager`] multiplexes
/// one connection and reconnects on its own, so the client is cheap to clone.
#[derive(Clone)]
pub struct RedisClient {
    connection: ConnectionManager,
}

impl RedisClient {
    /// Connects to `REDIS_URL` and checks availability with `PING`.
    pub async fn connect() -> Result<Self, AppError> {
        let redis_url = DatabaseConfig::redis_url();
        let client = Client::open(redis_url)?;
        let mut connection = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut connection).await?;

        log::info!("✅ Redis connected");

        Ok(Self { connection })
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;

        value.map(|json| Self::decode(&json)).transpose()
    }

    /// Reads and deletes `key` in one round trip (`GETDEL`).
    pub async fn take<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, AppError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get_del(key).await?;

        value.map(|json| Self::decode(&json)).transpose()
    }

    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: u64,
    ) -> Result<(), AppError> {
        let mut conn = self.connection.clone();
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::RedisError(format!("Serialization failed: {}", e)))?;
        conn.set_ex::<_, _, ()>(key, json, seconds).await?;
        Ok(())
    }

    fn decode<T: DeserializeOwned>(json: &str) -> Result<T, AppError> {
        serde_json::from_str(json)
            .map_err(|e| AppError::RedisError(format!("Deserialization failed: {}", e)))
    }
}
