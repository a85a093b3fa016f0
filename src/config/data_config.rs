//! Runtime profile, HTTP binding and storage settings.

use std::env;

use super::{env_parse, env_string};

/// Deployment profile, read from `ENVIRONMENT`.
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Test,
    Staging,
    Production,
}

impl Environment {
    pub fn current() -> Self {
        env::var("ENVIRONMENT")
            .map(|value| Self::from_str(&value))
            .unwrap_or(Environment::Production)
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    /// bcrypt work factor. `BCRYPT_COST` wins when it is within 4..=15.
    pub fn bcrypt_cost() -> u32 {
        if let Ok(cost_str) = env::var("BCRYPT_COST") {
            if let Ok(cost) = cost_str.parse::<u32>() {
                if (4..=15).contains(&cost) {
                    return cost;
                }
            }
        }

        Self::bcrypt_cost_for_env(&Environment::current())
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}

pub struct ServerConfig;

impl ServerConfig {
    /// Port from `PORT`, or the service's own default.
    pub fn port_or(default: u16) -> u16 {
        env_parse("PORT", default)
    }

    pub fn host() -> String {
        env_string("HOST", "0.0.0.0")
    }

    pub fn workers() -> usize {
        env_parse("SERVER_WORKERS", 4)
    }
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    pub fn load() -> Self {
        Self {
            per_second: env_parse("RATE_LIMIT_PER_SECOND", 100),
            burst_size: env_parse("RATE_LIMIT_BURST_SIZE", 200),
        }
    }
}

pub struct CorsConfig;

impl CorsConfig {
    /// Comma separated `CORS_ALLOWED_ORIGINS`.
    pub fn allowed_origins() -> Vec<String> {
        split_list(&env_string(
            "CORS_ALLOWED_ORIGINS",
            "http://localhost:3000,http://127.0.0.1:3000,http://localhost:8080,http://127.0.0.1:8080",
        ))
    }
}

pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env_string("MONGODB_URI", "mongodb://localhost:27017")
    }

    /// `DATABASE_NAME`, or the per-service default.
    pub fn database_name_or(default: &str) -> String {
        env_string("DATABASE_NAME", default)
    }

    pub fn redis_url() -> String {
        env_string("REDIS_URL", "redis://localhost:6379")
    }
}

pub(crate) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
