//! Health aggregation for the admin dashboard.
//!
//! Every monitored service is checked at `GET {url}/health`, all at once, each with its
//! own timeout. A slow or dead service never delays the others.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};

use crate::config::MonitoredService;
use crate::core::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ServiceStatus {
    /// `/health` answered 2xx.
    Up,
    /// `/health` answered, but not with 2xx.
    Down,
    /// No answer within the timeout.
    Offline,
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceStatus::Up => write!(f, "UP"),
            ServiceStatus::Down => write!(f, "DOWN"),
            ServiceStatus::Offline => write!(f, "OFFLINE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationHealth {
    pub name: String,
    pub url: String,
    pub status: ServiceStatus,
    /// Health body of an `UP` service, or the failure reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    pub checked_at: DateTime<Utc>,
}

pub struct HealthService {
    services: Vec<MonitoredService>,
    http: reqwest::Client,
}

impl HealthService {
    pub fn new(services: Vec<MonitoredService>, check_timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(check_timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP client error: {}", e)))?;

        Ok(Self { services, http })
    }

    pub fn services(&self) -> &[MonitoredService] {
        &self.services
    }

    /// Checks every service concurrently; results keep the configured order.
    pub async fn check_all(&self) -> Vec<ApplicationHealth> {
        join_all(self.services.iter().map(|service| self.check(service))).await
    }

    async fn check(&self, service: &MonitoredService) -> ApplicationHealth {
        let health_url = format!("{}/health", service.url);

        let (status, details) = match self.http.get(&health_url).send().await {
            Ok(response) if response.status().is_success() => {
                let body = response.json::<serde_json::Value>().await.ok();
                (ServiceStatus::Up, body)
            }
            Ok(response) => {
                let reason = format!("HTTP {}", response.status());
                (ServiceStatus::Down, Some(serde_json::Value::String(reason)))
            }
            Err(e) => {
                log::debug!("Health check of {} failed: {}", service.name, e);
                (
                    ServiceStatus::Offline,
                    Some(serde_json::Value::String(e.to_string())),
                )
            }
        };

        if status != ServiceStatus::Up {
            log::warn!("📡 {} is {}", service.name, status);
        }

        ApplicationHealth {
            name: service.name.clone(),
            url: service.url.clone(),
            status,
            details,
            checked_at: Utc::now(),
        }
    }
}
