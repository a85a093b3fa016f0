pub mod health_service;

pub use health_service::{ApplicationHealth, HealthService, ServiceStatus};
