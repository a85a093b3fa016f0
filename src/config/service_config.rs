//! Addresses of peer services.

use super::{data_config::split_list, env_parse, env_string};

pub struct ServiceUrlConfig;

impl ServiceUrlConfig {
    pub fn customer_service_url() -> String {
        env_string("CUSTOMER_SERVICE_URL", "http://127.0.0.1:8081")
    }

    pub fn product_service_url() -> String {
        env_string("PRODUCT_SERVICE_URL", "http://127.0.0.1:8082")
    }

    /// Timeout applied to calls from the order service.
    pub fn request_timeout_seconds() -> u64 {
        env_parse("SERVICE_REQUEST_TIMEOUT_SECONDS", 10)
    }
}

/// One service shown on the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitoredService {
    pub name: String,
    pub url: String,
}

pub struct AdminConfig;

impl AdminConfig {
    /// `ADMIN_MONITORED_SERVICES`, formatted `name=url,name=url`.
    pub fn monitored_services() -> Vec<MonitoredService> {
        parse_monitored_services(&env_string(
            "ADMIN_MONITORED_SERVICES",
            "auth-service=http://127.0.0.1:9000,\
             customer-service=http://127.0.0.1:8081,\
             product-service=http://127.0.0.1:8082,\
             order-service=http://127.0.0.1:8083",
        ))
    }

    pub fn check_timeout_seconds() -> u64 {
        env_parse("ADMIN_CHECK_TIMEOUT_SECONDS", 3)
    }
}

pub fn parse_monitored_services(raw: &str) -> Vec<MonitoredService> {
    split_list(raw)
        .into_iter()
        .filter_map(|entry| {
            let (name, url) = entry.split_once('=')?;
            let (name, url) = (name.trim(), url.trim().trim_end_matches('/'));
            if name.is_empty() || url.is_empty() {
                log::warn!("Ignoring malformed monitored service entry '{}'", entry);
                return None;
            }
            Some(MonitoredService {
                name: name.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_monitored_services() {
        let services =
            parse_monitored_services("auth=http://localhost:9000/, orders = http://localhost:8083");

        assert_eq!(
            services,
            vec![
                MonitoredService {
                    name: "auth".to_string(),
                    url: "http://localhost:9000".to_string(),
                },
                MonitoredService {
                    name: "orders".to_string(),
                    url: "http://localhost:8083".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_monitored_services_drops_malformed_entries() {
        let services = parse_monitored_services("no-url,=http://x,ok=http://y");

        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "ok");
    }
}
