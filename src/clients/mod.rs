//! HTTP clients for calls between services.
//!
//! The order service reads customers and products from their owning services. Each
//! client relays the caller's bearer token, so the downstream service applies its own
//! authentication. A 404 reads as `None`; any other failure is an
//! [`AppError::ExternalServiceError`].
//!
//! ```rust,ignore
//! let customer_client = HttpCustomerClient::new(ServiceUrlConfig::customer_service_url(), http.clone());
//! let customer = customer_client.find_by_user_id(7, &user.token).await?;
//! ```

pub mod customer_client;
pub mod product_client;

pub use customer_client::{CustomerClient, HttpCustomerClient};
pub use product_client::{HttpProductClient, ProductClient};

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::core::errors::AppError;

/// Shared `reqwest` client with the configured request timeout.
pub fn build_http_client(timeout_seconds: u64) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| AppError::InternalError(format!("HTTP client error: {}", e)))
}

async fn get_json<T: DeserializeOwned>(
    http: &reqwest::Client,
    url: &str,
    bearer_token: &str,
) -> Result<Option<T>, AppError> {
    let response = http
        .get(url)
        .bearer_auth(bearer_token)
        .send()
        .await
        .map_err(|e| AppError::ExternalServiceError(format!("Request to {} failed: {}", url, e)))?;

    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }

    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        return Err(AppError::ExternalServiceError(format!(
            "{} returned {}: {}",
            url, status, error_text
        )));
    }

    response
        .json::<T>()
        .await
        .map(Some)
        .map_err(|e| AppError::ExternalServiceError(format!("Invalid response from {}: {}", url, e)))
}
