use async_trait::async_trait;

use super::get_json;
use crate::{core::errors::AppError, domain::dto::customers::CustomerResponse};

#[async_trait]
pub trait CustomerClient: Send + Sync {
    async fn find_by_user_id(
        &self,
        user_id: i64,
        bearer_token: &str,
    ) -> Result<Option<CustomerResponse>, AppError>;
}

/// Customer service over HTTP.
pub struct HttpCustomerClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpCustomerClient {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[async_trait]
impl CustomerClient for HttpCustomerClient {
    async fn find_by_user_id(
        &self,
        user_id: i64,
        bearer_token: &str,
    ) -> Result<Option<CustomerResponse>, AppError> {
        let url = format!("{}/customers/user/{}", self.base_url, user_id);
        get_json(&self.http, &url, bearer_token).await
    }
}
