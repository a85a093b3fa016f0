use async_trait::async_trait;

use super::get_json;
use crate::{core::errors::AppError, domain::dto::products::ProductResponse};

#[async_trait]
pub trait ProductClient: Send + Sync {
    async fn find_by_id(
        &self,
        id: i64,
        bearer_token: &str,
    ) -> Result<Option<ProductResponse>, AppError>;
}

/// Product service over HTTP.
pub struct HttpProductClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpProductClient {
    pub fn new(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        }
    }
}

#[async_trait]
impl ProductClient for HttpProductClient {
    async fn find_by_id(
        &self,
        id: i64,
        bearer_token: &str,
    ) -> Result<Option<ProductResponse>, AppError> {
        let url = format!("{}/products/{}", self.base_url, id);
        get_json(&self.http, &url, bearer_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[actix_web::test]
    async fn test_find_by_id_reads_decimal_price() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 5,
                "name": "Lamp",
                "price": "19.99",
                "quantity": 4
            })))
            .mount(&server)
            .await;

        let product = HttpProductClient::new(server.uri(), reqwest::Client::new())
            .find_by_id(5, "t")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(product.price, Decimal::new(1999, 2));
        assert_eq!(product.quantity, 4);
    }

    #[actix_web::test]
    async fn test_unreachable_service_is_external_service_error() {
        let result = HttpProductClient::new("http://127.0.0.1:1", reqwest::Client::new())
            .find_by_id(5, "t")
            .await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_unauthorized_is_external_service_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = HttpProductClient::new(server.uri(), reqwest::Client::new())
            .find_by_id(5, "t")
            .await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }
}
