use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::products::{CreateProductRequest, UpdateProductRequest};
use crate::services::products::ProductService;

#[get("")]
pub async fn get_products(
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let products = product_service.get_all_products().await?;
    Ok(HttpResponse::Ok().json(products))
}

#[get("/{id}")]
pub async fn get_product(
    product_service: web::Data<ProductService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let product = product_service.get_product_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

#[post("")]
pub async fn create_product(
    product_service: web::Data<ProductService>,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let product = product_service.create_product(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(product))
}

#[put("/{id}")]
pub async fn update_product(
    product_service: web::Data<ProductService>,
    id: web::Path<i64>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let product = product_service
        .update_product(id.into_inner(), payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(product))
}

#[delete("/{id}")]
pub async fn delete_product(
    product_service: web::Data<ProductService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    product_service.delete_product(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;

    use crate::repositories::memory::InMemoryProductRepository;
    use crate::routes::{configure_extractors, configure_product_routes};
    use crate::services::auth::jwt_rsa_service::test_keys::test_jwt_service;
    use crate::services::products::ProductService;

    macro_rules! product_app {
        () => {{
            let verifier = Arc::new(test_jwt_service().verifier().unwrap());
            let product_service = actix_web::web::Data::new(ProductService::new(Arc::new(
                InMemoryProductRepository::new(),
            )));
            test::init_service(
                App::new()
                    .app_data(product_service)
                    .configure(configure_extractors)
                    .configure(|cfg| configure_product_routes(cfg, verifier)),
            )
            .await
        }};
    }

    fn bearer() -> String {
        let token = test_jwt_service()
            .issue_access_token("clerk", 1, "shop-client", &[], 60)
            .unwrap();
        format!("Bearer {}", token)
    }

    #[actix_web::test]
    async fn test_create_serializes_price_as_decimal_string() {
        let app = product_app!();

        let req = test::TestRequest::post()
            .uri("/products")
            .insert_header(("Authorization", bearer()))
            .set_json(json!({ "name": "Lamp", "price": 19.99, "quantity": 4 }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["price"], "19.99");
        assert_eq!(body["quantity"], 4);
    }

    #[actix_web::test]
    async fn test_invalid_product_is_bad_request() {
        let app = product_app!();

        for payload in [
            json!({ "name": "Lamp", "price": 0, "quantity": 4 }),
            json!({ "name": " ", "price": 1, "quantity": 4 }),
            json!({ "name": "Lamp", "price": 1, "quantity": 0 }),
            json!({ "name": "Lamp", "quantity": 1 }),
        ] {
            let req = test::TestRequest::post()
                .uri("/products")
                .insert_header(("Authorization", bearer()))
                .set_json(payload)
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[actix_web::test]
    async fn test_partial_update_and_missing_product() {
        let app = product_app!();
        let req = test::TestRequest::post()
            .uri("/products")
            .insert_header(("Authorization", bearer()))
            .set_json(json!({ "name": "Lamp", "price": "5.00", "quantity": 4 }))
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/products/{}", created["id"]))
            .insert_header(("Authorization", bearer()))
            .set_json(json!({ "quantity": 9 }))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["quantity"], 9);
        assert_eq!(updated["price"], "5.00");

        let req = test::TestRequest::get()
            .uri("/products/404")
            .insert_header(("Authorization", bearer()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_requires_token() {
        let app = product_app!();

        let req = test::TestRequest::get().uri("/products").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
