//! Customer profile endpoints. Every route requires a bearer token.
//!
//! `/customers/self` and `/customers/user/{userId}` are registered before
//! `/customers/{id}` so the literal segments win.

use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::customers::{CreateCustomerRequest, UpdateCustomerRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::customers::CustomerService;

#[get("")]
pub async fn get_customers(
    customer_service: web::Data<CustomerService>,
) -> Result<HttpResponse, AppError> {
    let customers = customer_service.get_all_customers().await?;
    Ok(HttpResponse::Ok().json(customers))
}

/// Profile of the token's user.
#[get("/self")]
pub async fn get_self_customer(
    customer_service: web::Data<CustomerService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_id = user.require_user_id()?;
    let customer = customer_service.get_customer_by_user_id(user_id).await?;
    Ok(HttpResponse::Ok().json(customer))
}

#[get("/user/{user_id}")]
pub async fn get_customer_by_user_id(
    customer_service: web::Data<CustomerService>,
    user_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer = customer_service
        .get_customer_by_user_id(user_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(customer))
}

#[get("/{id}")]
pub async fn get_customer(
    customer_service: web::Data<CustomerService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer = customer_service.get_customer_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(customer))
}

/// Creates the caller's profile. The owner is taken from the token's `userId`.
#[post("")]
pub async fn create_customer(
    customer_service: web::Data<CustomerService>,
    payload: web::Json<CreateCustomerRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_id = user.require_user_id()?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let customer = customer_service
        .create_customer(user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(customer))
}

#[put("/{id}")]
pub async fn update_customer(
    customer_service: web::Data<CustomerService>,
    id: web::Path<i64>,
    payload: web::Json<UpdateCustomerRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user_id = user.require_user_id()?;
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let customer = customer_service
        .update_customer(id.into_inner(), user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(customer))
}

#[delete("/{id}")]
pub async fn delete_customer(
    customer_service: web::Data<CustomerService>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    customer_service.delete_customer(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;

    use crate::repositories::memory::InMemoryCustomerRepository;
    use crate::routes::{configure_customer_routes, configure_extractors};
    use crate::services::auth::jwt_rsa_service::test_keys::{
        TEST_ISSUER, sign_test_claims, test_jwt_service,
    };
    use crate::services::customers::CustomerService;

    macro_rules! customer_app {
        () => {{
            let verifier = Arc::new(test_jwt_service().verifier().unwrap());
            let customer_service = actix_web::web::Data::new(CustomerService::new(Arc::new(
                InMemoryCustomerRepository::new(),
            )));
            test::init_service(
                App::new()
                    .app_data(customer_service)
                    .configure(configure_extractors)
                    .configure(|cfg| configure_customer_routes(cfg, verifier)),
            )
            .await
        }};
    }

    fn bearer(user_id: i64) -> String {
        let token = test_jwt_service()
            .issue_access_token("user", user_id, "shop-client", &[], 60)
            .unwrap();
        format!("Bearer {}", token)
    }

    fn bearer_without_user_id() -> String {
        let now = chrono::Utc::now().timestamp();
        let token = sign_test_claims(&json!({
            "iss": TEST_ISSUER,
            "sub": "service",
            "iat": now,
            "nbf": now,
            "exp": now + 60,
            "jti": "j"
        }));
        format!("Bearer {}", token)
    }

    fn profile() -> serde_json::Value {
        json!({ "name": "Ann", "phone": "+1 555 0100" })
    }

    #[actix_web::test]
    async fn test_create_and_read_self() {
        let app = customer_app!();

        let req = test::TestRequest::post()
            .uri("/customers")
            .insert_header(("Authorization", bearer(7)))
            .set_json(profile())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(created["userId"], 7);

        let req = test::TestRequest::get()
            .uri("/customers/self")
            .insert_header(("Authorization", bearer(7)))
            .to_request();
        let mine: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(mine, created);

        let req = test::TestRequest::get()
            .uri("/customers/user/7")
            .insert_header(("Authorization", bearer(1)))
            .to_request();
        let by_user: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(by_user["id"], created["id"]);
    }

    #[actix_web::test]
    async fn test_second_profile_is_conflict() {
        let app = customer_app!();
        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/customers")
                .insert_header(("Authorization", bearer(7)))
                .set_json(profile())
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_update_by_non_owner_is_forbidden() {
        let app = customer_app!();
        let req = test::TestRequest::post()
            .uri("/customers")
            .insert_header(("Authorization", bearer(7)))
            .set_json(profile())
            .to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::put()
            .uri(&format!("/customers/{}", created["id"]))
            .insert_header(("Authorization", bearer(8)))
            .set_json(json!({ "name": "Mallory" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::put()
            .uri(&format!("/customers/{}", created["id"]))
            .insert_header(("Authorization", bearer(7)))
            .set_json(json!({ "name": "Ann B." }))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["name"], "Ann B.");
        assert_eq!(updated["phone"], "+1 555 0100");
    }

    #[actix_web::test]
    async fn test_token_without_user_id_is_bad_request() {
        let app = customer_app!();

        let req = test::TestRequest::post()
            .uri("/customers")
            .insert_header(("Authorization", bearer_without_user_id()))
            .set_json(profile())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["error"].as_str().unwrap().contains("User ID not found in token"));
    }

    #[actix_web::test]
    async fn test_missing_profile_and_bad_ids() {
        let app = customer_app!();

        let req = test::TestRequest::get()
            .uri("/customers/self")
            .insert_header(("Authorization", bearer(7)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::get()
            .uri("/customers/abc")
            .insert_header(("Authorization", bearer(7)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::delete()
            .uri("/customers/5")
            .insert_header(("Authorization", bearer(7)))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_requires_token() {
        let app = customer_app!();

        let req = test::TestRequest::get().uri("/customers").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
