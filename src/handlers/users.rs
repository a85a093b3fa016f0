//! # User Management HTTP Handlers
//!
//! | Method | Path | Auth | Success |
//! |--------|------|------|---------|
//! | `GET` | `/users` | bearer | 200 |
//! | `GET` | `/users/{id}` | bearer | 200 |
//! | `POST` | `/users` | none | 201 |
//! | `PUT` | `/users/{id}` | bearer | 200 |
//! | `DELETE` | `/users/{id}` | bearer | 204 |
//!
//! The scope runs [`AuthMiddleware::optional`](crate::middlewares::AuthMiddleware::optional);
//! protected handlers take an [`AuthenticatedUser`] argument, which answers 401 when
//! no valid token was presented.

use actix_web::{HttpResponse, delete, get, post, put, web};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::users::{CreateUserRequest, UpdateUserRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::users::UserService;

#[get("")]
pub async fn get_users(
    user_service: web::Data<UserService>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let users = user_service.get_all_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{id}")]
pub async fn get_user(
    user_service: web::Data<UserService>,
    id: web::Path<i64>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = user_service.get_user_by_id(id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Registration. Public, so new accounts can sign in through the login form.
///
/// ```json
/// { "username": "alice", "password": "secret1", "email": "alice@example.com" }
/// ```
#[post("")]
pub async fn create_user(
    user_service: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let response = user_service.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

#[put("/{id}")]
pub async fn update_user(
    user_service: web::Data<UserService>,
    id: web::Path<i64>,
    payload: web::Json<UpdateUserRequest>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let id = id.into_inner();
    log::info!("User {} updated by '{}'", id, user.username);

    let response = user_service.update_user(id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[delete("/{id}")]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    id: web::Path<i64>,
    _user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    user_service.delete_user(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{App, http::StatusCode, test};
    use serde_json::json;

    use crate::repositories::memory::InMemoryUserRepository;
    use crate::routes::{configure_extractors, configure_user_routes};
    use crate::services::auth::jwt_rsa_service::test_keys::test_jwt_service;
    use crate::services::users::UserService;

    macro_rules! user_app {
        () => {{
            let jwt_service = test_jwt_service();
            let verifier = Arc::new(jwt_service.verifier().unwrap());
            let user_service = actix_web::web::Data::new(UserService::new(
                Arc::new(InMemoryUserRepository::new()),
                4,
            ));
            test::init_service(
                App::new()
                    .app_data(user_service)
                    .configure(configure_extractors)
                    .configure(|cfg| configure_user_routes(cfg, verifier)),
            )
            .await
        }};
    }

    fn bearer() -> String {
        let token = test_jwt_service()
            .issue_access_token("admin", 99, "shop-client", &[], 60)
            .unwrap();
        format!("Bearer {}", token)
    }

    fn alice() -> serde_json::Value {
        json!({ "username": "alice", "password": "secret1", "email": "alice@example.com" })
    }

    #[actix_web::test]
    async fn test_create_user_is_public() {
        let app = user_app!();

        let req = test::TestRequest::post().uri("/users").set_json(alice()).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["username"], "alice");
        assert!(body.get("password_hash").is_none());
    }

    #[actix_web::test]
    async fn test_duplicate_username_is_conflict() {
        let app = user_app!();
        let req = test::TestRequest::post().uri("/users").set_json(alice()).to_request();
        test::call_service(&app, req).await;

        let duplicate = json!({ "username": "alice", "password": "secret1", "email": "x@example.com" });
        let req = test::TestRequest::post().uri("/users").set_json(duplicate).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[actix_web::test]
    async fn test_invalid_payload_is_bad_request() {
        let app = user_app!();
        let invalid = json!({ "username": "al", "password": "secret1", "email": "not-an-email" });

        let req = test::TestRequest::post().uri("/users").set_json(invalid).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_reads_require_token() {
        let app = user_app!();

        let req = test::TestRequest::get().uri("/users").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/users")
            .insert_header(("Authorization", bearer()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_get_update_delete_lifecycle() {
        let app = user_app!();
        let req = test::TestRequest::post().uri("/users").set_json(alice()).to_request();
        let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let uri = format!("/users/{}", created["id"]);

        let req = test::TestRequest::put()
            .uri(&uri)
            .insert_header(("Authorization", bearer()))
            .set_json(json!({ "email": "new@example.com" }))
            .to_request();
        let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated["email"], "new@example.com");

        let req = test::TestRequest::delete()
            .uri(&uri)
            .insert_header(("Authorization", bearer()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get()
            .uri(&uri)
            .insert_header(("Authorization", bearer()))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }
}
