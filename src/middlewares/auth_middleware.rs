//! JWT authentication middleware.

use std::future::{Ready, ready};
use std::rc::Rc;
use std::sync::Arc;

use actix_web::{
    Error, Result,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
};

use crate::domain::models::auth::AuthMode;
use crate::middlewares::auth_inner::AuthMiddlewareService;
use crate::services::auth::JwtVerifier;

pub struct AuthMiddleware {
    mode: AuthMode,
    verifier: Arc<JwtVerifier>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode, verifier: Arc<JwtVerifier>) -> Self {
        Self { mode, verifier }
    }

    /// Rejects requests without a valid bearer token with 401.
    pub fn required(verifier: Arc<JwtVerifier>) -> Self {
        Self::new(AuthMode::Required, verifier)
    }

    /// Attaches the caller when a valid token is present and never rejects.
    pub fn optional(verifier: Arc<JwtVerifier>) -> Self {
        Self::new(AuthMode::Optional, verifier)
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            verifier: self.verifier.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
    use crate::services::auth::jwt_rsa_service::test_keys::test_jwt_service;
    use actix_web::{App, HttpResponse, http::StatusCode, test, web};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({
            "sub": user.username,
            "userId": user.user_id,
        }))
    }

    async fn maybe(user: OptionalUser) -> HttpResponse {
        HttpResponse::Ok().body(user.username().to_string())
    }

    fn bearer(user_id: i64) -> String {
        let token = test_jwt_service()
            .issue_access_token("alice", user_id, "shop-client", &["read".to_string()], 60)
            .unwrap();
        format!("Bearer {}", token)
    }

    #[actix_web::test]
    async fn test_required_mode_attaches_user() {
        let verifier = Arc::new(test_jwt_service().verifier().unwrap());
        let app = test::init_service(
            App::new().service(
                web::scope("/me")
                    .wrap(AuthMiddleware::required(verifier))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", bearer(7)))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["sub"], "alice");
        assert_eq!(body["userId"], 7);
    }

    #[actix_web::test]
    async fn test_required_mode_rejects_missing_and_bad_tokens() {
        let verifier = Arc::new(test_jwt_service().verifier().unwrap());
        let app = test::init_service(
            App::new().service(
                web::scope("/me")
                    .wrap(AuthMiddleware::required(verifier))
                    .route("", web::get().to(whoami)),
            ),
        )
        .await;

        let missing = test::TestRequest::get().uri("/me").to_request();
        let resp = test::call_service(&app, missing).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let garbage = test::TestRequest::get()
            .uri("/me")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        let resp = test::call_service(&app, garbage).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "authentication_required");
    }

    #[actix_web::test]
    async fn test_optional_mode_lets_anonymous_through() {
        let verifier = Arc::new(test_jwt_service().verifier().unwrap());
        let app = test::init_service(
            App::new().service(
                web::scope("/maybe")
                    .wrap(AuthMiddleware::optional(verifier))
                    .route("", web::get().to(maybe)),
            ),
        )
        .await;

        let anonymous = test::TestRequest::get().uri("/maybe").to_request();
        let body = test::call_and_read_body(&app, anonymous).await;
        assert_eq!(body, "anonymous");

        let known = test::TestRequest::get()
            .uri("/maybe")
            .insert_header(("Authorization", bearer(1)))
            .to_request();
        let body = test::call_and_read_body(&app, known).await;
        assert_eq!(body, "alice");
    }
}
