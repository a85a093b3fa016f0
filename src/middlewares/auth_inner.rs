//! Request-time half of [`AuthMiddleware`](super::AuthMiddleware).

use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, forward_ready};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::LocalBoxFuture;

use crate::core::AppError;
use crate::domain::models::auth::{AuthMode, AuthenticatedUser};
use crate::services::auth::{JwtVerifier, extract_bearer_token};

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub verifier: Arc<JwtVerifier>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let auth_result = authenticate_request(&req, &self.verifier);

        Box::pin(async move {
            match (&mode, auth_result) {
                (AuthMode::Required, Err(err)) => {
                    log::warn!("Authentication failed for {} {}: {}", req.method(), req.path(), err);
                    let response = HttpResponse::Unauthorized()
                        .insert_header(("WWW-Authenticate", "Bearer"))
                        .json(serde_json::json!({
                            "error": "authentication_required",
                            "message": err.to_string()
                        }));
                    let (req, _) = req.into_parts();
                    return Ok(ServiceResponse::new(req, response).map_into_right_body());
                }
                (_, Ok(user)) => {
                    log::debug!("Authenticated '{}' (userId {:?})", user.username, user.user_id);
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Err(_)) => {
                    log::debug!("No valid token, continuing anonymously");
                }
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn authenticate_request(
    req: &ServiceRequest,
    verifier: &JwtVerifier,
) -> Result<AuthenticatedUser, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Missing Authorization header".to_string()))?;

    let token = extract_bearer_token(auth_header)?;
    let claims = verifier.verify(token)?;

    Ok(AuthenticatedUser::from_claims(claims, token.to_string()))
}
