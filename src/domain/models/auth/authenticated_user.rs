use std::future::{Ready, ready};

use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};

use crate::core::errors::AppError;
use crate::domain::models::token::AccessTokenClaims;

/// Caller identity extracted from a verified access token.
///
/// The auth middleware stores one in the request extensions; handlers take it as an
/// extractor argument.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedUser {
    /// `sub` claim.
    pub username: String,
    /// `userId` claim, absent for tokens not minted for a shop user.
    pub user_id: Option<i64>,
    pub scopes: Vec<String>,
    /// Raw bearer token, relayed on calls to other services.
    pub token: String,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: AccessTokenClaims, token: String) -> Self {
        Self {
            username: claims.sub,
            user_id: claims.user_id,
            scopes: claims.scope,
            token,
        }
    }

    /// The `userId` claim, or a 400 when the token does not carry one.
    pub fn require_user_id(&self) -> Result<i64, AppError> {
        self.user_id
            .ok_or_else(|| AppError::ValidationError("User ID not found in token".to_string()))
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(authentication_required().into())),
        }
    }
}

fn authentication_required() -> AppError {
    AppError::AuthenticationError("Authentication required".to_string())
}

/// Identity when authentication is optional.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl OptionalUser {
    /// Principal name for logging: the `sub` claim or `"anonymous"`.
    pub fn username(&self) -> &str {
        self.0
            .as_ref()
            .map(|user| user.username.as_str())
            .unwrap_or("anonymous")
    }

    /// The caller, or the same 401 the [`AuthenticatedUser`] extractor gives.
    pub fn into_authenticated(self) -> Result<AuthenticatedUser, AppError> {
        self.0.ok_or_else(authentication_required)
    }
}

impl FromRequest for OptionalUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}
