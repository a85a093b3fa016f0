//! # OAuth2 / OpenID Connect endpoints
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `GET` | `/oauth2/authorize` | validate the request, show the login form |
//! | `POST` | `/oauth2/authorize` | check credentials, redirect with a code |
//! | `POST` | `/oauth2/token` | `authorization_code` and `refresh_token` grants |
//! | `GET` | `/oauth2/jwks` | public signing keys |
//! | `GET` | `/.well-known/openid-configuration` | discovery |
//! | `GET` | `/.well-known/oauth-authorization-server` | discovery (RFC 8414) |
//! | `GET` | `/userinfo` | claims of the bearer token's user |

use actix_web::{HttpRequest, HttpResponse, get, http::header, post, web};
use askama::Template;

use crate::core::errors::AppError;
use crate::domain::dto::oauth::{AuthorizeForm, AuthorizeRequest, TokenRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::auth::{AuthorizeError, ClientCredentials, JwtRsaService, OAuth2Service};

/// Shows the login form when the authorization request is acceptable.
#[get("/authorize")]
pub async fn authorize_page(
    oauth_service: web::Data<OAuth2Service>,
    query: web::Query<AuthorizeRequest>,
) -> Result<HttpResponse, AppError> {
    let request = query.into_inner();

    match oauth_service.validate_authorization(&request) {
        Ok(_) => login_page(HttpResponse::Ok(), &request, None),
        Err(e) => authorize_error(e),
    }
}

/// Login form submission. A wrong password re-renders the form with 401.
#[post("/authorize")]
pub async fn authorize_submit(
    oauth_service: web::Data<OAuth2Service>,
    form: web::Form<AuthorizeForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let request = form.authorize_request();

    let authorization = match oauth_service.validate_authorization(&request) {
        Ok(authorization) => authorization,
        Err(e) => return authorize_error(e),
    };

    let user = match oauth_service
        .authenticate_user(&form.username, &form.password)
        .await
    {
        Ok(user) => user,
        Err(AppError::AuthenticationError(message)) => {
            log::warn!("Login failed for '{}'", form.username);
            return login_page(HttpResponse::Unauthorized(), &request, Some(&message));
        }
        Err(e) => return Err(e),
    };

    let location = oauth_service
        .issue_authorization_code(&authorization, &user)
        .await?;
    Ok(redirect(location))
}

/// Token endpoint. Client credentials come from HTTP Basic or the form body.
#[post("/token")]
pub async fn token(
    oauth_service: web::Data<OAuth2Service>,
    req: HttpRequest,
    form: web::Form<TokenRequest>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let authorization = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let credentials = ClientCredentials::extract(authorization, &form)?;
    let response = oauth_service.exchange(&credentials, form).await?;

    Ok(HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .insert_header((header::PRAGMA, "no-cache"))
        .json(response))
}

#[get("/jwks")]
pub async fn jwks(jwt_service: web::Data<JwtRsaService>) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "public, max-age=3600"))
        .json(jwt_service.get_jwks())
}

#[get("/.well-known/openid-configuration")]
pub async fn openid_configuration(oauth_service: web::Data<OAuth2Service>) -> HttpResponse {
    HttpResponse::Ok().json(oauth_service.provider_metadata())
}

#[get("/.well-known/oauth-authorization-server")]
pub async fn authorization_server_metadata(
    oauth_service: web::Data<OAuth2Service>,
) -> HttpResponse {
    HttpResponse::Ok().json(oauth_service.provider_metadata())
}

#[get("")]
pub async fn userinfo(
    oauth_service: web::Data<OAuth2Service>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let info = oauth_service.userinfo(&user).await?;
    Ok(HttpResponse::Ok().json(info))
}

fn authorize_error(error: AuthorizeError) -> Result<HttpResponse, AppError> {
    match error {
        AuthorizeError::Rejected(e) => Err(e),
        AuthorizeError::Redirect(location) => Ok(redirect(location)),
    }
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Login form. Every hidden field and the error line are escaped by the template.
#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate<'a> {
    hidden_fields: Vec<HiddenField<'a>>,
    error: Option<&'a str>,
}

/// Authorization request parameter echoed back on submit.
struct HiddenField<'a> {
    name: &'static str,
    value: &'a str,
}

fn login_page(
    mut builder: actix_web::HttpResponseBuilder,
    request: &AuthorizeRequest,
    error: Option<&str>,
) -> Result<HttpResponse, AppError> {
    let hidden_fields = [
        ("response_type", &request.response_type),
        ("client_id", &request.client_id),
        ("redirect_uri", &request.redirect_uri),
        ("scope", &request.scope),
        ("state", &request.state),
        ("nonce", &request.nonce),
        ("code_challenge", &request.code_challenge),
        ("code_challenge_method", &request.code_challenge_method),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_deref().map(|value| HiddenField { name, value }))
    .collect();

    let html = LoginTemplate {
        hidden_fields,
        error,
    }
    .render()?;

    Ok(builder
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .content_type("text/html; charset=utf-8")
        .body(html))
}
