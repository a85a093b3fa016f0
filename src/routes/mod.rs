//! Route registration for every service.
//!
//! Each `configure_*` function mounts one resource. Bearer-protected scopes wrap an
//! [`AuthMiddleware`] built around the service's [`JwtVerifier`]:
//!
//! ```rust,ignore
//! App::new()
//!     .app_data(order_service)
//!     .configure(configure_extractors)
//!     .configure(|cfg| configure_order_routes(cfg, verifier.clone()));
//! ```
//!
//! | Service | Scope | Auth |
//! |---------|-------|------|
//! | auth | `/oauth2`, `/.well-known` | none |
//! | auth | `/userinfo` | required |
//! | auth | `/users` | per handler (`POST` is public) |
//! | customer | `/customers` | required |
//! | product | `/products` | required |
//! | order | `/orders` | required |
//! | admin | `/`, `/api/applications` | none |

use std::sync::Arc;

use actix_web::web;

use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::JwtVerifier;

/// Renders body, query, path and form extraction failures as `AppError`s, so they share
/// the JSON error format. Form failures only occur on the OAuth2 endpoints and use the
/// RFC 6749 error body.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid query: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid path: {}", err)).into()
    }))
    .app_data(web::FormConfig::default().error_handler(|err, _req| {
        AppError::oauth2("invalid_request", err.to_string()).into()
    }));
}

/// Authorization server endpoints plus user management.
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig, verifier: Arc<JwtVerifier>) {
    cfg.service(
        web::scope("/oauth2")
            .service(handlers::oauth::authorize_page)
            .service(handlers::oauth::authorize_submit)
            .service(handlers::oauth::token)
            .service(handlers::oauth::jwks),
    )
    .service(handlers::oauth::openid_configuration)
    .service(handlers::oauth::authorization_server_metadata)
    .service(
        web::scope("/userinfo")
            .wrap(AuthMiddleware::required(verifier.clone()))
            .service(handlers::oauth::userinfo),
    );

    configure_user_routes(cfg, verifier);
}

pub fn configure_user_routes(cfg: &mut web::ServiceConfig, verifier: Arc<JwtVerifier>) {
    cfg.service(
        web::scope("/users")
            .wrap(AuthMiddleware::optional(verifier))
            .service(handlers::users::get_users)
            .service(handlers::users::create_user)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::delete_user),
    );
}

/// `/self` and `/user/{user_id}` are registered ahead of `/{id}`.
pub fn configure_customer_routes(cfg: &mut web::ServiceConfig, verifier: Arc<JwtVerifier>) {
    cfg.service(
        web::scope("/customers")
            .wrap(AuthMiddleware::required(verifier))
            .service(handlers::customers::get_customers)
            .service(handlers::customers::get_self_customer)
            .service(handlers::customers::get_customer_by_user_id)
            .service(handlers::customers::get_customer)
            .service(handlers::customers::create_customer)
            .service(handlers::customers::update_customer)
            .service(handlers::customers::delete_customer),
    );
}

pub fn configure_product_routes(cfg: &mut web::ServiceConfig, verifier: Arc<JwtVerifier>) {
    cfg.service(
        web::scope("/products")
            .wrap(AuthMiddleware::required(verifier))
            .service(handlers::products::get_products)
            .service(handlers::products::get_product)
            .service(handlers::products::create_product)
            .service(handlers::products::update_product)
            .service(handlers::products::delete_product),
    );
}

pub fn configure_order_routes(cfg: &mut web::ServiceConfig, verifier: Arc<JwtVerifier>) {
    cfg.service(
        web::scope("/orders")
            .wrap(AuthMiddleware::required(verifier))
            .service(handlers::orders::get_orders)
            .service(handlers::orders::get_self_orders)
            .service(handlers::orders::get_orders_by_customer)
            .service(handlers::orders::get_order)
            .service(handlers::orders::create_order)
            .service(handlers::orders::update_order_status)
            .service(handlers::orders::delete_order),
    );
}

pub fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::admin::get_applications)
        .service(handlers::admin::dashboard);
}

/// `GET /health`; the app must provide a [`ServiceInfo`](handlers::health::ServiceInfo).
pub fn configure_health_route(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health::health);
}
