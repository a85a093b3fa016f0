//! Process bootstrap shared by every binary: env files, logging, and the HTTP server
//! with its middleware stack.
//!
//! ```rust,ignore
//! #[actix_web::main]
//! async fn main() -> std::io::Result<()> {
//!     server::load_env_file();
//!     server::init_logging();
//!     // ... build services ...
//!     server::run("product-service", 8082, components, move |cfg| {
//!         cfg.app_data(product_service.clone());
//!         configure_product_routes(cfg, verifier.clone());
//!     })
//!     .await
//! }
//! ```

use std::io;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{App, HttpServer, middleware, web};
use env_logger::Env;
use log::{error, info};

use crate::config::{CorsConfig, RateLimitConfig, ServerConfig};
use crate::core::errors::AppError;
use crate::handlers::health::ServiceInfo;
use crate::routes::{configure_extractors, configure_health_route};
use crate::utils::display_terminal::print_startup_summary;

/// Loads `.env.<PROFILE>` (`PROFILE` defaults to `dev`), falling back to `.env`.
pub fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());
    let filename = format!(".env.{}", profile);

    // The logger is not up yet, so report on stdout.
    match dotenv::from_filename(&filename) {
        Ok(_) => println!("Loaded {}", filename),
        Err(_) => {
            if dotenv::dotenv().is_ok() {
                println!("Loaded .env");
            }
        }
    }
}

/// `RUST_LOG` wins; otherwise `info,actix_web=debug`.
pub fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// Logs a fatal startup error and converts it for `main`.
pub fn startup_error(error: AppError) -> io::Error {
    error!("❌ Startup failed: {}", error);
    io::Error::other(error.to_string())
}

fn configure_cors() -> Cors {
    CorsConfig::allowed_origins()
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        .max_age(3600)
}

/// Binds `HOST:PORT` (`default_port` when `PORT` is unset) and serves until shutdown.
///
/// Every app gets rate limiting, CORS, request logging, trailing-slash trimming, the
/// JSON extractor error handlers and `GET /health`; `configure` adds the rest.
pub async fn run<F>(
    service_name: &'static str,
    default_port: u16,
    components: Vec<(&str, String)>,
    configure: F,
) -> io::Result<()>
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port_or(default_port));

    let rate_limit = RateLimitConfig::load();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit.per_second)
        .burst_size(rate_limit.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Invalid rate limit configuration"))?;

    info!(
        "🛡️ Rate limiting: {} req/s, burst {}",
        rate_limit.per_second, rate_limit.burst_size
    );

    print_startup_summary(service_name, &bind_address, &components);
    info!("🌐 {} listening on http://{}", service_name, bind_address);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(ServiceInfo { name: service_name }))
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_extractors)
            .configure(configure_health_route)
            .configure(configure.clone())
    })
    .bind(&bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}
