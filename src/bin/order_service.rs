//! Orders (default port 8083). Calls the customer and product services with the
//! caller's bearer token.

use std::sync::Arc;

use actix_web::web;
use log::info;
use shop_services::clients::{HttpCustomerClient, HttpProductClient, build_http_client};
use shop_services::config::{JwtConfig, ServiceUrlConfig};
use shop_services::db::Database;
use shop_services::repositories::orders::MongoOrderRepository;
use shop_services::routes::configure_order_routes;
use shop_services::server::{self, startup_error};
use shop_services::services::auth::JwtVerifier;
use shop_services::services::orders::OrderService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server::load_env_file();
    server::init_logging();

    info!("🚀 Starting order-service...");

    let database = Arc::new(
        Database::connect("shop_orders", "order-service")
            .await
            .map_err(startup_error)?,
    );
    let verifier = Arc::new(
        JwtVerifier::fetch(&JwtConfig::jwk_set_uri(), JwtConfig::issuer())
            .await
            .map_err(startup_error)?,
    );

    let order_repo = Arc::new(MongoOrderRepository::new(database.clone()));
    order_repo.create_indexes().await.map_err(startup_error)?;

    let http = build_http_client(ServiceUrlConfig::request_timeout_seconds())
        .map_err(startup_error)?;
    let customer_url = ServiceUrlConfig::customer_service_url();
    let product_url = ServiceUrlConfig::product_service_url();

    let order_service = web::Data::new(OrderService::new(
        order_repo,
        Arc::new(HttpCustomerClient::new(customer_url.clone(), http.clone())),
        Arc::new(HttpProductClient::new(product_url.clone(), http)),
    ));

    let components = vec![
        ("MongoDB", database.database_name().to_string()),
        ("JWK set", JwtConfig::jwk_set_uri()),
        ("Customer service", customer_url),
        ("Product service", product_url),
    ];

    server::run("order-service", 8083, components, move |cfg| {
        cfg.app_data(order_service.clone());
        configure_order_routes(cfg, verifier.clone());
    })
    .await
}
