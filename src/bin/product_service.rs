//! Product catalogue (default port 8082).

use std::sync::Arc;

use actix_web::web;
use log::info;
use shop_services::config::JwtConfig;
use shop_services::db::Database;
use shop_services::repositories::products::MongoProductRepository;
use shop_services::routes::configure_product_routes;
use shop_services::server::{self, startup_error};
use shop_services::services::auth::JwtVerifier;
use shop_services::services::products::ProductService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server::load_env_file();
    server::init_logging();

    info!("🚀 Starting product-service...");

    let database = Arc::new(
        Database::connect("shop_products", "product-service")
            .await
            .map_err(startup_error)?,
    );
    let verifier = Arc::new(
        JwtVerifier::fetch(&JwtConfig::jwk_set_uri(), JwtConfig::issuer())
            .await
            .map_err(startup_error)?,
    );

    let product_service = web::Data::new(ProductService::new(Arc::new(
        MongoProductRepository::new(database.clone()),
    )));

    let components = vec![
        ("MongoDB", database.database_name().to_string()),
        ("JWK set", JwtConfig::jwk_set_uri()),
    ];

    server::run("product-service", 8082, components, move |cfg| {
        cfg.app_data(product_service.clone());
        configure_product_routes(cfg, verifier.clone());
    })
    .await
}
