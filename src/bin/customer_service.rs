//! Customer profiles (default port 8081).

use std::sync::Arc;

use actix_web::web;
use log::info;
use shop_services::config::JwtConfig;
use shop_services::db::Database;
use shop_services::repositories::customers::MongoCustomerRepository;
use shop_services::routes::configure_customer_routes;
use shop_services::server::{self, startup_error};
use shop_services::services::auth::JwtVerifier;
use shop_services::services::customers::CustomerService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server::load_env_file();
    server::init_logging();

    info!("🚀 Starting customer-service...");

    let database = Arc::new(
        Database::connect("shop_customers", "customer-service")
            .await
            .map_err(startup_error)?,
    );
    let verifier = Arc::new(
        JwtVerifier::fetch(&JwtConfig::jwk_set_uri(), JwtConfig::issuer())
            .await
            .map_err(startup_error)?,
    );

    let customer_repo = Arc::new(MongoCustomerRepository::new(database.clone()));
    customer_repo.create_indexes().await.map_err(startup_error)?;
    let customer_service = web::Data::new(CustomerService::new(customer_repo));

    let components = vec![
        ("MongoDB", database.database_name().to_string()),
        ("JWK set", JwtConfig::jwk_set_uri()),
    ];

    server::run("customer-service", 8081, components, move |cfg| {
        cfg.app_data(customer_service.clone());
        configure_customer_routes(cfg, verifier.clone());
    })
    .await
}
