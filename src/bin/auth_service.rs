//! Authorization server and user accounts (default port 9000).

use std::sync::Arc;

use actix_web::web;
use log::info;
use shop_services::caching::redis::RedisClient;
use shop_services::config::{JwtConfig, PasswordConfig};
use shop_services::db::Database;
use shop_services::domain::models::oauth::RegisteredClient;
use shop_services::repositories::oauth::RedisAuthorizationRepository;
use shop_services::repositories::users::MongoUserRepository;
use shop_services::routes::configure_auth_routes;
use shop_services::server::{self, startup_error};
use shop_services::services::auth::{JwtRsaService, OAuth2Service};
use shop_services::services::users::UserService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server::load_env_file();
    server::init_logging();

    info!("🚀 Starting auth-service...");

    let database = Arc::new(
        Database::connect("shop_auth", "auth-service")
            .await
            .map_err(startup_error)?,
    );
    let redis = Arc::new(RedisClient::connect().await.map_err(startup_error)?);

    let user_repo = Arc::new(MongoUserRepository::new(database.clone()));
    user_repo.create_indexes().await.map_err(startup_error)?;

    let bcrypt_cost = PasswordConfig::bcrypt_cost();
    let jwt_service = Arc::new(JwtRsaService::from_config().map_err(startup_error)?);
    let verifier = Arc::new(jwt_service.verifier().map_err(startup_error)?);
    let client = RegisteredClient::from_config(bcrypt_cost).map_err(startup_error)?;
    let client_id = client.client_id.clone();

    let user_service = Arc::new(UserService::new(user_repo, bcrypt_cost));
    let oauth_service = web::Data::new(OAuth2Service::new(
        client,
        Arc::new(RedisAuthorizationRepository::new(redis)),
        user_service.clone(),
        jwt_service.clone(),
    ));
    let user_service = web::Data::from(user_service);
    let jwt_data = web::Data::from(jwt_service.clone());

    let components = vec![
        ("MongoDB", database.database_name().to_string()),
        ("Redis", "authorization codes, refresh tokens".to_string()),
        ("Issuer", JwtConfig::issuer()),
        ("Signing key", jwt_service.key_id().to_string()),
        ("Client", client_id),
    ];

    server::run("auth-service", 9000, components, move |cfg| {
        cfg.app_data(user_service.clone())
            .app_data(oauth_service.clone())
            .app_data(jwt_data.clone());
        configure_auth_routes(cfg, verifier.clone());
    })
    .await
}
