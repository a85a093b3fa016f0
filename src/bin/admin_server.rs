//! Health dashboard for the other services (default port 8090).

use std::time::Duration;

use actix_web::web;
use log::info;
use shop_services::config::AdminConfig;
use shop_services::routes::configure_admin_routes;
use shop_services::server::{self, startup_error};
use shop_services::services::admin::HealthService;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    server::load_env_file();
    server::init_logging();

    info!("🚀 Starting admin-server...");

    let health_service = HealthService::new(
        AdminConfig::monitored_services(),
        Duration::from_secs(AdminConfig::check_timeout_seconds()),
    )
    .map_err(startup_error)?;

    let components = health_service
        .services()
        .iter()
        .map(|service| ("Monitoring", format!("{} ({})", service.name, service.url)))
        .collect();
    let health_service = web::Data::new(health_service);

    server::run("admin-server", 8090, components, move |cfg| {
        cfg.app_data(health_service.clone());
        configure_admin_routes(cfg);
    })
    .await
}
