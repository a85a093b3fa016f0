use actix_web::{HttpResponse, get, web};
use chrono::Utc;

/// Name reported by `/health`.
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    pub name: &'static str,
}

/// Liveness endpoint polled by the admin server.
#[get("/health")]
pub async fn health(info: web::Data<ServiceInfo>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "UP",
        "service": info.name,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}
