//! Admin dashboard: a JSON feed of every monitored service's health and an HTML view
//! of the same data. Each request checks the services afresh.

use actix_web::{HttpResponse, get, web};
use askama::Template;

use crate::core::errors::AppError;
use crate::services::admin::{ApplicationHealth, HealthService, ServiceStatus};

#[get("/api/applications")]
pub async fn get_applications(health_service: web::Data<HealthService>) -> HttpResponse {
    let applications = health_service.check_all().await;
    HttpResponse::Ok().json(applications)
}

#[get("/")]
pub async fn dashboard(health_service: web::Data<HealthService>) -> Result<HttpResponse, AppError> {
    let applications = health_service.check_all().await;
    let html = DashboardTemplate::new(&applications).render()?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate<'a> {
    rows: Vec<DashboardRow<'a>>,
    up: usize,
    total: usize,
}

struct DashboardRow<'a> {
    name: &'a str,
    url: &'a str,
    color: &'static str,
    status: String,
    checked_at: String,
}

impl<'a> DashboardTemplate<'a> {
    fn new(applications: &'a [ApplicationHealth]) -> Self {
        let rows = applications
            .iter()
            .map(|app| DashboardRow {
                name: &app.name,
                url: &app.url,
                color: match app.status {
                    ServiceStatus::Up => "#1b873f",
                    ServiceStatus::Down => "#b00020",
                    ServiceStatus::Offline => "#6a737d",
                },
                status: app.status.to_string(),
                checked_at: app.checked_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            })
            .collect();

        let up = applications
            .iter()
            .filter(|app| app.status == ServiceStatus::Up)
            .count();

        Self {
            rows,
            up,
            total: applications.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, http::StatusCode, test, web};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::MonitoredService;
    use crate::routes::configure_admin_routes;
    use crate::services::admin::HealthService;

    use super::*;

    async fn monitored() -> (MockServer, Vec<MonitoredService>) {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "UP" })))
            .mount(&server)
            .await;

        let services = vec![
            MonitoredService {
                name: "product-service".to_string(),
                url: server.uri(),
            },
            MonitoredService {
                name: "<order-service>".to_string(),
                url: "http://127.0.0.1:1".to_string(),
            },
        ];
        (server, services)
    }

    macro_rules! admin_app {
        ($services:expr) => {{
            let health_service =
                HealthService::new($services, Duration::from_millis(500)).unwrap();
            test::init_service(
                App::new()
                    .app_data(web::Data::new(health_service))
                    .configure(configure_admin_routes),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_applications_lists_each_service_status() {
        let (_server, services) = monitored().await;
        let app = admin_app!(services);

        let req = test::TestRequest::get().uri("/api/applications").to_request();
        let body: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body.len(), 2);
        assert_eq!(body[0]["name"], "product-service");
        assert_eq!(body[0]["status"], "UP");
        assert_eq!(body[1]["status"], "OFFLINE");
        assert!(body[0]["checkedAt"].is_string());
    }

    #[actix_web::test]
    async fn test_dashboard_renders_escaped_names() {
        let (_server, services) = monitored().await;
        let app = admin_app!(services);

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("1 of 2 services up"));
        assert!(body.contains("&lt;order-service&gt;"));
        assert!(body.contains("OFFLINE"));
    }

    #[::core::prelude::v1::test]
    fn test_dashboard_template_escapes_url_and_colors_status() {
        let applications = vec![
            ApplicationHealth {
                name: "auth-service".to_string(),
                url: r#"http://auth"><script>"#.to_string(),
                status: ServiceStatus::Up,
                details: None,
                checked_at: chrono::Utc::now(),
            },
            ApplicationHealth {
                name: "order-service".to_string(),
                url: "http://order".to_string(),
                status: ServiceStatus::Down,
                details: None,
                checked_at: chrono::Utc::now(),
            },
        ];

        let html = DashboardTemplate::new(&applications).render().unwrap();

        assert!(html.contains("1 of 2 services up"));
        assert!(html.contains("color: #1b873f"));
        assert!(html.contains("color: #b00020"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
