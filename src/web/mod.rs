//! Web server module.

mod handlers;
mod views;

pub use handlers::*;

use crate::config::ServerConfig;
use crate::service::Dashboard;

use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    pub dashboard: Arc<Dashboard>,
}

/// Web server for StatusBoard.
pub struct Server {
    state: AppState,
}

impl Server {
    /// Create a new server with the given dependencies.
    pub fn new(config: ServerConfig, dashboard: Arc<Dashboard>) -> Self {
        Self {
            state: AppState { config, dashboard },
        }
    }

    /// Build the router with all routes.
    pub fn routes(&self) -> Router {
        let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

        Router::new()
            // Pages
            .route("/", get(handlers::handle_dashboard))
            .route("/monitor/{id}", get(handlers::handle_monitor_detail))
            // API endpoints
            .route("/api/monitors", get(handlers::handle_get_monitors))
            .route("/api/monitor/{id}", get(handlers::handle_get_monitor))
            // Static assets
            .route("/static/{*path}", get(handlers::handle_static))
            .route("/favicon.ico", get(handlers::handle_favicon))
            .fallback(handlers::handle_not_found)
            .layer(cors)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Start the server on the configured port.
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.state.config.http_port));
        let router = self.routes();

        tracing::info!("Web server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;
    use crate::upstream::UpstreamClient;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use std::time::Duration;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_server(api_url: String, api_key: Option<&str>) -> TestServer {
        let upstream = UpstreamConfig {
            api_key: api_key.map(str::to_string),
            api_url,
            timeout: Duration::from_secs(2),
        };
        let config = ServerConfig {
            http_port: 0,
            upstream: upstream.clone(),
        };
        let dashboard = Arc::new(Dashboard::new(UpstreamClient::new(upstream).unwrap()));
        TestServer::new(Server::new(config, dashboard).routes()).unwrap()
    }

    async fn mock_upstream(body: Value) -> MockServer {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&upstream)
            .await;
        upstream
    }

    #[tokio::test]
    async fn test_api_monitors() {
        let upstream = mock_upstream(json!({
            "stat": "ok",
            "monitors": [{"id": 1, "friendly_name": "Homepage", "status": 2, "all_time_uptime_ratio": "99.9"}]
        }))
        .await;
        let server = test_server(upstream.uri(), Some("secret"));

        let response = server.get("/api/monitors").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"][0]["name"], "Homepage");
        assert_eq!(body["data"][0]["status_class"], "success");
    }

    #[tokio::test]
    async fn test_api_monitors_empty() {
        let upstream = mock_upstream(json!({"stat": "ok", "monitors": []})).await;
        let server = test_server(upstream.uri(), Some("secret"));

        let response = server.get("/api/monitors").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_api_monitor_not_found() {
        let upstream = mock_upstream(json!({"stat": "ok", "monitors": []})).await;
        let server = test_server(upstream.uri(), Some("secret"));

        let response = server.get("/api/monitor/99").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "monitor 99 not found");
    }

    #[tokio::test]
    async fn test_api_monitor_detail() {
        let upstream = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("monitors=5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "stat": "ok",
                "monitors": [{
                    "id": 5,
                    "friendly_name": "API",
                    "status": 2,
                    "custom_uptime_ratio": "100-99-98-97",
                    "logs": [{"type": 1, "datetime": 1000}, {"type": 2, "datetime": 1600}]
                }]
            })))
            .mount(&upstream)
            .await;
        let server = test_server(upstream.uri(), Some("secret"));

        let response = server.get("/api/monitor/5").await;
        response.assert_status(StatusCode::OK);
        let body: Value = response.json();
        assert_eq!(body["data"]["monitor"]["uptime_by_window"]["30"], 98.0);
        assert_eq!(body["data"]["events"][0]["duration_minutes"], 10);
        assert_eq!(body["data"]["events"][0]["duration_text"], "10 min");
    }

    #[tokio::test]
    async fn test_api_missing_key() {
        let server = test_server("http://127.0.0.1:9/unused".to_string(), None);

        let response = server.get("/api/monitors").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_api_upstream_failure() {
        let upstream = mock_upstream(json!({"stat": "fail", "error": {"message": "bad key"}})).await;
        let server = test_server(upstream.uri(), Some("secret"));

        let response = server.get("/api/monitors").await;
        response.assert_status(StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_dashboard_page_degrades_on_error() {
        let server = test_server("http://127.0.0.1:9/unused".to_string(), None);

        let response = server.get("/").await;
        response.assert_status(StatusCode::OK);
        assert!(response.text().contains("Unable to fetch monitor data"));
    }

    #[tokio::test]
    async fn test_dashboard_page_lists_monitors() {
        let upstream = mock_upstream(json!({
            "stat": "ok",
            "monitors": [{"id": 1, "friendly_name": "Homepage", "status": 9}]
        }))
        .await;
        let server = test_server(upstream.uri(), Some("secret"));

        let response = server.get("/").await;
        response.assert_status(StatusCode::OK);
        let html = response.text();
        assert!(html.contains("Homepage"));
        assert!(html.contains("badge-danger"));
    }

    #[tokio::test]
    async fn test_detail_page_not_found() {
        let upstream = mock_upstream(json!({"stat": "ok", "monitors": []})).await;
        let server = test_server(upstream.uri(), Some("secret"));

        let response = server.get("/monitor/404").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("Monitor not found"));
    }

    #[tokio::test]
    async fn test_unknown_route_and_assets() {
        let server = test_server("http://127.0.0.1:9/unused".to_string(), None);

        let response = server.get("/nope").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("Page not found"));

        let response = server.get("/static/status.js").await;
        response.assert_status(StatusCode::OK);
        assert!(response.header("content-type").to_str().unwrap().contains("javascript"));

        server.get("/static/missing.js").await.assert_status(StatusCode::NOT_FOUND);
        server.get("/favicon.ico").await.assert_status(StatusCode::OK);
    }
}
