//! HTTP request handlers.

use super::views::{DetailPage, ErrorPage, IndexPage};
use super::AppState;
use crate::service::DashboardError;

use askama::Template;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use chrono::Utc;
use rust_embed::RustEmbed;
use serde::Serialize;

// ============================================================================
// Pages
// ============================================================================

pub async fn handle_dashboard(State(state): State<AppState>) -> Response {
    let now = Utc::now();
    match state.dashboard.list_monitors().await {
        Ok(monitors) => render(&IndexPage::new(&monitors, now), StatusCode::OK),
        Err(e) => {
            tracing::error!("Error fetching monitor data: {}", e);
            let mut page = IndexPage::new(&[], now);
            page.error = "Unable to fetch monitor data".to_string();
            render(&page, StatusCode::OK)
        }
    }
}

pub async fn handle_monitor_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let now = Utc::now();
    match state.dashboard.monitor_detail(&id).await {
        Ok(report) => render(&DetailPage::new(&report, now), StatusCode::OK),
        Err(DashboardError::NotFound(_)) => {
            tracing::info!("Monitor {} not found", id);
            render(&ErrorPage::new("Monitor not found", now), StatusCode::NOT_FOUND)
        }
        Err(e) => {
            tracing::error!("Error fetching monitor detail for {}: {}", id, e);
            render(&ErrorPage::new("Unable to fetch monitor details", now), StatusCode::OK)
        }
    }
}

pub async fn handle_not_found() -> Response {
    render(&ErrorPage::new("Page not found", Utc::now()), StatusCode::NOT_FOUND)
}

fn render<T: Template>(page: &T, status: StatusCode) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template rendering failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
        }
    }
}

// ============================================================================
// API
// ============================================================================

/// `{success, data | error}` envelope for the JSON surface.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        Json(ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        })
        .into_response()
    }
}

fn api_error(e: DashboardError) -> Response {
    let status = match &e {
        DashboardError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DashboardError::UpstreamUnavailable(_) => StatusCode::BAD_GATEWAY,
        DashboardError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
        DashboardError::NotFound(_) => StatusCode::NOT_FOUND,
    };

    if status.is_server_error() {
        tracing::error!("API request failed: {}", e);
    }

    let body = ApiResponse::<()> {
        success: false,
        data: None,
        error: Some(e.to_string()),
    };
    (status, Json(body)).into_response()
}

pub async fn handle_get_monitors(State(state): State<AppState>) -> Response {
    match state.dashboard.list_monitors().await {
        Ok(monitors) => ApiResponse::ok(monitors),
        Err(e) => api_error(e),
    }
}

pub async fn handle_get_monitor(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.dashboard.monitor_detail(&id).await {
        Ok(report) => ApiResponse::ok(report),
        Err(e) => api_error(e),
    }
}

// ============================================================================
// Static Assets
// ============================================================================

#[derive(RustEmbed)]
#[folder = "static/"]
struct Assets;

pub async fn handle_static(Path(path): Path<String>) -> Response {
    match Assets::get(&path) {
        Some(content) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                [
                    (header::CONTENT_TYPE, mime.as_ref().to_string()),
                    (header::CACHE_CONTROL, "no-cache".to_string()),
                ],
                Body::from(content.data.into_owned()),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub async fn handle_favicon() -> impl IntoResponse {
    // Return a simple SVG favicon
    let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100">
        <circle cx="50" cy="50" r="45" fill="#3bd671"/>
        <path d="M25 52 L42 68 L75 34" stroke="white" stroke-width="8" fill="none"/>
    </svg>"##;

    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}
