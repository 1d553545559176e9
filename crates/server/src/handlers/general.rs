//! # General Route Handlers
//!
//! Service info, health check and the browser test page.

use crate::types::ServiceInfo;
use axum::{response::Html, Json};

const ENDPOINTS: [&str; 6] = [
    "GET /",
    "GET /health",
    "POST /transcribe",
    "POST /analyze",
    "POST /process",
    "GET /test",
];

static TEST_PAGE: &str = include_str!("test_page.html");

/// The handler for the root (`/`) endpoint.
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        status: "ok",
        service: "inkwell",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS.to_vec(),
    })
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Serves a page that uploads a photo to `/process` and shows the answer.
pub async fn test_page() -> Html<&'static str> {
    Html(TEST_PAGE)
}
