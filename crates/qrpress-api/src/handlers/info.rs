//! Service descriptor endpoint.

use axum::{response::IntoResponse, Json};

/// Returns the service name, version, and endpoint listing.
pub async fn service_info() -> impl IntoResponse {
    Json(serde_json::json!({
        "service": "qrpress",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /": "service descriptor",
            "GET /health": "health check",
            "GET /generate": "generate a QR code (query: content, size)",
            "POST /generate": "generate a QR code (body: payload; query: size)",
        },
    }))
}
