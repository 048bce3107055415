//! Liveness endpoint.

use axum::{response::IntoResponse, Json};
use serde::Serialize;

/// Fixed health check payload.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Reports service liveness.
///
/// Always returns 200 with a fixed body regardless of configuration; the
/// service has no external dependencies to probe.
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
