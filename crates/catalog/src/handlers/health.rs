//! Health check endpoints.
//!
//! - `/livez` - Basic liveness probe (immediate 200, no checks)
//! - `/healthz` - Health payload for readiness checks

use axum::{http::StatusCode, response::IntoResponse, Json};

/// GET /livez - Basic liveness probe.
///
/// Returns 200 immediately. Used to check if the server is accepting
/// connections.
pub async fn livez() -> StatusCode {
    StatusCode::OK
}

/// GET /healthz - Health payload.
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
