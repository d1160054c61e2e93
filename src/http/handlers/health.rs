//! Liveness probe.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

/// `GET /healthz`
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}
