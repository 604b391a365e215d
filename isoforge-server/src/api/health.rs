//! Health Check API Handler
//!
//! Liveness endpoint for monitoring; answers as long as the server runs,
//! without touching the image store.

use axum::{http::StatusCode, response::IntoResponse};

/// GET /health
/// Liveness probe
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
