//! Health check endpoint (no auth)

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "soulsync-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
