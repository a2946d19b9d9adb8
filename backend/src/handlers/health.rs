//! Health check handlers

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub message: String,
}

/// Health check endpoint handler
pub async fn health_check() -> Json<HealthResponse> {
    tracing::debug!("Checking health");

    Json(HealthResponse {
        message: "App is healthy".to_string(),
    })
}
