//! Error handling for the weather forecast service
//!
//! Validation failures become a structured 400; everything else collapses to
//! a 500 with a generic message while the cause goes to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ValidationErrors;
use thiserror::Error;

use crate::external::UpstreamError;

/// Body of every 500 caused by the upstream provider
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Forecast service unavailable";

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => {
                tracing::debug!(?errors, "rejected query parameters");
                (StatusCode::BAD_REQUEST, Json(errors)).into_response()
            }
            AppError::Upstream(err) => {
                tracing::error!(
                    kind = err.kind(),
                    url = err.url(),
                    error = %err,
                    "forecast request failed"
                );
                (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_MESSAGE).into_response()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
