//! Route definitions for the weather forecast service

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create versioned API routes
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/forecast", get(handlers::get_forecast))
}
