//! Serves the OpenAPI document for the service

use axum::{
    extract::State,
    http::{
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
        StatusCode,
    },
    response::{IntoResponse, Response},
};

use crate::AppState;

/// `GET /doc`, the API description as a YAML download
pub async fn get_doc(State(state): State<AppState>) -> Response {
    match tokio::fs::read(&state.config.server.doc_path).await {
        Ok(contents) => (
            [
                (CONTENT_TYPE, "application/x-yaml"),
                (CONTENT_DISPOSITION, "attachment; filename=weather_app.yaml"),
            ],
            contents,
        )
            .into_response(),
        Err(err) => {
            tracing::warn!(path = %state.config.server.doc_path, error = %err, "doc not readable");
            (StatusCode::NOT_FOUND, "File not found").into_response()
        }
    }
}
