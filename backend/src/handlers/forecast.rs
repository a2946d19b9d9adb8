//! HTTP handler for the forecast endpoint

use axum::{extract::State, Json};
use shared::ForecastResponse;

use crate::error::AppResult;
use crate::middleware::{ValidatedCoordinate, ValidatedQuery};
use crate::services::ForecastService;
use crate::AppState;

/// `GET /v1/forecast?latitude=<float>&longitude=<float>`
pub async fn get_forecast(
    State(state): State<AppState>,
    ValidatedQuery(coordinate): ValidatedCoordinate,
) -> AppResult<Json<ForecastResponse>> {
    let service = ForecastService::new(state.provider);
    let forecast = service.current_forecast(coordinate).await?;
    Ok(Json(forecast))
}
