//! Forecast resolution
//!
//! Takes an already-validated coordinate through the configured provider.
//! Any provider failure aborts the request; there are no retries.

use shared::{Coordinate, ForecastResponse};
use std::sync::Arc;

use crate::error::AppResult;
use crate::external::ForecastProvider;

/// Forecast service wrapping the active provider
#[derive(Clone)]
pub struct ForecastService {
    provider: Arc<dyn ForecastProvider>,
}

impl ForecastService {
    pub fn new(provider: Arc<dyn ForecastProvider>) -> Self {
        Self { provider }
    }

    /// Resolve the current forecast period for a coordinate
    pub async fn current_forecast(&self, coordinate: Coordinate) -> AppResult<ForecastResponse> {
        tracing::debug!(
            provider = self.provider.name(),
            %coordinate,
            "resolving forecast"
        );

        let forecast = self.provider.forecast(&coordinate).await?;
        Ok(forecast)
    }
}
