//! National Weather Service API client
//!
//! Forecasts take two sequential calls: `/points/{lat},{lng}` resolves the
//! coordinate into a grid cell carrying its forecast URL, which is then
//! fetched for the ordered list of forecast periods.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use serde::{de::DeserializeOwned, Deserialize};
use shared::{Coordinate, ForecastResponse};
use std::time::Duration;
use tracing::{debug, info};

use super::{ForecastProvider, UpstreamError};
use crate::config::NwsConfig;

/// Period reported as current. The first period is often a partial slice
/// overlapping the present; the second is the first complete one.
pub const CURRENT_PERIOD_INDEX: usize = 1;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const MAX_ERROR_BODY: usize = 200;

/// NWS client with connection pooling and a fixed User-Agent
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: Client,
    base_url: String,
}

/// Grid cell resolved from a coordinate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridReference {
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
    pub forecast_url: String,
}

/// Ordered forecast periods for one grid cell
#[derive(Debug, Clone, Default)]
pub struct ForecastDocument {
    pub generated_at: Option<DateTime<FixedOffset>>,
    pub periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default)]
    pub number: u32,
    pub name: String,
    #[serde(default)]
    pub start_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub end_time: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub is_daytime: bool,
    pub temperature: i64,
    #[serde(default)]
    pub temperature_unit: String,
    pub short_forecast: String,
}

// ── NWS response types ───────────────────────────────────────────────

/// Response from `/points/{lat},{lng}`
#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointProperties {
    #[serde(default)]
    grid_id: String,
    #[serde(default)]
    grid_x: i64,
    #[serde(default)]
    grid_y: i64,
    #[serde(default)]
    forecast: Option<String>,
}

/// Response from `/gridpoints/{wfo}/{x},{y}/forecast`
#[derive(Debug, Deserialize)]
struct ForecastEnvelope {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastProperties {
    #[serde(default)]
    generated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    periods: Option<Vec<ForecastPeriod>>,
}

// ── Implementation ───────────────────────────────────────────────────

impl NwsClient {
    pub fn new(config: &NwsConfig) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/geo+json"));

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.timeout())
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout()))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn points_url(&self, coordinate: &Coordinate) -> String {
        format!("{}/points/{}", self.base_url, coordinate)
    }

    /// Resolve a coordinate into its grid cell and forecast URL
    pub async fn fetch_grid(&self, coordinate: &Coordinate) -> Result<GridReference, UpstreamError> {
        let url = self.points_url(coordinate);
        info!(url = %url, "nws grid request");

        let points: PointsResponse = self.fetch_document(&url, "grid").await?;
        let properties = points.properties;

        let forecast_url = properties
            .forecast
            .filter(|forecast| !forecast.trim().is_empty())
            .ok_or(UpstreamError::MissingForecastUrl { url })?;

        Ok(GridReference {
            grid_id: properties.grid_id,
            grid_x: properties.grid_x,
            grid_y: properties.grid_y,
            forecast_url,
        })
    }

    /// Fetch the forecast document a grid lookup pointed at
    pub async fn fetch_forecast(&self, url: &str) -> Result<ForecastDocument, UpstreamError> {
        info!(url, "nws forecast request");

        let envelope: ForecastEnvelope = self.fetch_document(url, "forecast").await?;

        Ok(ForecastDocument {
            generated_at: envelope.properties.generated_at,
            periods: envelope.properties.periods.unwrap_or_default(),
        })
    }

    async fn fetch_document<T: DeserializeOwned>(
        &self,
        url: &str,
        document: &'static str,
    ) -> Result<T, UpstreamError> {
        let request = self
            .client
            .get(url)
            .build()
            .map_err(|source| UpstreamError::RequestBuild {
                url: url.to_string(),
                source,
            })?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| UpstreamError::from_send(url, e))?;

        let status = response.status();
        let body = response.bytes().await.map_err(|source| {
            if source.is_timeout() {
                UpstreamError::Timeout {
                    url: url.to_string(),
                    source,
                }
            } else {
                UpstreamError::BodyRead {
                    url: url.to_string(),
                    source,
                }
            }
        })?;

        if !status.is_success() {
            return Err(UpstreamError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
                body: truncate_body(&String::from_utf8_lossy(&body)),
            });
        }

        serde_json::from_slice(&body).map_err(|source| UpstreamError::Decode {
            url: url.to_string(),
            document,
            source,
        })
    }
}

/// Pick the period reported as current.
///
/// An empty document is a hard failure; there is no fallback to another index.
pub fn select_current_period<'a>(
    document: &'a ForecastDocument,
    url: &str,
) -> Result<&'a ForecastPeriod, UpstreamError> {
    if document.periods.is_empty() {
        return Err(UpstreamError::EmptyForecast {
            url: url.to_string(),
        });
    }

    document
        .periods
        .get(CURRENT_PERIOD_INDEX)
        .ok_or_else(|| UpstreamError::MissingPeriod {
            url: url.to_string(),
            available: document.periods.len(),
            index: CURRENT_PERIOD_INDEX,
        })
}

#[async_trait]
impl ForecastProvider for NwsClient {
    fn name(&self) -> &'static str {
        "nws"
    }

    async fn forecast(&self, coordinate: &Coordinate) -> Result<ForecastResponse, UpstreamError> {
        let grid = self.fetch_grid(coordinate).await?;
        debug!(
            grid_id = %grid.grid_id,
            grid_x = grid.grid_x,
            grid_y = grid.grid_y,
            "resolved nws grid"
        );

        let document = self.fetch_forecast(&grid.forecast_url).await?;
        debug!(
            generated_at = ?document.generated_at,
            periods = document.periods.len(),
            "received nws forecast document"
        );
        let period = select_current_period(&document, &grid.forecast_url)?;

        let response = ForecastResponse::from_period(
            period.name.clone(),
            period.temperature,
            period.short_forecast.clone(),
        );

        info!(
            period = %response.period,
            temp = %response.temp,
            feels = %response.feels,
            forecast = %response.forecast,
            "returning nws forecast"
        );

        Ok(response)
    }
}

fn truncate_body(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY {
        format!("{}...", body.chars().take(MAX_ERROR_BODY).collect::<String>())
    } else {
        body.to_string()
    }
}
