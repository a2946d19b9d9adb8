//! External forecast providers
//!
//! Handlers depend only on [`ForecastProvider`]; each upstream service gets
//! its own adapter module.

pub mod nws;

use async_trait::async_trait;
use shared::{Coordinate, ForecastResponse};
use std::fmt::Debug;
use thiserror::Error;

pub use nws::NwsClient;

/// Capability to resolve a coordinate into the current forecast
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Short provider name used in logs
    fn name(&self) -> &'static str;

    async fn forecast(&self, coordinate: &Coordinate) -> Result<ForecastResponse, UpstreamError>;
}

/// Failures talking to an upstream provider.
///
/// Every variant becomes a 500 at the HTTP boundary; the variant itself is
/// only for logs.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("failed to build request for {url}: {source}")]
    RequestBuild {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} timed out")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to send request to {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}: {body}")]
    UnexpectedStatus {
        url: String,
        status: u16,
        body: String,
    },

    #[error("failed to read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode {document} document from {url}: {source}")]
    Decode {
        url: String,
        document: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("grid lookup at {url} returned no forecast URL")]
    MissingForecastUrl { url: String },

    #[error("forecast document from {url} contains no periods")]
    EmptyForecast { url: String },

    #[error("forecast document from {url} has {available} period(s), period {index} required")]
    MissingPeriod {
        url: String,
        available: usize,
        index: usize,
    },
}

impl UpstreamError {
    /// Stable identifier for the failure stage
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::RequestBuild { .. } => "request_build",
            UpstreamError::Timeout { .. } => "timeout",
            UpstreamError::Transport { .. } => "transport",
            UpstreamError::UnexpectedStatus { .. } => "unexpected_status",
            UpstreamError::BodyRead { .. } => "body_read",
            UpstreamError::Decode { .. } => "decode",
            UpstreamError::MissingForecastUrl { .. } => "missing_forecast_url",
            UpstreamError::EmptyForecast { .. } => "empty_forecast",
            UpstreamError::MissingPeriod { .. } => "missing_period",
        }
    }

    /// URL of the request that failed
    pub fn url(&self) -> &str {
        match self {
            UpstreamError::RequestBuild { url, .. }
            | UpstreamError::Timeout { url, .. }
            | UpstreamError::Transport { url, .. }
            | UpstreamError::UnexpectedStatus { url, .. }
            | UpstreamError::BodyRead { url, .. }
            | UpstreamError::Decode { url, .. }
            | UpstreamError::MissingForecastUrl { url }
            | UpstreamError::EmptyForecast { url }
            | UpstreamError::MissingPeriod { url, .. } => url,
        }
    }

    /// Classify a reqwest failure raised while sending
    pub(crate) fn from_send(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            UpstreamError::Timeout { url, source }
        } else if source.is_builder() {
            UpstreamError::RequestBuild { url, source }
        } else {
            UpstreamError::Transport { url, source }
        }
    }
}
