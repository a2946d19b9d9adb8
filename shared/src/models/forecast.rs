//! Forecast response and comfort classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-facing categorization of a Fahrenheit temperature
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ComfortLabel {
    Freezing,
    Cold,
    Cool,
    Moderate,
    Warm,
    Hot,
    Boiling,
}

impl ComfortLabel {
    /// All labels, coldest first
    pub const ALL: [ComfortLabel; 7] = [
        ComfortLabel::Freezing,
        ComfortLabel::Cold,
        ComfortLabel::Cool,
        ComfortLabel::Moderate,
        ComfortLabel::Warm,
        ComfortLabel::Hot,
        ComfortLabel::Boiling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComfortLabel::Freezing => "freezing",
            ComfortLabel::Cold => "cold",
            ComfortLabel::Cool => "cool",
            ComfortLabel::Moderate => "moderate",
            ComfortLabel::Warm => "warm",
            ComfortLabel::Hot => "hot",
            ComfortLabel::Boiling => "boiling",
        }
    }
}

impl fmt::Display for ComfortLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a Fahrenheit temperature.
///
/// Intervals are half-open and evaluated in order, so a boundary value
/// belongs to the warmer bucket (33 is `cold`, not `freezing`).
pub fn classify(temp_fahrenheit: i64) -> ComfortLabel {
    match temp_fahrenheit {
        t if t < 33 => ComfortLabel::Freezing,
        t if t < 60 => ComfortLabel::Cold,
        t if t < 70 => ComfortLabel::Cool,
        t if t < 80 => ComfortLabel::Moderate,
        t if t < 95 => ComfortLabel::Warm,
        t if t < 105 => ComfortLabel::Hot,
        _ => ComfortLabel::Boiling,
    }
}

/// Simplified forecast returned by `GET /v1/forecast`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastResponse {
    pub period: String,
    /// Temperature, string-encoded on the wire
    pub temp: String,
    pub feels: ComfortLabel,
    pub forecast: String,
}

impl ForecastResponse {
    /// Build a response from a period's name, temperature and short forecast
    pub fn from_period(
        name: impl Into<String>,
        temperature: i64,
        short_forecast: impl Into<String>,
    ) -> Self {
        Self {
            period: name.into(),
            temp: temperature.to_string(),
            feels: classify(temperature),
            forecast: short_forecast.into(),
        }
    }
}
