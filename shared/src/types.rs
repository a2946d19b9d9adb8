//! Common types used across the service

use serde::{Deserialize, Serialize};
use std::fmt;

/// Geographic coordinates supplied by the caller.
///
/// Both components are finite; no range check is applied, the upstream
/// provider is the final arbiter of whether a point is forecastable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a coordinate from raw query values
    pub fn parse(latitude: &str, longitude: &str) -> Option<Self> {
        Some(Self::new(parse_finite(latitude)?, parse_finite(longitude)?))
    }
}

/// Formats as `lat,lng`, the shape the points endpoint expects
impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Parse a 64-bit float, rejecting NaN and the infinities
pub fn parse_finite(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
