//! HTTP handlers

mod doc;
mod forecast;
mod health;

pub use doc::get_doc;
pub use forecast::get_forecast;
pub use health::{health_check, HealthResponse};
