//! Business logic services for the weather forecast service

pub mod forecast;

pub use forecast::ForecastService;
