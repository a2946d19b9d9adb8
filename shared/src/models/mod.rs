//! Domain models for the forecast service

mod forecast;

pub use forecast::*;
