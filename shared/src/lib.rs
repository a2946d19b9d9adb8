//! Shared types for the weather forecast service
//!
//! Pure domain logic with no I/O: coordinates, comfort classification,
//! the forecast payload and query parameter validation.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
