//! Request middleware and extractors

pub mod query;

pub use query::{ValidatedCoordinate, ValidatedQuery};
