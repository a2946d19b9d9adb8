//! Query parameter validation
//!
//! Runs a route's rule set before the handler and hands it a typed value,
//! so nothing downstream reads raw query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::{request::Parts, Uri},
};
use shared::{Coordinate, QuerySchema};
use std::collections::HashMap;

use crate::error::AppError;

/// Extractor for query parameters that passed their schema's rules
#[derive(Debug, Clone, Copy)]
pub struct ValidatedQuery<T>(pub T);

/// Latitude and longitude of the forecast route
pub type ValidatedCoordinate = ValidatedQuery<Coordinate>;

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidatedQuery<T>
where
    S: Send + Sync,
    T: QuerySchema + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = first_values(&parts.uri);
        T::rules().validate(&params)?;

        T::from_query(&params)
            .map(ValidatedQuery)
            .ok_or_else(|| AppError::Internal("validated query could not be converted".to_string()))
    }
}

/// Decode the query string, keeping the first value of a repeated parameter.
///
/// An undecodable query string is treated as empty so the rule set reports
/// the missing parameters.
fn first_values(uri: &Uri) -> HashMap<String, String> {
    let pairs = match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "undecodable query string");
            Vec::new()
        }
    };

    let mut params = HashMap::with_capacity(pairs.len());
    for (name, value) in pairs {
        params.entry(name).or_insert(value);
    }
    params
}
