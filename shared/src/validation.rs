//! Query parameter validation
//!
//! A route declares a [`QueryParamRules`] set; every rule is checked before the
//! handler runs and failures are collected per parameter.

use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

use crate::types::{parse_finite, Coordinate};

pub const LATITUDE_PARAM: &str = "latitude";
pub const LONGITUDE_PARAM: &str = "longitude";

/// Predicate applied to a present, non-empty parameter value
pub type ValueValidator = fn(&str) -> bool;

/// Rule for a single query parameter
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryParamRule {
    pub required: bool,
    pub validator: Option<ValueValidator>,
}

impl QueryParamRule {
    pub fn required(validator: ValueValidator) -> Self {
        Self {
            required: true,
            validator: Some(validator),
        }
    }

    pub fn optional(validator: ValueValidator) -> Self {
        Self {
            required: false,
            validator: Some(validator),
        }
    }
}

/// Why a parameter was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    Required,
    Invalid,
}

impl ParamError {
    pub fn message(&self) -> &'static str {
        match self {
            ParamError::Required => "This parameter is required",
            ParamError::Invalid => "Invalid value for this parameter",
        }
    }
}

impl Serialize for ParamError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.message())
    }
}

/// Per-parameter failures, serialized as `{"errors": {"<param>": "<message>"}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} query parameter(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, ParamError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, param: &str) -> Option<ParamError> {
        self.errors.get(param).copied()
    }

    pub fn insert(&mut self, param: impl Into<String>, error: ParamError) {
        self.errors.insert(param.into(), error);
    }
}

/// The rule set for one route
#[derive(Debug, Clone, Default)]
pub struct QueryParamRules {
    rules: Vec<(String, QueryParamRule)>,
}

impl QueryParamRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, param: impl Into<String>, rule: QueryParamRule) -> Self {
        self.rules.push((param.into(), rule));
        self
    }

    /// Check every declared rule against the request's query parameters.
    ///
    /// An absent parameter and an empty one are treated alike.
    pub fn validate(&self, query: &HashMap<String, String>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        for (param, rule) in &self.rules {
            let value = query.get(param).map(String::as_str).unwrap_or("");

            if value.is_empty() {
                if rule.required {
                    errors.insert(param.clone(), ParamError::Required);
                }
            } else if let Some(validator) = rule.validator {
                if !validator(value) {
                    errors.insert(param.clone(), ParamError::Invalid);
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A typed value built from query parameters that passed its rule set
pub trait QuerySchema: Sized {
    fn rules() -> QueryParamRules;

    /// Build the value; only called after [`QuerySchema::rules`] passed
    fn from_query(query: &HashMap<String, String>) -> Option<Self>;
}

/// Validator: parses as a finite 64-bit float
pub fn is_finite_float(value: &str) -> bool {
    parse_finite(value).is_some()
}

/// Rules for the forecast search route
pub fn forecast_search_rules() -> QueryParamRules {
    QueryParamRules::new()
        .rule(LATITUDE_PARAM, QueryParamRule::required(is_finite_float))
        .rule(LONGITUDE_PARAM, QueryParamRule::required(is_finite_float))
}

impl QuerySchema for Coordinate {
    fn rules() -> QueryParamRules {
        forecast_search_rules()
    }

    fn from_query(query: &HashMap<String, String>) -> Option<Self> {
        Coordinate::parse(query.get(LATITUDE_PARAM)?, query.get(LONGITUDE_PARAM)?)
    }
}
