//! Comfort classification and parameter validation properties

use proptest::prelude::*;
use shared::{classify, forecast_search_rules, is_finite_float, ComfortLabel, ForecastResponse};
use std::collections::HashMap;

/// Upper bounds (exclusive) of each bucket, coldest first
const THRESHOLDS: [(i64, ComfortLabel); 6] = [
    (33, ComfortLabel::Freezing),
    (60, ComfortLabel::Cold),
    (70, ComfortLabel::Cool),
    (80, ComfortLabel::Moderate),
    (95, ComfortLabel::Warm),
    (105, ComfortLabel::Hot),
];

fn reference_label(temp: i64) -> ComfortLabel {
    THRESHOLDS
        .iter()
        .find(|(bound, _)| temp < *bound)
        .map(|(_, label)| *label)
        .unwrap_or(ComfortLabel::Boiling)
}

#[test]
fn test_each_boundary_starts_the_next_bucket() {
    let mut labels = ComfortLabel::ALL.iter();
    let mut previous = *labels.next().unwrap();

    for ((bound, below), next) in THRESHOLDS.iter().zip(labels) {
        assert_eq!(classify(bound - 1), *below);
        assert_eq!(classify(*bound), *next);
        assert_eq!(*below, previous);
        previous = *next;
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn prop_classify_matches_threshold_table(temp in -200i64..300i64) {
        prop_assert_eq!(classify(temp), reference_label(temp));
    }

    #[test]
    fn prop_classify_is_total(temp in any::<i64>()) {
        prop_assert!(ComfortLabel::ALL.contains(&classify(temp)));
    }

    #[test]
    fn prop_classify_is_monotonic(a in -500i64..500i64, b in -500i64..500i64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify(low) <= classify(high));
    }

    #[test]
    fn prop_temp_is_decimal_string(temp in -100i64..200i64) {
        let response = ForecastResponse::from_period("Today", temp, "Sunny");
        prop_assert_eq!(response.temp.parse::<i64>().unwrap(), temp);
        prop_assert_eq!(response.feels, classify(temp));
    }

    #[test]
    fn prop_finite_floats_validate(lat in -90.0f64..90.0, lng in -180.0f64..180.0) {
        let query: HashMap<String, String> = [
            ("latitude".to_string(), lat.to_string()),
            ("longitude".to_string(), lng.to_string()),
        ]
        .into_iter()
        .collect();
        prop_assert!(forecast_search_rules().validate(&query).is_ok());
    }

    #[test]
    fn prop_alphabetic_values_are_invalid(value in "[g-zG-Z]{1,12}") {
        prop_assert!(!is_finite_float(&value));
    }
}
