//! Value-distribution aggregations.
//!
//! A distribution aggregation is a `terms` aggregation returning the top-N
//! values of a field. Documents whose value fell outside the top N are
//! reported only as `sum_other_doc_count`:
//!
//! ```json
//! {
//!   "doc_count_error_upper_bound": 0,
//!   "sum_other_doc_count": 9,
//!   "buckets": [ { "key": "dataset", "doc_count": 1 } ]
//! }
//! ```
//!
//! Percentages are taken against the total *including* the overflow, so
//! the emitted values can sum to less than 100. The overflow itself is
//! never emitted as an entry.

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::FormatError;
use crate::models::{DistributionResult, DistributionValue};
use crate::percent::percent;
use crate::DISTRIBUTION_PREFIX;

#[derive(Debug, Deserialize)]
struct DistributionAggregation {
    sum_other_doc_count: u64,
    buckets: Vec<TermsBucket>,
}

#[derive(Debug, Deserialize)]
struct TermsBucket {
    key: String,
    doc_count: u64,
}

/// Decode a `distribution_<field>` aggregation into a [`DistributionResult`].
///
/// Bucket order is preserved as returned by the engine.
pub fn parse_distribution(key: &str, raw: &RawValue) -> Result<DistributionResult, FormatError> {
    let agg: DistributionAggregation =
        serde_json::from_str(raw.get()).map_err(|source| FormatError::Distribution {
            key: key.to_string(),
            source,
        })?;

    let total = agg
        .buckets
        .iter()
        .fold(agg.sum_other_doc_count, |acc, b| acc.saturating_add(b.doc_count));

    let values = agg
        .buckets
        .into_iter()
        .map(|b| DistributionValue {
            percent: percent(b.doc_count, total),
            value: b.key,
            count: b.doc_count,
        })
        .collect();

    Ok(DistributionResult {
        field: key
            .strip_prefix(DISTRIBUTION_PREFIX)
            .unwrap_or(key)
            .to_string(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(json: &str) -> Box<RawValue> {
        RawValue::from_string(json.to_string()).unwrap()
    }

    fn pairs(result: &DistributionResult) -> Vec<(&str, u8)> {
        result
            .values
            .iter()
            .map(|v| (v.value.as_str(), v.percent))
            .collect()
    }

    #[test]
    fn test_even_split_keeps_order() {
        let payload = raw(
            r#"{"doc_count_error_upper_bound":0,"sum_other_doc_count":0,
                "buckets":[{"key":"a","doc_count":5},{"key":"b","doc_count":5}]}"#,
        );
        let result = parse_distribution("distribution_types", &payload).unwrap();
        assert_eq!(result.field, "types");
        assert_eq!(pairs(&result), vec![("a", 50), ("b", 50)]);
    }

    #[test]
    fn test_other_count_only_in_denominator() {
        let payload = raw(
            r#"{"doc_count_error_upper_bound":0,"sum_other_doc_count":9,
                "buckets":[{"key":"a","doc_count":1}]}"#,
        );
        let result = parse_distribution("distribution_types", &payload).unwrap();
        assert_eq!(pairs(&result), vec![("a", 10)]);
        assert_eq!(result.values[0].count, 1);
    }

    #[test]
    fn test_engine_order_not_resorted() {
        let payload = raw(
            r#"{"sum_other_doc_count":0,
                "buckets":[{"key":"z","doc_count":1},{"key":"a","doc_count":3}]}"#,
        );
        let result = parse_distribution("distribution_language", &payload).unwrap();
        assert_eq!(pairs(&result), vec![("z", 25), ("a", 75)]);
    }

    #[test]
    fn test_no_buckets() {
        let payload = raw(r#"{"sum_other_doc_count":0,"buckets":[]}"#);
        let result = parse_distribution("distribution_language", &payload).unwrap();
        assert!(result.values.is_empty());
    }

    #[test]
    fn test_zero_counts() {
        let payload = raw(r#"{"sum_other_doc_count":0,"buckets":[{"key":"a","doc_count":0}]}"#);
        let result = parse_distribution("distribution_language", &payload).unwrap();
        assert_eq!(pairs(&result), vec![("a", 0)]);
    }

    #[test]
    fn test_non_string_key_rejected() {
        let payload = raw(r#"{"sum_other_doc_count":0,"buckets":[{"key":2020,"doc_count":1}]}"#);
        let err = parse_distribution("distribution_publicationYear", &payload).unwrap_err();
        assert_eq!(err.key(), Some("distribution_publicationYear"));
    }

    #[test]
    fn test_buckets_as_object_rejected() {
        let payload = raw(r#"{"sum_other_doc_count":0,"buckets":{"a":{"doc_count":1}}}"#);
        let err = parse_distribution("distribution_types", &payload).unwrap_err();
        assert!(matches!(err, FormatError::Distribution { .. }));
    }
}
