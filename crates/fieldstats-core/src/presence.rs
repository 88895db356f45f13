//! Presence aggregations.
//!
//! A presence aggregation is a `filters` aggregation with two named
//! buckets: documents where the field exists and documents where it does
//! not. The engine returns it as:
//!
//! ```json
//! { "buckets": { "present": { "doc_count": 7 }, "absent": { "doc_count": 3 } } }
//! ```

use serde::Deserialize;
use serde_json::value::RawValue;

use crate::error::FormatError;
use crate::models::FieldPercentSummary;
use crate::percent::percent;
use crate::PRESENT_PREFIX;

#[derive(Debug, Deserialize)]
struct PresenceAggregation {
    buckets: PresenceBuckets,
}

#[derive(Debug, Deserialize)]
struct PresenceBuckets {
    present: BucketCount,
    absent: BucketCount,
}

#[derive(Debug, Deserialize)]
struct BucketCount {
    doc_count: u64,
}

/// Decode a `present_<field>` aggregation into a [`FieldPercentSummary`].
///
/// The caller guarantees `key` starts with [`PRESENT_PREFIX`]; the prefix
/// is stripped to produce the field name.
pub fn parse_presence(key: &str, raw: &RawValue) -> Result<FieldPercentSummary, FormatError> {
    let agg: PresenceAggregation =
        serde_json::from_str(raw.get()).map_err(|source| FormatError::Presence {
            key: key.to_string(),
            source,
        })?;

    let present = agg.buckets.present.doc_count;
    let absent = agg.buckets.absent.doc_count;
    let total = present.saturating_add(absent);

    Ok(FieldPercentSummary {
        field: key.strip_prefix(PRESENT_PREFIX).unwrap_or(key).to_string(),
        count: present,
        absent_count: absent,
        percent: percent(present, total),
    })
}
