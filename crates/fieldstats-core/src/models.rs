//! Response types returned to the HTTP caller.
//!
//! Field names match the wire contract exactly, including the capitalized
//! `Values` key on distribution entries, which existing clients depend on.

use serde::Serialize;

/// Presence summary for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPercentSummary {
    /// Field name with the `present_` prefix removed.
    pub field: String,
    /// Documents in which the field exists.
    pub count: u64,
    /// Documents in which the field is missing.
    pub absent_count: u64,
    /// `count` as a whole percentage of `count + absent_count`.
    pub percent: u8,
}

/// One value of a distribution and its share of all matching documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionValue {
    pub value: String,
    pub count: u64,
    pub percent: u8,
}

/// Top values for a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistributionResult {
    /// Field name with the `distribution_` prefix removed.
    pub field: String,
    /// One entry per engine bucket, in engine order.
    #[serde(rename = "Values")]
    pub values: Vec<DistributionValue>,
}

/// The complete response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiResponse {
    pub present: Vec<FieldPercentSummary>,
    pub distribution: Vec<DistributionResult>,
}

impl ApiResponse {
    pub fn is_empty(&self) -> bool {
        self.present.is_empty() && self.distribution.is_empty()
    }
}
