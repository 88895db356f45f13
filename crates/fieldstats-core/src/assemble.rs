//! Response assembly.
//!
//! Walks the engine's `aggregations` object, classifies each key by name
//! prefix, and dispatches to the matching parser. Assembly is
//! all-or-nothing: the first malformed aggregation aborts the pass and
//! no partial response is returned.
//!
//! Keys are visited in lexical order, so output lists are sorted by field
//! name and identical across runs.

use std::collections::BTreeMap;

use serde_json::value::RawValue;

use crate::distribution::parse_distribution;
use crate::error::FormatError;
use crate::models::ApiResponse;
use crate::presence::parse_presence;
use crate::{DISTRIBUTION_PREFIX, PRESENT_PREFIX};

/// Kind of aggregation, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationKind {
    Presence,
    Distribution,
}

impl AggregationKind {
    /// Classify an aggregation key, or `None` for keys this service did not
    /// request.
    pub fn classify(key: &str) -> Option<Self> {
        if key.starts_with(PRESENT_PREFIX) {
            Some(AggregationKind::Presence)
        } else if key.starts_with(DISTRIBUTION_PREFIX) {
            Some(AggregationKind::Distribution)
        } else {
            None
        }
    }
}

/// Assemble an [`ApiResponse`] from the raw `aggregations` object.
pub fn assemble(aggregations: &RawValue) -> Result<ApiResponse, FormatError> {
    let aggs: BTreeMap<String, &RawValue> =
        serde_json::from_str(aggregations.get()).map_err(FormatError::Aggregations)?;

    let mut response = ApiResponse::default();

    for (key, value) in aggs {
        match AggregationKind::classify(&key) {
            Some(AggregationKind::Presence) => {
                response.present.push(parse_presence(&key, value)?);
            }
            Some(AggregationKind::Distribution) => {
                response.distribution.push(parse_distribution(&key, value)?);
            }
            // Not requested by this service.
            None => {}
        }
    }

    Ok(response)
}

/// Convenience wrapper over [`assemble`] for an `aggregations` document
/// held as text.
pub fn assemble_str(aggregations: &str) -> Result<ApiResponse, FormatError> {
    let raw: &RawValue = serde_json::from_str(aggregations).map_err(FormatError::Aggregations)?;
    assemble(raw)
}
