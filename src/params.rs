//! Request parameters for the stats endpoint.
//!
//! | Parameter | Meaning |
//! |-----------|---------|
//! | `query` | Free-text `query_string` filter |
//! | `client_id` | Restrict to one client |
//! | `provider_id` | Restrict to one provider |
//! | `present` | Comma-separated fields for presence aggregations |
//! | `distribution` | Comma-separated fields for distribution aggregations |
//! | `distribution_size` | Top-N values per distribution (default from config) |

use serde::Deserialize;

use crate::config::QueryConfig;
use crate::query::{base_query, distribution_aggregation, presence_aggregation, Scope, SearchRequest};

/// Query string exactly as received; every parameter is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatsParams {
    pub query: Option<String>,
    pub client_id: Option<String>,
    pub provider_id: Option<String>,
    pub present: Option<String>,
    pub distribution: Option<String>,
    pub distribution_size: Option<String>,
}

/// Normalized parameters for one stats request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsParams {
    pub query: String,
    pub client_id: String,
    pub provider_id: String,
    pub present: Vec<String>,
    pub distribution: Vec<String>,
    pub distribution_size: u64,
}

impl StatsParams {
    pub fn from_raw(raw: RawStatsParams, default_distribution_size: u64) -> Self {
        Self {
            query: raw.query.unwrap_or_default(),
            client_id: raw.client_id.unwrap_or_default(),
            provider_id: raw.provider_id.unwrap_or_default(),
            present: split_fields(raw.present.as_deref().unwrap_or("")),
            distribution: split_fields(raw.distribution.as_deref().unwrap_or("")),
            distribution_size: parse_size(
                raw.distribution_size.as_deref(),
                default_distribution_size,
            ),
        }
    }

    pub fn scope(&self) -> Scope<'_> {
        Scope {
            query: &self.query,
            client_id: &self.client_id,
            provider_id: &self.provider_id,
        }
    }

    /// Base query plus one aggregation per requested field.
    pub fn search_request(&self, config: &QueryConfig) -> SearchRequest {
        base_query(config, &self.scope())
            .aggs(self.present.iter().map(|f| presence_aggregation(f)))
            .aggs(
                self.distribution
                    .iter()
                    .map(|f| distribution_aggregation(f, self.distribution_size)),
            )
    }
}

/// Split a comma-separated field list, dropping empty entries.
pub fn split_fields(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse an unsigned size, falling back to `default` when the value is
/// missing, empty, or not a valid unsigned integer.
pub fn parse_size(value: Option<&str>, default: u64) -> u64 {
    match value {
        Some(v) if !v.is_empty() => v.parse().unwrap_or(default),
        _ => default,
    }
}
