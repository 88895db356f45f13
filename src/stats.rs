//! Field statistics: execute the aggregation search and shape the result.
//!
//! Used by both the `fieldstats query` CLI command and the `GET /` HTTP
//! endpoint.

use anyhow::Result;
use fieldstats_core::assemble::assemble;
use fieldstats_core::error::FormatError;
use fieldstats_core::models::ApiResponse;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::backend::{BackendError, OpenSearchClient, SearchBackend};
use crate::config::Config;
use crate::params::StatsParams;
use crate::query::SearchRequest;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error(transparent)]
    Search(#[from] BackendError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

/// The part of a `_search` response this service reads.
#[derive(Deserialize)]
struct SearchResponse<'a> {
    #[serde(borrow, default)]
    aggregations: Option<&'a RawValue>,
}

/// Shape a raw `_search` response body into an [`ApiResponse`].
///
/// A response without `aggregations` (nothing was requested) yields an
/// empty response.
pub fn format_search_response(body: &str) -> Result<ApiResponse, FormatError> {
    let response: SearchResponse<'_> =
        serde_json::from_str(body).map_err(FormatError::Aggregations)?;

    match response.aggregations {
        Some(aggs) => assemble(aggs),
        None => Ok(ApiResponse::default()),
    }
}

/// Run `request` against `backend` and shape the response.
pub async fn collect_stats(
    backend: &dyn SearchBackend,
    request: &SearchRequest,
) -> Result<ApiResponse, StatsError> {
    let body = backend.search(request).await?;
    let response = format_search_response(&body)?;

    tracing::debug!(
        present = response.present.len(),
        distribution = response.distribution.len(),
        "formatted aggregation response"
    );

    Ok(response)
}

/// CLI entry point: run one stats query and print the JSON response.
pub async fn run_query(config: &Config, params: &StatsParams) -> Result<()> {
    let client = OpenSearchClient::new(&config.opensearch)?;
    let request = params.search_request(&config.query);
    let response = collect_stats(&client, &request).await?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
