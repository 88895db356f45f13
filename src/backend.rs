//! Search execution.
//!
//! The [`SearchBackend`] trait is the seam between the HTTP layer and the
//! search engine. [`OpenSearchClient`] is the production implementation;
//! it is built once at startup and shared read-only by every request.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::OpenSearchConfig;
use crate::query::SearchRequest;

/// Failure to obtain a search response from the engine.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search engine returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Executes a search request and returns the raw response body.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> std::result::Result<String, BackendError>;
}

/// OpenSearch `_search` client for a single index.
pub struct OpenSearchClient {
    http: reqwest::Client,
    search_url: String,
    credentials: Option<(String, Option<String>)>,
}

impl OpenSearchClient {
    pub fn new(config: &OpenSearchConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .context("Failed to build OpenSearch HTTP client")?;

        let search_url = format!(
            "{}/{}/_search",
            config.address.trim_end_matches('/'),
            config.index
        );

        Ok(Self {
            http,
            search_url,
            credentials: config
                .username
                .clone()
                .map(|user| (user, config.password.clone())),
        })
    }

    pub fn search_url(&self) -> &str {
        &self.search_url
    }
}

#[async_trait]
impl SearchBackend for OpenSearchClient {
    async fn search(&self, request: &SearchRequest) -> std::result::Result<String, BackendError> {
        let mut builder = self.http.post(&self.search_url).json(&request.to_body());
        if let Some((user, password)) = &self.credentials {
            builder = builder.basic_auth(user, password.as_ref());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}
