//! HTTP server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Field presence and value-distribution statistics |
//! | `GET`  | `/health` | Health check (returns version) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "format_error", "message": "unmarshal present aggregation present_titles: ..." } }
//! ```
//!
//! Error codes: `search_failed` (502), `format_error` (500).
//!
//! # CORS
//!
//! All origins, methods, and headers are permitted so browser dashboards
//! can call the API directly.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use fieldstats_core::models::ApiResponse;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::backend::{OpenSearchClient, SearchBackend};
use crate::config::{Config, QueryConfig};
use crate::params::{RawStatsParams, StatsParams};
use crate::stats::{collect_stats, StatsError};

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
struct AppState {
    query: Arc<QueryConfig>,
    backend: Arc<dyn SearchBackend>,
}

/// Starts the HTTP server against the configured OpenSearch cluster.
///
/// The OpenSearch client is built once here and shared by all requests.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let backend = Arc::new(OpenSearchClient::new(&config.opensearch)?);
    tracing::info!(url = backend.search_url(), "OpenSearch client initialized");
    run_server_with_backend(config, backend).await
}

/// Starts the HTTP server with an arbitrary [`SearchBackend`].
pub async fn run_server_with_backend(
    config: &Config,
    backend: Arc<dyn SearchBackend>,
) -> anyhow::Result<()> {
    let app = router(config.query.clone(), backend);

    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("fieldstats listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router.
pub fn router(query: QueryConfig, backend: Arc<dyn SearchBackend>) -> Router {
    let state = AppState {
        query: Arc::new(query),
        backend,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_stats))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

/// Internal error type that converts into an Axum HTTP response.
struct AppError {
    status: StatusCode,
    code: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code.to_string(),
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        match err {
            StatsError::Search(e) => {
                tracing::error!(error = %e, "search failed");
                AppError {
                    status: StatusCode::BAD_GATEWAY,
                    code: "search_failed",
                    message: e.to_string(),
                }
            }
            StatsError::Format(e) => {
                tracing::error!(error = %e, key = e.key(), "malformed aggregation response");
                AppError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    code: "format_error",
                    message: e.to_string(),
                }
            }
        }
    }
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============ GET / ============

/// Handler for `GET /`.
///
/// Builds one aggregation per requested field, runs a single search, and
/// returns the shaped response. Any backend or decode failure fails the
/// whole request; no partial response is ever returned.
async fn handle_stats(
    State(state): State<AppState>,
    Query(raw): Query<RawStatsParams>,
) -> Result<Json<ApiResponse>, AppError> {
    let params = StatsParams::from_raw(raw, state.query.default_distribution_size);
    tracing::debug!(
        present = ?params.present,
        distribution = ?params.distribution,
        size = params.distribution_size,
        "stats request"
    );

    let request = params.search_request(&state.query);
    let response = collect_stats(state.backend.as_ref(), &request).await?;

    Ok(Json(response))
}
