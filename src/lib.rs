//! # fieldstats
//!
//! An HTTP service reporting how completely a document index fills in its
//! metadata fields: for each requested field, the share of documents in
//! which it is present, and the distribution of its most common values.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌─────────────┐   ┌────────────┐   ┌──────────────────┐
//! │  HTTP /  │──▶│ StatsParams │──▶│ OpenSearch │──▶│ fieldstats-core  │
//! │   CLI    │   │ → query DSL │   │  _search   │   │ assemble → JSON  │
//! └──────────┘   └─────────────┘   └────────────┘   └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! fieldstats --config ./config/fieldstats.toml serve
//! curl 'http://localhost:8080/?present=titles,creators&distribution=language'
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing and env overrides |
//! | [`params`] | Query-string parameters |
//! | [`query`] | OpenSearch request construction |
//! | [`backend`] | Search execution ([`backend::SearchBackend`]) |
//! | [`stats`] | Search + response shaping |
//! | [`server`] | HTTP server |

pub mod backend;
pub mod config;
pub mod params;
pub mod query;
pub mod server;
pub mod stats;
