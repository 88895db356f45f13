//! # fieldstats CLI
//!
//! ```bash
//! fieldstats --config ./config/fieldstats.toml serve
//! fieldstats --config ./config/fieldstats.toml query --present titles --distribution language
//! ```
//!
//! Logging is controlled with `RUST_LOG` (default `info`) and goes to
//! stderr, so `query` output on stdout stays machine-readable.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fieldstats::config;
use fieldstats::params::{RawStatsParams, StatsParams};
use fieldstats::server;
use fieldstats::stats;

/// fieldstats — field presence and value-distribution statistics over an
/// OpenSearch index.
#[derive(Parser)]
#[command(name = "fieldstats", version)]
struct Cli {
    /// Path to configuration file (TOML).
    #[arg(long, global = true, default_value = "./config/fieldstats.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve,

    /// Run a single stats query and print the JSON response.
    Query {
        /// Free-text query string.
        #[arg(long)]
        query: Option<String>,

        #[arg(long)]
        client_id: Option<String>,

        #[arg(long)]
        provider_id: Option<String>,

        /// Comma-separated fields for presence statistics.
        #[arg(long)]
        present: Option<String>,

        /// Comma-separated fields for value distributions.
        #[arg(long)]
        distribution: Option<String>,

        /// Number of values per distribution.
        #[arg(long)]
        distribution_size: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config(&cli.config)?;

    match cli.command {
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
        Commands::Query {
            query,
            client_id,
            provider_id,
            present,
            distribution,
            distribution_size,
        } => {
            let raw = RawStatsParams {
                query,
                client_id,
                provider_id,
                present,
                distribution,
                distribution_size: distribution_size.map(|n| n.to_string()),
            };
            let params = StatsParams::from_raw(raw, cfg.query.default_distribution_size);
            stats::run_query(&cfg, &params).await?;
        }
    }

    Ok(())
}
