//! TOML configuration.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0:8080"
//!
//! [opensearch]
//! address = "https://localhost:9200"
//! index = "dois"
//! accept_invalid_certs = true
//!
//! [query]
//! default_distribution_size = 10
//! ```
//!
//! `API_PORT`, `OPENSEARCH_HOST`, and `OPENSEARCH_INDEX` override the file
//! when set (see [`Config::apply_env`]).

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub opensearch: OpenSearchConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenSearchConfig {
    pub address: String,
    pub index: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Skip TLS certificate verification (self-signed development clusters).
    #[serde(default)]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    /// Every query is restricted to documents of this agency.
    #[serde(default = "default_agency")]
    pub agency: String,
    /// Every query is restricted to documents in this `aasm_state`.
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_distribution_size")]
    pub default_distribution_size: u64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            agency: default_agency(),
            state: default_state(),
            default_distribution_size: default_distribution_size(),
        }
    }
}

fn default_agency() -> String {
    "datacite".to_string()
}
fn default_state() -> String {
    "findable".to_string()
}
fn default_distribution_size() -> u64 {
    10
}

impl Config {
    /// Apply environment overrides from the given lookup function.
    ///
    /// `API_PORT` replaces the port of `server.bind` (binding all
    /// interfaces), `OPENSEARCH_HOST` replaces `opensearch.address`, and
    /// `OPENSEARCH_INDEX` replaces `opensearch.index`. Empty values are
    /// ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("API_PORT") {
            self.server.bind = format!("0.0.0.0:{}", port.trim());
        }
        if let Some(host) = get("OPENSEARCH_HOST") {
            self.opensearch.address = host;
        }
        if let Some(index) = get("OPENSEARCH_INDEX") {
            self.opensearch.index = index;
        }
    }

    fn validate(&self) -> Result<()> {
        if self.opensearch.address.trim().is_empty() {
            bail!("opensearch.address must not be empty");
        }
        if !self.opensearch.address.starts_with("http://")
            && !self.opensearch.address.starts_with("https://")
        {
            bail!(
                "opensearch.address must start with http:// or https://, got '{}'",
                self.opensearch.address
            );
        }
        if self.opensearch.index.trim().is_empty() {
            bail!("opensearch.index must not be empty");
        }
        if self.opensearch.timeout_secs == 0 {
            bail!("opensearch.timeout_secs must be > 0");
        }
        if self.opensearch.password.is_some() && self.opensearch.username.is_none() {
            bail!("opensearch.password requires opensearch.username");
        }
        if self.server.bind.trim().is_empty() {
            bail!("server.bind must not be empty");
        }
        Ok(())
    }
}

/// Parse and validate a configuration document.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;
    config.validate()?;
    Ok(config)
}

/// Load the config file at `path`, apply process environment overrides,
/// and validate the result.
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    config.apply_env(|name| std::env::var(name).ok());
    config.validate()?;

    Ok(config)
}
