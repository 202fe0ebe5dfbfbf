//! Runtime configuration.
//!
//! Defaults are usable as-is; [`Config::from_env`] overlays `OPTION_INCOME_*`
//! environment variables and the CLI overrides individual fields on top.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "OPTION_INCOME_";

/// Smallest top-N the UI accepts.
pub const MIN_TOP_N: usize = 5;
/// Largest top-N the UI accepts.
pub const MAX_TOP_N: usize = 100;
/// Top-N input step.
pub const TOP_N_STEP: usize = 5;

/// Market-data provider settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the Yahoo Finance query host.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ProviderConfig {
    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

/// UI defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Symbol prefilled in the ticker input.
    pub default_symbol: String,
    /// Rows shown per expiry table.
    pub default_top_n: usize,
    /// Expiries preselected when the user has not chosen any.
    pub default_expiry_count: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_symbol: "AAPL".to_string(),
            default_top_n: 25,
            default_expiry_count: 3,
        }
    }
}

/// Complete configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Provider settings.
    pub provider: ProviderConfig,
    /// Server settings.
    pub server: ServerConfig,
    /// UI defaults.
    pub display: DisplayConfig,
}

impl Config {
    /// Defaults overlaid with `OPTION_INCOME_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a numeric variable does not parse or is out
    /// of range.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(format!("{ENV_PREFIX}{name}")).ok())
    }

    /// Defaults overlaid with values from `lookup`, keyed without prefix.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` on unparseable or out-of-range values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("BASE_URL") {
            config.provider.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(secs) = lookup("TIMEOUT_SECS") {
            config.provider.timeout_secs = parse_var("TIMEOUT_SECS", &secs)?;
        }
        if let Some(agent) = lookup("USER_AGENT") {
            config.provider.user_agent = agent;
        }
        if let Some(host) = lookup("HOST") {
            config.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.server.port = parse_var("PORT", &port)?;
        }
        if let Some(symbol) = lookup("DEFAULT_SYMBOL") {
            config.display.default_symbol = symbol.trim().to_uppercase();
        }
        if let Some(top_n) = lookup("TOP_N") {
            config.display.default_top_n = parse_var("TOP_N", &top_n)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` describing the first offending field.
    pub fn validate(&self) -> Result<()> {
        if self.provider.timeout_secs == 0 {
            return Err(Error::config("provider timeout must be at least one second"));
        }
        if self.provider.base_url.is_empty() {
            return Err(Error::config("provider base url must not be empty"));
        }
        if !(MIN_TOP_N..=MAX_TOP_N).contains(&self.display.default_top_n) {
            return Err(Error::config(format!(
                "top n must be between {MIN_TOP_N} and {MAX_TOP_N}, got {}",
                self.display.default_top_n
            )));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::config(format!("{ENV_PREFIX}{name}: cannot parse '{value}'")))
}
