//! Configuration for the optimizer and the HTTP client.
//!
//! [`ClientConfig`] is loaded from TOML with the following resolution order:
//! 1. an explicit path (error if unreadable)
//! 2. `$XDG_CONFIG_HOME/portfolio-api/config.toml` (skipped if missing)
//! 3. built-in defaults
//!
//! Environment variables are applied on top:
//! - `PORTFOLIO_API_URL`: base URL of the REST API
//! - `PORTFOLIO_API_TIMEOUT_SECS`: per-request timeout
//!
//! ```toml
//! base_url = "https://api.example.com/api"
//! timeout_secs = 15
//!
//! [optimizer]
//! cache_ttl_ms = 300000
//! max_retries = 3
//! base_delay_ms = 1000
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::cache::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL};
use crate::monitor::DEFAULT_MAX_RECORDS;
use crate::retry::RetryConfig;
use crate::{ApiError, Result};

/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "PORTFOLIO_API_URL";

/// Environment variable overriding the request timeout (seconds).
pub const ENV_TIMEOUT_SECS: &str = "PORTFOLIO_API_TIMEOUT_SECS";

/// Settings shared by every request going through one
/// [`ApiOptimizer`](crate::ApiOptimizer).
///
/// ```rust
/// # use portfolio_api::OptimizerConfig;
/// # use std::time::Duration;
/// let config = OptimizerConfig::new()
///     .cache_ttl(Duration::from_secs(60))
///     .max_retries(1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// How long a cached response stays valid. Default: 5 minutes.
    #[serde(rename = "cache_ttl_ms", with = "millis")]
    pub cache_ttl: Duration,
    /// Upper bound on cached responses. Default: 1,000.
    pub cache_max_entries: u64,
    /// Retries after the initial attempt. Default: 3.
    pub max_retries: u32,
    /// Delay before the first retry. Default: 1s.
    #[serde(rename = "base_delay_ms", with = "millis")]
    pub base_delay: Duration,
    /// Cap on a single backoff step. Default: 30s.
    #[serde(rename = "max_delay_ms", with = "millis")]
    pub max_delay: Duration,
    /// Completed timing records kept by the monitor. Default: 1,000.
    pub monitor_max_records: usize,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        let retry = RetryConfig::default();
        Self {
            cache_ttl: DEFAULT_TTL,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            max_retries: retry.max_retries,
            base_delay: retry.base_delay,
            max_delay: retry.max_delay,
            monitor_max_records: DEFAULT_MAX_RECORDS,
        }
    }
}

impl OptimizerConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cache time-to-live.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Set the maximum number of cached responses.
    pub fn cache_max_entries(mut self, n: u64) -> Self {
        self.cache_max_entries = n;
        self
    }

    /// Set the number of retries after the initial attempt.
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the delay before the first retry.
    pub fn base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Set the cap on a single backoff step.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set how many completed timing records the monitor keeps.
    pub fn monitor_max_records(mut self, n: usize) -> Self {
        self.monitor_max_records = n;
        self
    }

    /// Retry settings derived from this config.
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::new()
            .max_retries(self.max_retries)
            .base_delay(self.base_delay)
            .max_delay(self.max_delay)
    }

    /// Reject settings the optimizer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl.is_zero() {
            return Err(ApiError::Configuration(
                "cache_ttl must be greater than zero".into(),
            ));
        }
        if self.cache_max_entries == 0 {
            return Err(ApiError::Configuration(
                "cache_max_entries must be greater than zero".into(),
            ));
        }
        if self.base_delay > self.max_delay {
            return Err(ApiError::Configuration(format!(
                "base_delay ({:?}) exceeds max_delay ({:?})",
                self.base_delay, self.max_delay
            )));
        }
        if self.monitor_max_records == 0 {
            return Err(ApiError::Configuration(
                "monitor_max_records must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the REST API (default: http://localhost:5000/api).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Load configuration from file and process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, |name| std::env::var(name).ok())
    }

    /// Load configuration, reading environment overrides through `env`.
    pub fn load_with_env<E>(path: Option<&Path>, env: E) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => match Self::find_config_file() {
                Some(p) => Self::from_file(&p)?,
                None => Self::default(),
            },
        };
        config.apply_env(env)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(ApiError::Configuration(
                "timeout_secs must be greater than zero".into(),
            ));
        }
        self.optimizer.validate()
    }

    /// Parse configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ApiError::Configuration(format!("failed to read config {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ApiError::Configuration(format!("failed to parse config: {e}")))
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn apply_env<E>(&mut self, env: E) -> Result<()>
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(url) = env(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(raw) = env(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw.trim().parse().map_err(|_| {
                ApiError::Configuration(format!("{ENV_TIMEOUT_SECS} must be an integer, got {raw:?}"))
            })?;
        }
        Ok(())
    }

    fn find_config_file() -> Option<PathBuf> {
        let path = dirs::config_dir()?
            .join("portfolio-api")
            .join("config.toml");
        path.exists().then_some(path)
    }
}

/// Serde adapter for durations written as integer milliseconds.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
