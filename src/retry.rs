//! Retry configuration, delay calculation, and the shared retry helper.
//!
//! Requests are retried with exponential backoff on transient errors
//! (network failures, 5xx responses). Client errors (HTTP 4xx) and
//! client-side validation errors are returned immediately.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::Result;
use crate::telemetry;

/// Configuration for retry behaviour on transient errors.
///
/// ```rust
/// # use portfolio_api::RetryConfig;
/// # use std::time::Duration;
/// let config = RetryConfig::new()
///     .max_retries(5)
///     .base_delay(Duration::from_millis(200));
/// assert_eq!(config.delay_for_attempt(2), Duration::from_millis(800));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the initial attempt. 0 = no retry. Default: 3.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each later one. Default: 1s.
    pub base_delay: Duration,
    /// Cap on a single backoff step. Default: 30s.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryConfig {
    /// Create a new config with the default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a config that disables retries (single attempt).
    pub fn disabled() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
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

    /// Set the maximum delay between retries.
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Delay to wait after failed attempt `attempt` (0-indexed).
    ///
    /// `base_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt));
        delay.min(self.max_delay)
    }

    /// Upper bound on how many times a request factory is invoked.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Execute `factory` with retry logic.
///
/// Transient errors (see [`ApiError::is_transient`](crate::ApiError::is_transient))
/// are retried up to `config.max_retries` times; the last error is returned
/// once retries are exhausted. Any other error is returned immediately.
///
/// `resource` names the operation in logs and metric labels; pass a bounded
/// name such as `projects_getAll`, never one containing request parameters.
pub async fn retry_request<F, Fut, T>(config: &RetryConfig, resource: &str, factory: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        match factory().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) if attempt >= config.max_retries => return Err(e),
            Err(e) => {
                let delay = config.delay_for_attempt(attempt);
                warn!(
                    resource,
                    attempt = attempt + 1,
                    max_attempts = config.max_attempts(),
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retrying after transient error"
                );
                metrics::counter!(telemetry::RETRIES_TOTAL, "resource" => resource.to_owned())
                    .increment(1);
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
