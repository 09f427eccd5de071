//! Per-request feature toggles.

use serde_json::Value;

use crate::cache::Params;

/// Per-call options for [`ApiOptimizer::optimize_request`](super::ApiOptimizer::optimize_request).
///
/// Every feature is enabled by default and each can be switched off on its
/// own without affecting the others.
///
/// ```rust
/// # use portfolio_api::RequestOptions;
/// let options = RequestOptions::default()
///     .cache_key("projects_getAll")
///     .param("category", "web")
///     .use_retry(false);
/// assert!(options.use_cache);
/// assert!(!options.use_retry);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    /// Serve from and store into the TTL cache. Default: true.
    pub use_cache: bool,
    /// Share one in-flight call between concurrent callers. Default: true.
    pub use_deduplication: bool,
    /// Record latency in the performance monitor. Default: true.
    pub use_monitoring: bool,
    /// Retry transient failures with exponential backoff. Default: true.
    pub use_retry: bool,
    /// Cache key resource; the request key is used when unset.
    pub cache_key: Option<String>,
    /// Request parameters folded into the cache key.
    pub params: Params,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            use_deduplication: true,
            use_monitoring: true,
            use_retry: true,
            cache_key: None,
            params: Params::new(),
        }
    }
}

impl RequestOptions {
    /// Options with every feature enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for writes: no caching, no sharing, no automatic replay.
    ///
    /// Latency is still monitored.
    pub fn mutation() -> Self {
        Self {
            use_cache: false,
            use_deduplication: false,
            use_retry: false,
            ..Self::default()
        }
    }

    pub fn use_cache(mut self, enabled: bool) -> Self {
        self.use_cache = enabled;
        self
    }

    pub fn use_deduplication(mut self, enabled: bool) -> Self {
        self.use_deduplication = enabled;
        self
    }

    pub fn use_monitoring(mut self, enabled: bool) -> Self {
        self.use_monitoring = enabled;
        self
    }

    pub fn use_retry(mut self, enabled: bool) -> Self {
        self.use_retry = enabled;
        self
    }

    /// Set the resource part of the cache key.
    pub fn cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = Some(key.into());
        self
    }

    /// Add one request parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replace all request parameters.
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }
}
