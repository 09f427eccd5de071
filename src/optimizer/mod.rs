//! Request optimization facade.
//!
//! [`ApiOptimizer`] composes the [`TtlCache`], the
//! [`RequestDeduplicator`], the retry policy and the [`PerformanceMonitor`]
//! around a single logical request:
//!
//! 1. A live cache entry is returned immediately, untimed.
//! 2. Otherwise the call is timed, wrapped in retry, and routed through the
//!    deduplicator so concurrent callers share one transport call.
//! 3. A success is cached; a failure is returned unchanged.
//!
//! One optimizer is created per process and cloned into every resource
//! client. Clones share the same cache, registry and monitor.

mod batch;
mod options;

pub use batch::{RequestSpec, detach};
pub use options::RequestOptions;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheStats, TtlCache, generate_key};
use crate::config::OptimizerConfig;
use crate::dedup::RequestDeduplicator;
use crate::monitor::PerformanceMonitor;
use crate::retry::{RetryConfig, retry_request};
use crate::{ApiError, Result, telemetry};

struct Inner {
    cache: TtlCache,
    pending: RequestDeduplicator<Result<Value>>,
    monitor: PerformanceMonitor,
    retry: RetryConfig,
    /// Bumped by every invalidation. A request only joins in-flight calls and
    /// stores its result while the generation it started under is current.
    generation: AtomicU64,
}

/// Caching, deduplicating, retrying, timed request executor.
#[derive(Clone)]
pub struct ApiOptimizer {
    inner: Arc<Inner>,
}

impl ApiOptimizer {
    /// Create an optimizer, validating `config` first.
    pub fn new(config: &OptimizerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: &OptimizerConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                cache: TtlCache::new(config.cache_ttl, config.cache_max_entries),
                pending: RequestDeduplicator::new(),
                monitor: PerformanceMonitor::new(config.monitor_max_records),
                retry: config.retry_config(),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Run one logical request through cache, deduplication, retry and
    /// monitoring, as enabled by `options`.
    ///
    /// `key` identifies the logical request for deduplication and timing.
    /// The cache key is built from `options.cache_key` (or `key`) and
    /// `options.params`. Metrics are labelled with `options.cache_key` (or
    /// `key`) so parameter values never become label values.
    ///
    /// A request that was in flight when [`invalidate_cache`](Self::invalidate_cache)
    /// ran is neither joined by later callers nor written to the cache.
    pub async fn optimize_request<T, F, Fut>(
        &self,
        key: &str,
        factory: F,
        options: &RequestOptions,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let resource = options.cache_key.as_deref().unwrap_or(key);
        let cache_key = generate_key(resource, &options.params);

        if options.use_cache {
            if let Some(value) = self.inner.cache.get(&cache_key) {
                return Ok(serde_json::from_value(value)?);
            }
        }

        let generation = self.inner.generation.load(Ordering::Acquire);
        if options.use_monitoring {
            self.inner.monitor.start_timing(key);
        }

        let outcome = self.execute(key, resource, generation, factory, options).await;

        let status = if outcome.is_ok() { "ok" } else { "error" };
        metrics::counter!(telemetry::REQUESTS_TOTAL,
            "resource" => resource.to_owned(),
            "status" => status,
        )
        .increment(1);

        if let (Ok(value), true) = (&outcome, options.use_cache) {
            self.store(cache_key, value, generation);
        }
        if let Some(elapsed) = options
            .use_monitoring
            .then(|| self.inner.monitor.complete(key))
            .flatten()
        {
            metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
                "resource" => resource.to_owned(),
            )
            .record(elapsed.as_secs_f64());
        }

        Ok(serde_json::from_value(outcome?)?)
    }

    /// Cache `value` unless an invalidation ran since `generation` was read.
    fn store(&self, cache_key: String, value: &Value, generation: u64) {
        let current = || self.inner.generation.load(Ordering::Acquire) == generation;
        if !current() {
            debug!(key = %cache_key, "cache invalidated while in flight, result not stored");
            return;
        }
        self.inner.cache.set(cache_key.as_str(), value.clone());
        // An invalidation may land between the check and the insert.
        if !current() {
            self.inner.cache.remove(&cache_key);
        }
    }

    /// Build the retry-wrapped call and route it through the deduplicator.
    ///
    /// In-flight calls are registered per invalidation generation, so a
    /// caller arriving after an invalidation starts a fresh call.
    async fn execute<T, F, Fut>(
        &self,
        key: &str,
        resource: &str,
        generation: u64,
        factory: F,
        options: &RequestOptions,
    ) -> Result<Value>
    where
        T: Serialize + Send + 'static,
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let retry = options.use_retry.then(|| self.inner.retry.clone());
        let label = resource.to_owned();
        let call = move || async move {
            let value = match retry {
                Some(config) => retry_request(&config, &label, &factory).await?,
                None => factory().await?,
            };
            Ok::<Value, ApiError>(serde_json::to_value(value)?)
        };

        if options.use_deduplication {
            let pending_key = format!("{key}#{generation}");
            self.inner.pending.dedupe(&pending_key, call).await
        } else {
            call().await
        }
    }

    /// Drop cached responses whose key contains `pattern`, or all of them.
    ///
    /// Requests already in flight are detached from later callers and will
    /// not repopulate the cache.
    pub fn invalidate_cache(&self, pattern: Option<&str>) {
        self.inner.generation.fetch_add(1, Ordering::AcqRel);
        self.inner.cache.clear(pattern);
    }

    /// Aggregate cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache.stats()
    }

    /// Mean latency of requests whose key starts with `prefix`.
    pub fn average_time(&self, prefix: &str) -> Duration {
        self.inner.monitor.average_time(prefix)
    }

    /// The underlying cache.
    pub fn cache(&self) -> &TtlCache {
        &self.inner.cache
    }

    /// The underlying latency ledger.
    pub fn monitor(&self) -> &PerformanceMonitor {
        &self.inner.monitor
    }

    /// Number of transport calls currently in flight under deduplication.
    pub fn in_flight(&self) -> usize {
        self.inner.pending.in_flight()
    }
}

impl Default for ApiOptimizer {
    fn default() -> Self {
        Self::from_valid_config(&OptimizerConfig::default())
    }
}
