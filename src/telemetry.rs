//! Telemetry metric name constants.
//!
//! Consumers install their own `metrics` recorder (e.g. prometheus,
//! statsd); without a recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `portfolio_api_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `resource`: `{namespace}_{operation}` of the request (e.g. "projects_getAll").
//!   Request parameters (ids, search text) are never used as label values.
//! - `status`: outcome: "ok" or "error"

/// Total requests that went past the cache to the transport.
///
/// Labels: `resource`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "portfolio_api_requests_total";

/// Request duration in seconds, as measured by the performance monitor.
///
/// Labels: `resource`.
pub const REQUEST_DURATION_SECONDS: &str = "portfolio_api_request_duration_seconds";

/// Total retry attempts (not counting the initial request).
///
/// Labels: `resource`.
pub const RETRIES_TOTAL: &str = "portfolio_api_retries_total";

/// Total cache hits.
pub const CACHE_HITS_TOTAL: &str = "portfolio_api_cache_hits_total";

/// Total cache misses (absent or expired).
pub const CACHE_MISSES_TOTAL: &str = "portfolio_api_cache_misses_total";

/// Total cache invalidation calls.
///
/// Labels: `scope` ("pattern" | "all").
pub const CACHE_INVALIDATIONS_TOTAL: &str = "portfolio_api_cache_invalidations_total";

/// Total callers that joined an already in-flight request.
pub const DEDUPLICATED_TOTAL: &str = "portfolio_api_deduplicated_total";

/// Total detached background requests that failed (the failure itself is
/// only logged).
///
/// Labels: `operation` (e.g. "preload", "increment_views").
pub const BACKGROUND_FAILURES_TOTAL: &str = "portfolio_api_background_failures_total";
