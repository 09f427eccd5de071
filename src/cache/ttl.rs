//! Time-to-live response cache.
//!
//! [`TtlCache`] stores successful JSON responses keyed on canonical cache
//! keys (see [`generate_key`](super::generate_key)). Expiry is checked on
//! read: an entry older than the TTL is evicted by the `get` that finds it.
//! Moka's own TTL and capacity bound keep memory in check for keys that are
//! never read again.
//!
//! Invalidation is pattern-based. Resource clients clear their namespace
//! (e.g. `"projects"`) after every successful write, which removes every key
//! containing that substring.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use moka::sync::Cache;
use serde_json::Value;
use tracing::debug;

use crate::telemetry;

/// Default time-to-live for cached responses: 5 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Default upper bound on cached entries.
pub const DEFAULT_MAX_ENTRIES: u64 = 1_000;

/// One cached response.
#[derive(Debug)]
pub struct CacheEntry {
    pub key: String,
    pub value: Value,
    pub stored_at: Instant,
    hit_count: AtomicU64,
}

impl CacheEntry {
    fn new(key: String, value: Value) -> Self {
        Self {
            key,
            value,
            stored_at: Instant::now(),
            hit_count: AtomicU64::new(0),
        }
    }

    /// Number of reads served by this entry since it was stored.
    pub fn hit_count(&self) -> u64 {
        self.hit_count.load(Ordering::Relaxed)
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

/// Aggregate cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    /// Live (non-expired) entries.
    pub size: u64,
    /// Sum of hit counts across live entries.
    pub total_hits: u64,
    /// `total_hits / size`, or 0 when empty.
    pub avg_hits: f64,
}

/// Thread-safe TTL cache of JSON responses.
#[derive(Clone)]
pub struct TtlCache {
    entries: Cache<String, Arc<CacheEntry>>,
    ttl: Duration,
}

impl TtlCache {
    /// Create a cache with the given TTL and entry bound.
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { entries, ttl }
    }

    /// Configured time-to-live.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store `value` under `key`, replacing any previous entry and
    /// resetting its hit counter.
    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let entry = Arc::new(CacheEntry::new(key.clone(), value));
        self.entries.insert(key, entry);
    }

    /// Look up `key`.
    ///
    /// Returns `None` when the key is absent or expired; an expired entry is
    /// removed. A hit increments the entry's counter.
    pub fn get(&self, key: &str) -> Option<Value> {
        let Some(entry) = self.entries.get(key) else {
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
            return None;
        };
        if entry.is_expired(self.ttl) {
            self.entries.invalidate(key);
            metrics::counter!(telemetry::CACHE_MISSES_TOTAL).increment(1);
            return None;
        }
        entry.hit_count.fetch_add(1, Ordering::Relaxed);
        metrics::counter!(telemetry::CACHE_HITS_TOTAL).increment(1);
        Some(entry.value.clone())
    }

    /// Drop the entry for `key`, if any.
    pub fn remove(&self, key: &str) {
        self.entries.invalidate(key);
    }

    /// Hit count of a live entry, without counting as a hit itself.
    pub fn hit_count(&self, key: &str) -> Option<u64> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.hit_count())
    }

    /// Remove entries.
    ///
    /// With a pattern, every key containing it as a substring is removed.
    /// Without, the cache is emptied.
    pub fn clear(&self, pattern: Option<&str>) {
        match pattern {
            Some(pattern) => {
                let matching: Vec<Arc<String>> = self
                    .entries
                    .iter()
                    .filter(|(key, _)| key.contains(pattern))
                    .map(|(key, _)| key)
                    .collect();
                debug!(pattern, removed = matching.len(), "invalidating cache entries");
                for key in matching {
                    self.entries.invalidate(key.as_str());
                }
                metrics::counter!(telemetry::CACHE_INVALIDATIONS_TOTAL, "scope" => "pattern")
                    .increment(1);
            }
            None => {
                debug!("invalidating entire cache");
                self.entries.invalidate_all();
                metrics::counter!(telemetry::CACHE_INVALIDATIONS_TOTAL, "scope" => "all")
                    .increment(1);
            }
        }
    }

    /// Aggregate statistics over live entries.
    pub fn stats(&self) -> CacheStats {
        let (size, total_hits) = self
            .entries
            .iter()
            .filter(|(_, entry)| !entry.is_expired(self.ttl))
            .fold((0u64, 0u64), |(size, hits), (_, entry)| {
                (size + 1, hits + entry.hit_count())
            });
        let avg_hits = if size == 0 {
            0.0
        } else {
            total_hits as f64 / size as f64
        };
        CacheStats {
            size,
            total_hits,
            avg_hits,
        }
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_then_get_returns_value() {
        let cache = TtlCache::default();
        cache.set("projects_getAll_{}", json!([{"id": "1"}]));

        assert_eq!(cache.get("projects_getAll_{}"), Some(json!([{"id": "1"}])));
    }

    #[test]
    fn get_counts_hits() {
        let cache = TtlCache::default();
        cache.set("k", json!(1));
        cache.get("k");
        cache.get("k");

        assert_eq!(cache.hit_count("k"), Some(2));
    }

    #[test]
    fn set_resets_hit_count() {
        let cache = TtlCache::default();
        cache.set("k", json!(1));
        cache.get("k");
        cache.set("k", json!(2));

        assert_eq!(cache.hit_count("k"), Some(0));
        assert_eq!(cache.get("k"), Some(json!(2)));
    }

    #[test]
    fn missing_key_is_none() {
        let cache = TtlCache::default();
        assert!(cache.get("nope").is_none());
    }

    #[test]
    fn expired_entry_is_evicted_on_read() {
        let cache = TtlCache::new(Duration::from_millis(20), 100);
        cache.set("k", json!("v"));
        assert_eq!(cache.get("k"), Some(json!("v")));

        std::thread::sleep(Duration::from_millis(60));

        assert!(cache.get("k").is_none());
        assert_eq!(cache.stats().size, 0);
    }

    #[test]
    fn stats_on_empty_cache() {
        let stats = TtlCache::default().stats();
        assert_eq!(stats, CacheStats::default());
    }

    #[test]
    fn stats_averages_hits() {
        let cache = TtlCache::default();
        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.get("a");
        cache.get("a");
        cache.get("a");
        cache.get("b");

        let stats = cache.stats();
        assert_eq!(stats.size, 2);
        assert_eq!(stats.total_hits, 4);
        assert!((stats.avg_hits - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn remove_drops_single_entry() {
        let cache = TtlCache::default();
        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.remove("a");

        assert!(cache.get("a").is_none());
        assert_eq!(cache.get("b"), Some(json!(2)));
    }

    #[test]
    fn clear_without_pattern_empties_cache() {
        let cache = TtlCache::default();
        cache.set("a", json!(1));
        cache.set("b", json!(2));
        cache.clear(None);

        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }
}
