//! In-flight request deduplication.
//!
//! When several callers ask for the same logical request while it is still
//! outstanding, only the first one reaches the transport. Everyone else joins
//! the pending call and receives a clone of its outcome, success or error.
//!
//! The registry entry is removed by the shared future itself as soon as the
//! underlying call settles, before any awaiter sees the outcome. A call made
//! after that point always starts a fresh request. Dropping an awaiter does
//! not cancel the call or remove the entry; whoever polls the shared future
//! next drives it to completion.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tracing::debug;

use crate::telemetry;

type Registry<V> = Arc<Mutex<HashMap<String, Pending<V>>>>;

struct Pending<V> {
    id: u64,
    future: Shared<BoxFuture<'static, V>>,
}

/// Registry of in-flight requests keyed by logical operation.
pub struct RequestDeduplicator<V> {
    pending: Registry<V>,
    next_id: AtomicU64,
}

impl<V> RequestDeduplicator<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Run `factory` under `key`, or join the call already in flight for it.
    ///
    /// `factory` is only invoked when no call for `key` is outstanding.
    pub async fn dedupe<F, Fut>(&self, key: &str, factory: F) -> V
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = V> + Send + 'static,
    {
        let shared = {
            let mut pending = lock(&self.pending);
            match pending.get(key) {
                Some(existing) => {
                    debug!(key, "joining in-flight request");
                    metrics::counter!(telemetry::DEDUPLICATED_TOTAL).increment(1);
                    existing.future.clone()
                }
                None => {
                    let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                    let future = settle_and_release(
                        Arc::clone(&self.pending),
                        key.to_owned(),
                        id,
                        factory(),
                    )
                    .boxed()
                    .shared();
                    pending.insert(
                        key.to_owned(),
                        Pending {
                            id,
                            future: future.clone(),
                        },
                    );
                    future
                }
            }
        };
        shared.await
    }

    /// Number of requests currently in flight.
    pub fn in_flight(&self) -> usize {
        lock(&self.pending).len()
    }

    /// Whether a request for `key` is currently in flight.
    pub fn is_pending(&self, key: &str) -> bool {
        lock(&self.pending).contains_key(key)
    }
}

impl<V> Default for RequestDeduplicator<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Await `request`, then drop its registry entry before yielding the outcome.
async fn settle_and_release<V, Fut>(registry: Registry<V>, key: String, id: u64, request: Fut) -> V
where
    Fut: Future<Output = V>,
{
    let outcome = request.await;
    let mut pending = lock(&registry);
    if pending.get(&key).is_some_and(|entry| entry.id == id) {
        pending.remove(&key);
    }
    outcome
}

// The map holds no invariants a panicking holder could break halfway.
fn lock<V>(registry: &Mutex<HashMap<String, Pending<V>>>) -> MutexGuard<'_, HashMap<String, Pending<V>>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    #[tokio::test]
    async fn single_call_runs_factory() {
        let dedup = RequestDeduplicator::<u32>::new();
        let value = dedup.dedupe("k", || async { 7 }).await;
        assert_eq!(value, 7);
    }

    #[tokio::test]
    async fn entry_removed_after_settle() {
        let dedup = RequestDeduplicator::<u32>::new();
        dedup.dedupe("k", || async { 1 }).await;
        assert_eq!(dedup.in_flight(), 0);
        assert!(!dedup.is_pending("k"));
    }

    #[tokio::test(start_paused = true)]
    async fn entry_visible_while_in_flight() {
        let dedup = Arc::new(RequestDeduplicator::<u32>::new());
        let calls = Arc::new(AtomicU32::new(0));

        let first = {
            let dedup = Arc::clone(&dedup);
            let calls = Arc::clone(&calls);
            tokio::spawn(async move {
                dedup
                    .dedupe("slow", move || async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(100)).await;
                        5
                    })
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(dedup.is_pending("slow"));

        assert_eq!(first.await.ok(), Some(5));
        assert!(!dedup.is_pending("slow"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
