//! Batch execution, cache preloading and detached best-effort tasks.

use std::future::Future;
use std::sync::Arc;

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, join_all};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{ApiOptimizer, RequestOptions};
use crate::{Result, telemetry};

type Factory<T> = Arc<dyn Fn() -> BoxFuture<'static, Result<T>> + Send + Sync>;

/// A request described up front, for [`ApiOptimizer::batch_requests`] and
/// [`ApiOptimizer::preload_data`].
pub struct RequestSpec<T> {
    pub key: String,
    pub options: RequestOptions,
    factory: Factory<T>,
}

impl<T> Clone for RequestSpec<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            options: self.options.clone(),
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T> RequestSpec<T> {
    /// Describe a request under `key` with default options.
    pub fn new<F, Fut>(key: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        Self {
            key: key.into(),
            options: RequestOptions::default(),
            factory: Arc::new(move || factory().boxed()),
        }
    }

    /// Replace the request options.
    pub fn options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }
}

impl ApiOptimizer {
    /// Run `requests` in sequential chunks of `concurrency`, each chunk
    /// concurrently.
    ///
    /// Returns one outcome per request, in input order. A failure never
    /// prevents sibling or later requests from running.
    pub async fn batch_requests<T>(&self, requests: &[RequestSpec<T>], concurrency: usize) -> Vec<Result<T>>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        let mut outcomes = Vec::with_capacity(requests.len());
        for chunk in requests.chunks(concurrency.max(1)) {
            let running = chunk.iter().map(|spec| {
                let factory = Arc::clone(&spec.factory);
                self.optimize_request(&spec.key, move || factory(), &spec.options)
            });
            outcomes.extend(join_all(running).await);
        }
        outcomes
    }

    /// Warm the cache by running each request as a detached task.
    ///
    /// Caching is forced on. Failures are logged and counted, never returned.
    /// The handles may be awaited to know when warm-up is done, or dropped.
    pub fn preload_data<T>(&self, requests: Vec<RequestSpec<T>>) -> Vec<JoinHandle<()>>
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        requests
            .into_iter()
            .map(|spec| {
                let optimizer = self.clone();
                let key = spec.key.clone();
                let options = spec.options.use_cache(true);
                let factory = spec.factory;
                detach("preload", key.clone(), async move {
                    optimizer
                        .optimize_request(&key, move || factory(), &options)
                        .await
                        .map(|_: T| ())
                })
            })
            .collect()
    }
}

/// Spawn `task` and only log its outcome.
///
/// For fire-and-forget calls (cache warm-up, view counters) whose failure
/// must never reach the caller that triggered them.
pub fn detach<F, T>(operation: &'static str, key: String, task: F) -> JoinHandle<()>
where
    F: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    tokio::spawn(async move {
        match task.await {
            Ok(_) => debug!(operation, key = %key, "background request completed"),
            Err(e) => {
                warn!(operation, key = %key, error = %e, "background request failed");
                metrics::counter!(telemetry::BACKGROUND_FAILURES_TOTAL, "operation" => operation)
                    .increment(1);
            }
        }
    })
}
