//! Tests for batch execution, cache preloading and detached tasks.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use portfolio_api::optimizer::detach;
use portfolio_api::{ApiError, ApiOptimizer, RequestOptions, RequestSpec, Result};
use tokio::time::Instant;

fn ok(key: &str, value: u32) -> RequestSpec<u32> {
    RequestSpec::new(key, move || async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Ok(value)
    })
}

fn failing(key: &str) -> RequestSpec<u32> {
    RequestSpec::new(key, || async {
        Err(ApiError::Api {
            status: 404,
            message: "not found".into(),
        })
    })
}

// =========================================================================
// batch_requests
// =========================================================================

#[tokio::test]
async fn batch_settles_every_request() {
    let optimizer = ApiOptimizer::default();
    let requests = vec![ok("a", 1), failing("b"), ok("c", 3)];

    let outcomes = optimizer.batch_requests(&requests, 2).await;

    assert_eq!(outcomes.len(), 3);
    assert_eq!(outcomes[0], Ok(1));
    assert!(matches!(outcomes[1], Err(ApiError::Api { status: 404, .. })));
    assert_eq!(outcomes[2], Ok(3));
}

#[tokio::test]
async fn batch_preserves_input_order() {
    let optimizer = ApiOptimizer::default();
    let requests: Vec<_> = (0..7).map(|i| ok(&format!("k{i}"), i)).collect();

    let outcomes = optimizer.batch_requests(&requests, 3).await;

    let values: Vec<u32> = outcomes.into_iter().map(Result::unwrap).collect();
    assert_eq!(values, vec![0, 1, 2, 3, 4, 5, 6]);
}

#[tokio::test(start_paused = true)]
async fn batch_runs_chunks_sequentially() {
    let optimizer = ApiOptimizer::default();
    let requests: Vec<_> = (0..5).map(|i| ok(&format!("k{i}"), i)).collect();
    let start = Instant::now();

    optimizer.batch_requests(&requests, 2).await;

    // Three chunks of 100ms each: [k0,k1] [k2,k3] [k4].
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(300), "took {elapsed:?}");
    assert!(elapsed < Duration::from_millis(400), "took {elapsed:?}");
}

#[tokio::test]
async fn zero_concurrency_is_treated_as_one() {
    let optimizer = ApiOptimizer::default();
    let requests = vec![ok("a", 1), ok("b", 2)];

    let outcomes = optimizer.batch_requests(&requests, 0).await;

    assert_eq!(outcomes, vec![Ok(1), Ok(2)]);
}

#[tokio::test]
async fn empty_batch_returns_nothing() {
    let optimizer = ApiOptimizer::default();
    let outcomes = optimizer.batch_requests::<u32>(&[], 4).await;
    assert!(outcomes.is_empty());
}

// =========================================================================
// preload_data
// =========================================================================

#[tokio::test]
async fn preload_warms_the_cache() {
    let optimizer = ApiOptimizer::default();
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let spec = RequestSpec::new("projects_getFeatured", move || {
        counter.fetch_add(1, Ordering::SeqCst);
        async { Ok(vec!["p1".to_string()]) }
    });

    for handle in optimizer.preload_data(vec![spec]) {
        handle.await.unwrap();
    }

    let cached: Vec<String> = optimizer
        .optimize_request(
            "projects_getFeatured",
            || async { Ok(Vec::<String>::new()) },
            &RequestOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(cached, vec!["p1".to_string()]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn preload_forces_caching_on() {
    let optimizer = ApiOptimizer::default();
    let spec = ok("skills_getAll", 5).options(RequestOptions::default().use_cache(false));

    for handle in optimizer.preload_data(vec![spec]) {
        handle.await.unwrap();
    }

    assert_eq!(optimizer.cache_stats().size, 1);
}

#[tokio::test]
async fn preload_failure_is_swallowed() {
    let optimizer = ApiOptimizer::default();
    let specs = vec![
        failing("hero_getActive").options(RequestOptions::default().use_retry(false)),
        ok("skills_getAll", 1),
    ];

    for handle in optimizer.preload_data(specs) {
        // Failures never surface as panics or errors on the handle.
        handle.await.unwrap();
    }

    assert_eq!(optimizer.cache_stats().size, 1);
}

// =========================================================================
// detach
// =========================================================================

#[tokio::test]
async fn detached_task_runs_to_completion() {
    let done = Arc::new(AtomicU32::new(0));
    let flag = Arc::clone(&done);

    detach("test", "k".into(), async move {
        flag.store(1, Ordering::SeqCst);
        Ok::<_, ApiError>(())
    })
    .await
    .unwrap();

    assert_eq!(done.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn detached_failure_does_not_propagate() {
    let handle = detach("test", "k".into(), async {
        Err::<(), _>(ApiError::Http("offline".into()))
    });
    assert!(handle.await.is_ok());
}
