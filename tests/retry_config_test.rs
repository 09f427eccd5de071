use std::time::Duration;

use portfolio_api::{OptimizerConfig, RetryConfig};

#[test]
fn retry_config_defaults() {
    let config = RetryConfig::default();
    assert_eq!(config.max_retries, 3);
    assert_eq!(config.base_delay, Duration::from_millis(1000));
    assert_eq!(config.max_delay, Duration::from_secs(30));
    assert_eq!(config.max_attempts(), 4);
}

#[test]
fn retry_config_builder() {
    let config = RetryConfig::new()
        .max_retries(5)
        .base_delay(Duration::from_millis(100))
        .max_delay(Duration::from_secs(10));

    assert_eq!(config.max_retries, 5);
    assert_eq!(config.base_delay, Duration::from_millis(100));
    assert_eq!(config.max_delay, Duration::from_secs(10));
}

#[test]
fn retry_config_disabled() {
    assert_eq!(RetryConfig::disabled().max_retries, 0);
}

#[test]
fn retry_config_delay_calculation() {
    let config = RetryConfig::new()
        .base_delay(Duration::from_millis(100))
        .max_delay(Duration::from_secs(10));

    // Exponential backoff: 100ms, 200ms, 400ms, 800ms, ...
    assert_eq!(config.delay_for_attempt(0), Duration::from_millis(100));
    assert_eq!(config.delay_for_attempt(1), Duration::from_millis(200));
    assert_eq!(config.delay_for_attempt(2), Duration::from_millis(400));
    assert_eq!(config.delay_for_attempt(3), Duration::from_millis(800));
}

#[test]
fn optimizer_config_derives_retry_config() {
    let retry = OptimizerConfig::new()
        .max_retries(1)
        .base_delay(Duration::from_millis(250))
        .retry_config();

    assert_eq!(retry.max_retries, 1);
    assert_eq!(retry.base_delay, Duration::from_millis(250));
}
