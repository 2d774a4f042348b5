// ABOUTME: Integration tests for the per-source circuit breaker
// ABOUTME: Tests state transitions, failure counting, probing, and recovery behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use climate_risk_engine::providers::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, SourceError,
};
use std::time::Duration;

fn quick_recovery(failure_threshold: u32, success_threshold: u32) -> CircuitBreakerConfig {
    CircuitBreakerConfig::new(failure_threshold, Duration::ZERO, success_threshold)
}

#[test]
fn test_circuit_breaker_starts_closed() {
    let cb = CircuitBreaker::new("station-a");
    assert_eq!(cb.state(), CircuitState::Closed);
    assert_eq!(cb.source_name(), "station-a");
    assert!(cb.is_allowed());
    assert_eq!(cb.failure_count(), 0);
}

#[test]
fn test_circuit_opens_after_threshold_failures() {
    let config = CircuitBreakerConfig::new(3, Duration::from_secs(30), 2);
    let cb = CircuitBreaker::with_config("station-a", config);

    cb.record_failure();
    assert_eq!(cb.state(), CircuitState::Closed);
    cb.record_failure();
    assert_eq!(cb.state(), CircuitState::Closed);
    cb.record_failure();
    assert_eq!(cb.state(), CircuitState::Open);
    assert!(!cb.is_allowed());
    assert!(cb.retry_after_secs() > 0);
    assert!(cb.retry_after_secs() <= 30);
}

#[test]
fn test_success_resets_failure_count() {
    let config = CircuitBreakerConfig::new(3, Duration::from_secs(30), 2);
    let cb = CircuitBreaker::with_config("station-a", config);

    cb.record_failure();
    cb.record_failure();
    assert_eq!(cb.failure_count(), 2);

    cb.record_success();
    assert_eq!(cb.failure_count(), 0);
    assert_eq!(cb.state(), CircuitState::Closed);
}

#[test]
fn test_state_display() {
    assert_eq!(CircuitState::Closed.to_string(), "closed");
    assert_eq!(CircuitState::Open.to_string(), "open");
    assert_eq!(CircuitState::HalfOpen.to_string(), "half_open");
    assert_ne!(CircuitState::Closed, CircuitState::HalfOpen);
}

#[test]
fn test_default_config() {
    let config = CircuitBreakerConfig::default();
    assert_eq!(config.failure_threshold, 5);
    assert_eq!(config.recovery_timeout, Duration::from_secs(30));
    assert_eq!(config.success_threshold, 2);
}

#[test]
fn test_cooled_down_circuit_admits_a_single_probe() {
    let cb = CircuitBreaker::with_config("station-a", quick_recovery(1, 1));
    cb.record_failure();
    assert_eq!(cb.state(), CircuitState::Open);

    assert!(cb.is_allowed());
    assert_eq!(cb.state(), CircuitState::HalfOpen);
    assert!(!cb.is_allowed());

    cb.record_success();
    assert_eq!(cb.state(), CircuitState::Closed);
    assert!(cb.is_allowed());
}

#[test]
fn test_failed_probe_reopens() {
    let cb = CircuitBreaker::with_config("station-a", quick_recovery(1, 1));
    cb.record_failure();
    assert!(cb.is_allowed());

    cb.record_failure();
    assert_eq!(cb.state(), CircuitState::Open);
}

#[test]
fn test_manual_reset_closes_circuit() {
    let config = CircuitBreakerConfig::new(1, Duration::from_secs(300), 1);
    let cb = CircuitBreaker::with_config("station-a", config);
    cb.record_failure();
    assert!(!cb.is_allowed());

    cb.reset();
    assert_eq!(cb.state(), CircuitState::Closed);
    assert!(cb.is_allowed());
}

#[tokio::test]
async fn test_call_short_circuits_when_open() {
    let config = CircuitBreakerConfig::new(2, Duration::from_secs(60), 1);
    let cb = CircuitBreaker::with_config("station-a", config);

    for _ in 0..2 {
        let result: Result<(), SourceError> = cb
            .call(async { Err::<(), _>(SourceError::fetch("station-a", "connection refused")) })
            .await;
        assert!(matches!(result, Err(SourceError::Fetch { .. })));
    }
    assert_eq!(cb.state(), CircuitState::Open);

    let mut polled = false;
    let result = cb
        .call(async {
            polled = true;
            Ok::<_, SourceError>(1)
        })
        .await;
    assert!(matches!(
        result,
        Err(SourceError::CircuitOpen { ref source_name, .. }) if source_name == "station-a"
    ));
    assert!(!polled);
}

#[tokio::test]
async fn test_call_recovers_through_probes() {
    let cb = CircuitBreaker::with_config("station-a", quick_recovery(1, 2));
    let failed: Result<(), SourceError> = cb
        .call(async { Err::<(), _>(SourceError::fetch("station-a", "timeout")) })
        .await;
    assert!(failed.is_err());
    assert_eq!(cb.state(), CircuitState::Open);

    assert_eq!(cb.call(async { Ok::<_, SourceError>(1) }).await.unwrap(), 1);
    assert_eq!(cb.state(), CircuitState::HalfOpen);
    assert_eq!(cb.call(async { Ok::<_, SourceError>(2) }).await.unwrap(), 2);
    assert_eq!(cb.state(), CircuitState::Closed);
}
