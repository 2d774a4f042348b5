// ABOUTME: Circuit breaker guarding each weather source during ingestion
// ABOUTME: Fails fast while a source is down and probes it again after a cool-down
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, AtomicU8, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use crate::error::SourceError;

/// Circuit breaker states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Requests pass through and failures are counted
    Closed,
    /// Requests are rejected without reaching the source
    Open,
    /// A single probe request is in flight
    HalfOpen,
}

impl CircuitState {
    const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Closed,
            1 => Self::Open,
            _ => Self::HalfOpen,
        }
    }

    const fn to_u8(self) -> u8 {
        match self {
            Self::Closed => 0,
            Self::Open => 1,
            Self::HalfOpen => 2,
        }
    }

    /// Lowercase label for logs and reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Open => "open",
            Self::HalfOpen => "half_open",
        }
    }
}

impl fmt::Display for CircuitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thresholds for opening and closing the circuit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive retryable failures before the circuit opens
    pub failure_threshold: u32,
    /// Cool-down before a probe request is let through
    pub recovery_timeout: Duration,
    /// Successful probes needed to close the circuit again
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            recovery_timeout: Duration::from_secs(30),
            success_threshold: 2,
        }
    }
}

impl CircuitBreakerConfig {
    /// Create a configuration with explicit thresholds
    #[must_use]
    pub const fn new(
        failure_threshold: u32,
        recovery_timeout: Duration,
        success_threshold: u32,
    ) -> Self {
        Self {
            failure_threshold,
            recovery_timeout,
            success_threshold,
        }
    }
}

/// Lock-free circuit breaker for one weather source
///
/// # States
///
/// - **Closed**: fetches pass through; consecutive retryable failures are counted.
/// - **Open**: fetches fail with `SourceError::CircuitOpen` until the cool-down elapses.
/// - **Half-Open**: one probe is allowed; success closes the circuit, failure re-opens it.
pub struct CircuitBreaker {
    source_name: String,
    state: AtomicU8,
    consecutive_failures: AtomicU32,
    probe_successes: AtomicU32,
    probe_in_flight: AtomicBool,
    /// Milliseconds after `created` at which the circuit last opened
    opened_at_ms: AtomicU64,
    config: CircuitBreakerConfig,
    created: Instant,
}

impl CircuitBreaker {
    /// Breaker with default thresholds
    #[must_use]
    pub fn new(source_name: &str) -> Self {
        Self::with_config(source_name, CircuitBreakerConfig::default())
    }

    /// Breaker with explicit thresholds
    #[must_use]
    pub fn with_config(source_name: &str, config: CircuitBreakerConfig) -> Self {
        Self {
            source_name: source_name.to_owned(),
            state: AtomicU8::new(CircuitState::Closed.to_u8()),
            consecutive_failures: AtomicU32::new(0),
            probe_successes: AtomicU32::new(0),
            probe_in_flight: AtomicBool::new(false),
            opened_at_ms: AtomicU64::new(0),
            config,
            created: Instant::now(),
        }
    }

    /// Name of the guarded source
    #[must_use]
    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Current state
    #[must_use]
    pub fn state(&self) -> CircuitState {
        CircuitState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Consecutive failures seen while closed
    #[must_use]
    pub fn failure_count(&self) -> u32 {
        self.consecutive_failures.load(Ordering::SeqCst)
    }

    /// Whether a request may go through now
    ///
    /// An open circuit past its cool-down moves to half-open. A half-open
    /// circuit admits one probe at a time.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        match self.state() {
            CircuitState::Closed => true,
            CircuitState::Open => self.try_begin_probe(),
            CircuitState::HalfOpen => self
                .probe_in_flight
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok(),
        }
    }

    fn try_begin_probe(&self) -> bool {
        if self.remaining_cooldown_ms() > 0 {
            return false;
        }
        let won = self
            .state
            .compare_exchange(
                CircuitState::Open.to_u8(),
                CircuitState::HalfOpen.to_u8(),
                Ordering::SeqCst,
                Ordering::SeqCst,
            )
            .is_ok();
        if won {
            self.probe_in_flight.store(true, Ordering::SeqCst);
            info!(source = %self.source_name, "Circuit half-open, probing source");
        }
        won
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.created.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn recovery_ms(&self) -> u64 {
        u64::try_from(self.config.recovery_timeout.as_millis()).unwrap_or(u64::MAX)
    }

    fn remaining_cooldown_ms(&self) -> u64 {
        let since_open = self
            .now_ms()
            .saturating_sub(self.opened_at_ms.load(Ordering::SeqCst));
        self.recovery_ms().saturating_sub(since_open)
    }

    fn open(&self) {
        self.state
            .store(CircuitState::Open.to_u8(), Ordering::SeqCst);
        self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst);
        self.probe_successes.store(0, Ordering::SeqCst);
        self.probe_in_flight.store(false, Ordering::SeqCst);
    }

    /// Record a successful fetch
    pub fn record_success(&self) {
        match self.state() {
            CircuitState::Closed => self.consecutive_failures.store(0, Ordering::SeqCst),
            CircuitState::HalfOpen => {
                let successes = self.probe_successes.fetch_add(1, Ordering::SeqCst) + 1;
                if successes >= self.config.success_threshold {
                    self.reset_counters();
                    self.state
                        .store(CircuitState::Closed.to_u8(), Ordering::SeqCst);
                    info!(source = %self.source_name, "Circuit closed, source recovered");
                } else {
                    self.probe_in_flight.store(false, Ordering::SeqCst);
                }
            }
            CircuitState::Open => {}
        }
    }

    /// Record a failed fetch
    pub fn record_failure(&self) {
        match self.state() {
            CircuitState::Closed => {
                let failures = self.consecutive_failures.fetch_add(1, Ordering::SeqCst) + 1;
                if failures >= self.config.failure_threshold {
                    self.open();
                    warn!(
                        source = %self.source_name,
                        failures,
                        recovery_timeout_secs = self.config.recovery_timeout.as_secs(),
                        "Circuit opened, source failing"
                    );
                }
            }
            CircuitState::HalfOpen => {
                self.open();
                warn!(source = %self.source_name, "Circuit re-opened, probe failed");
            }
            CircuitState::Open => {
                self.opened_at_ms.store(self.now_ms(), Ordering::SeqCst);
            }
        }
    }

    /// Run a fetch under circuit protection
    ///
    /// Only retryable errors count toward opening the circuit.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::CircuitOpen` without polling `operation` when the
    /// circuit rejects the request, otherwise the operation's own error
    pub async fn call<F, T, E>(&self, operation: F) -> Result<T, SourceError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<SourceError>,
    {
        if !self.is_allowed() {
            return Err(SourceError::CircuitOpen {
                source_name: self.source_name.clone(),
                retry_after_secs: self.retry_after_secs(),
            });
        }

        match operation.await {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(error) => {
                let error = error.into();
                if error.is_retryable() {
                    self.record_failure();
                } else if self.state() == CircuitState::HalfOpen {
                    // A permanent error still proves the source is reachable
                    self.record_success();
                }
                Err(error)
            }
        }
    }

    /// Whole seconds until the next probe, rounded up
    #[must_use]
    pub fn retry_after_secs(&self) -> u64 {
        self.remaining_cooldown_ms().div_ceil(1000)
    }

    fn reset_counters(&self) {
        self.consecutive_failures.store(0, Ordering::SeqCst);
        self.probe_successes.store(0, Ordering::SeqCst);
        self.probe_in_flight.store(false, Ordering::SeqCst);
    }

    /// Force the circuit closed
    pub fn reset(&self) {
        self.reset_counters();
        self.state
            .store(CircuitState::Closed.to_u8(), Ordering::SeqCst);
        info!(source = %self.source_name, "Circuit manually reset");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn failing() -> Result<(), SourceError> {
        Err(SourceError::fetch("test", "unreachable"))
    }

    #[tokio::test]
    async fn test_opens_after_threshold_and_rejects() {
        let breaker = CircuitBreaker::with_config(
            "test",
            CircuitBreakerConfig::new(2, Duration::from_secs(60), 1),
        );

        assert!(breaker.call(async { failing() }).await.is_err());
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert!(breaker.call(async { failing() }).await.is_err());
        assert_eq!(breaker.state(), CircuitState::Open);

        let rejected = breaker.call(async { Ok::<_, SourceError>(1) }).await;
        assert!(matches!(
            rejected,
            Err(SourceError::CircuitOpen { retry_after_secs, .. }) if retry_after_secs > 0
        ));
    }

    #[tokio::test]
    async fn test_probe_success_closes_circuit() {
        let breaker =
            CircuitBreaker::with_config("test", CircuitBreakerConfig::new(1, Duration::ZERO, 1));

        assert!(breaker.call(async { failing() }).await.is_err());
        assert_eq!(breaker.state(), CircuitState::Open);

        let value = breaker.call(async { Ok::<_, SourceError>(7) }).await.unwrap();
        assert_eq!(value, 7);
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert_eq!(breaker.failure_count(), 0);
    }

    #[tokio::test]
    async fn test_multiple_probes_needed() {
        let breaker =
            CircuitBreaker::with_config("test", CircuitBreakerConfig::new(1, Duration::ZERO, 2));
        assert!(breaker.call(async { failing() }).await.is_err());

        breaker.call(async { Ok::<_, SourceError>(()) }).await.unwrap();
        assert_eq!(breaker.state(), CircuitState::HalfOpen);
        breaker.call(async { Ok::<_, SourceError>(()) }).await.unwrap();
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[tokio::test]
    async fn test_failed_probe_reopens() {
        let breaker =
            CircuitBreaker::with_config("test", CircuitBreakerConfig::new(1, Duration::ZERO, 1));
        assert!(breaker.call(async { failing() }).await.is_err());
        assert!(breaker.call(async { failing() }).await.is_err());
        assert_eq!(breaker.state(), CircuitState::Open);
    }

    #[tokio::test]
    async fn test_permanent_errors_do_not_trip() {
        let breaker = CircuitBreaker::with_config(
            "test",
            CircuitBreakerConfig::new(1, Duration::from_secs(60), 1),
        );
        let parse_error = serde_json::from_str::<u32>("nope").unwrap_err();
        let result = breaker
            .call(async {
                Err::<(), _>(SourceError::Parse {
                    source_name: "test".into(),
                    error: parse_error,
                })
            })
            .await;
        assert!(matches!(result, Err(SourceError::Parse { .. })));
        assert_eq!(breaker.state(), CircuitState::Closed);
    }

    #[test]
    fn test_reset() {
        let breaker = CircuitBreaker::with_config(
            "test",
            CircuitBreakerConfig::new(1, Duration::from_secs(60), 1),
        );
        breaker.record_failure();
        assert_eq!(breaker.state(), CircuitState::Open);
        assert!(!breaker.is_allowed());
        breaker.reset();
        assert_eq!(breaker.state(), CircuitState::Closed);
        assert!(breaker.is_allowed());
    }
}
