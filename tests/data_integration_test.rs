// ABOUTME: Integration tests for concurrent multi-source ingestion
// ABOUTME: Covers merging, duplicate resolution, validation, timeouts, and breaker isolation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use async_trait::async_trait;
use climate_risk_engine::config::IngestionConfig;
use climate_risk_engine::models::{LocationProfile, WeatherObservation};
use climate_risk_engine::providers::{
    CircuitBreakerConfig, CircuitState, DataIntegration, JsonFileSource, SourceError,
    SourceSettings, StaticSource, WeatherSource,
};
use common::{calm_day, observation, test_location};
use std::io::Write;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Source that always fails with a retryable error
struct FailingSource {
    calls: AtomicUsize,
}

impl FailingSource {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl WeatherSource for FailingSource {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(
        &self,
        _location: &LocationProfile,
        _days: u32,
    ) -> Result<Vec<WeatherObservation>, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::fetch("failing", "connection refused"))
    }
}

/// Source that never answers within a test timeout
struct SlowSource;

#[async_trait]
impl WeatherSource for SlowSource {
    fn name(&self) -> &str {
        "slow"
    }

    async fn fetch(
        &self,
        _location: &LocationProfile,
        _days: u32,
    ) -> Result<Vec<WeatherObservation>, SourceError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Vec::new())
    }
}

fn json_file(observations: &[WeatherObservation]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(observations).unwrap().as_bytes())
        .unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_sources_are_merged_in_time_order() {
    common::init_test_logging();
    let mut integration = DataIntegration::new();
    integration
        .register(Arc::new(StaticSource::new(
            "late",
            vec![calm_day(3), calm_day(4)],
        )))
        .register(Arc::new(StaticSource::new(
            "early",
            vec![calm_day(0), calm_day(1), calm_day(2)],
        )));

    let report = integration.fetch_all(&test_location(), 7).await;

    assert_eq!(report.succeeded, vec!["late", "early"]);
    assert!(!report.has_failures());
    let timestamps: Vec<_> = report
        .observations
        .iter()
        .map(WeatherObservation::timestamp)
        .collect();
    assert_eq!(timestamps, (0..5).map(common::day).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_duplicate_timestamps_keep_first_registered_source() {
    let mut integration = DataIntegration::new();
    integration
        .register(Arc::new(StaticSource::new(
            "primary",
            vec![observation(0, 21.0, 0.0, 3.0, 1012.0)],
        )))
        .register(Arc::new(StaticSource::new(
            "secondary",
            vec![
                observation(0, 30.0, 9.0, 8.0, 1005.0),
                observation(1, 22.0, 0.0, 3.0, 1012.0),
            ],
        )));

    let report = integration.fetch_all(&test_location(), 7).await;

    assert_eq!(report.duplicates, 1);
    assert_eq!(report.observations.len(), 2);
    assert!((report.observations[0].temperature() - 21.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_invalid_observations_are_counted_and_dropped() {
    let mut integration = DataIntegration::new();
    integration.register(Arc::new(StaticSource::new(
        "station",
        vec![
            calm_day(0),
            observation(1, 20.0, 2.0, 5.0, 600.0),
            observation(2, 20.0, 2.0, 900.0, 1013.0),
            calm_day(3),
        ],
    )));

    let report = integration.fetch_all(&test_location(), 7).await;

    assert_eq!(report.rejected, 2);
    assert_eq!(report.observations.len(), 2);
}

#[tokio::test]
async fn test_failing_source_does_not_block_others() {
    let failing = Arc::new(FailingSource::new());
    let mut integration = DataIntegration::new();
    integration
        .register(failing.clone())
        .register(Arc::new(StaticSource::new("station", vec![calm_day(0)])));

    let report = integration.fetch_all(&test_location(), 7).await;

    assert!(report.has_failures());
    assert!(report.failures["failing"].contains("connection refused"));
    assert_eq!(report.succeeded, vec!["station"]);
    assert_eq!(report.observations.len(), 1);
    assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_slow_source_times_out() {
    let settings = SourceSettings {
        timeout: Duration::from_millis(50),
        rate_limit: 1,
        breaker: CircuitBreakerConfig::default(),
    };
    let mut integration = DataIntegration::new();
    integration
        .register_with(Arc::new(SlowSource), settings)
        .register(Arc::new(StaticSource::new("station", vec![calm_day(0)])));

    let report = integration.fetch_all(&test_location(), 7).await;

    assert!(report.failures["slow"].contains("timed out"));
    assert_eq!(report.observations.len(), 1);
}

#[tokio::test]
async fn test_repeated_failures_open_the_circuit() {
    let failing = Arc::new(FailingSource::new());
    let settings = SourceSettings {
        timeout: Duration::from_secs(1),
        rate_limit: 2,
        breaker: CircuitBreakerConfig::new(2, Duration::from_secs(60), 1),
    };
    let mut integration = DataIntegration::new();
    integration.register_with(failing.clone(), settings);
    let location = test_location();

    integration.fetch_all(&location, 7).await;
    integration.fetch_all(&location, 7).await;
    assert_eq!(integration.circuit_state("failing"), Some(CircuitState::Open));

    let report = integration.fetch_all(&location, 7).await;
    assert!(report.failures["failing"].contains("Circuit open"));
    assert_eq!(failing.calls.load(Ordering::SeqCst), 2);
    assert_eq!(integration.circuit_state("unknown"), None);
}

#[tokio::test]
async fn test_static_source_limits_days() {
    let mut integration = DataIntegration::new();
    integration.register(Arc::new(StaticSource::new(
        "station",
        (0..10).map(calm_day).collect(),
    )));

    let report = integration.fetch_all(&test_location(), 3).await;
    assert_eq!(report.observations.len(), 3);
}

#[tokio::test]
async fn test_json_file_source() {
    let file = json_file(&[calm_day(1), calm_day(0)]);
    let source = JsonFileSource::named("archive", file.path());
    assert_eq!(source.name(), "archive");

    let observations = source.fetch(&test_location(), 7).await.unwrap();
    assert_eq!(observations.len(), 2);
    assert_eq!(observations[0].timestamp(), common::day(0));
}

#[tokio::test]
async fn test_broken_json_is_reported_per_source() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"{ not json").unwrap();
    let mut integration = DataIntegration::new();
    integration
        .register(Arc::new(JsonFileSource::named("broken", file.path())))
        .register(Arc::new(StaticSource::new("station", vec![calm_day(0)])));

    let report = integration.fetch_all(&test_location(), 7).await;

    assert!(report.failures["broken"].contains("malformed"));
    assert_eq!(integration.circuit_state("broken"), Some(CircuitState::Closed));
    assert_eq!(report.observations.len(), 1);
}

#[test]
fn test_settings_follow_ingestion_config() {
    let config = IngestionConfig {
        source_timeout_secs: 3,
        source_rate_limit: 7,
        default_days: 14,
    };
    let settings = SourceSettings::from_config(&config);
    assert_eq!(settings.timeout, Duration::from_secs(3));
    assert_eq!(settings.rate_limit, 7);

    let integration = DataIntegration::with_config(config);
    assert_eq!(integration.config().default_days, 14);
    assert!(integration.is_empty());
}
