// ABOUTME: Tests for environment-driven engine and logging configuration
// ABOUTME: Serialized because every case mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use climate_risk_engine::config::{ConfigError, EngineConfig};
use climate_risk_engine::logging::{LogFormat, LogTarget, LoggingConfig};
use climate_risk_engine::models::HazardType;
use climate_risk_engine::providers::InMemoryHistoricalStore;
use climate_risk_engine::ClimateRiskService;
use serial_test::serial;
use std::env;
use std::sync::Arc;

/// Run `test` with the given variables set, removing them afterwards
fn with_env<T>(vars: &[(&str, &str)], test: impl FnOnce() -> T) -> T {
    for (key, value) in vars {
        env::set_var(key, value);
    }
    let result = test();
    for (key, _) in vars {
        env::remove_var(key);
    }
    result
}

#[test]
#[serial]
fn test_defaults_load_without_overrides() {
    let config = EngineConfig::load().unwrap();
    assert_eq!(config, EngineConfig::default());
    assert_eq!(config.historical.seasonal_period, 365);
    assert_eq!(config.historical.min_cycles, 2);
    assert_eq!(config.historical.max_matches, 5);
    assert_eq!(config.ensemble.members, 10);
    assert_eq!(config.ensemble.seed, 42);
    assert_eq!(config.ensemble.cv_folds, 5);
    assert_eq!(config.ingestion.default_days, 7);
    assert!((config.combiner.confidence_threshold(HazardType::Hurricane) - 0.9).abs() < 1e-12);
}

#[test]
#[serial]
fn test_hazard_overrides() {
    let config = with_env(
        &[
            ("CLIMATE_WEIGHT_BLACKOUT", "0.4"),
            ("CLIMATE_CONFIDENCE_THRESHOLD_FLOOD", "0.5"),
            ("CLIMATE_MAX_MATCHES", "3"),
            ("CLIMATE_SOURCE_TIMEOUT_SECS", " 20 "),
            ("CLIMATE_METRICS_HISTORY", "3"),
        ],
        EngineConfig::load,
    )
    .unwrap();

    assert!((config.combiner.weight(HazardType::Blackout) - 0.4).abs() < 1e-12);
    assert!((config.combiner.confidence_threshold(HazardType::Flood) - 0.5).abs() < 1e-12);
    assert_eq!(config.historical.max_matches, 3);
    assert_eq!(config.ingestion.source_timeout_secs, 20);
    assert_eq!(config.ensemble.metrics_history, 3);
}

#[test]
#[serial]
fn test_malformed_override_is_a_parse_error() {
    let result = with_env(&[("CLIMATE_ENSEMBLE_MEMBERS", "many")], EngineConfig::load);
    match result {
        Err(ConfigError::Parse(message)) => assert!(message.contains("CLIMATE_ENSEMBLE_MEMBERS")),
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_out_of_range_overrides_fail_validation() {
    let threshold = with_env(
        &[("CLIMATE_CONFIDENCE_THRESHOLD_DROUGHT", "1.5")],
        EngineConfig::load,
    );
    assert!(matches!(threshold, Err(ConfigError::InvalidRange(_))));

    let weight = with_env(&[("CLIMATE_WEIGHT_FLOOD", "-0.2")], EngineConfig::load);
    assert!(matches!(weight, Err(ConfigError::InvalidWeights(_))));

    let cycles = with_env(&[("CLIMATE_MIN_CYCLES", "0")], EngineConfig::load);
    assert!(matches!(cycles, Err(ConfigError::ValueOutOfRange(_))));

    let rate = with_env(&[("CLIMATE_SOURCE_RATE_LIMIT", "0")], EngineConfig::load);
    assert!(matches!(rate, Err(ConfigError::ValueOutOfRange(_))));

    let folds = with_env(&[("CLIMATE_CV_FOLDS", "1")], EngineConfig::load);
    assert!(matches!(folds, Err(ConfigError::ValueOutOfRange(_))));
}

#[test]
#[serial]
fn test_service_from_env_uses_overrides() {
    common::init_test_logging();
    let service = with_env(&[("CLIMATE_RECOMMENDATION_CRITICAL_SCORE", "0.3")], || {
        ClimateRiskService::from_env(Arc::new(InMemoryHistoricalStore::new()))
    })
    .unwrap();

    let location = common::test_location();
    let risks = [(HazardType::Flood, 0.35)].into_iter().collect();
    let health = service.health_hazards(&risks, &location);
    let recommendations = service.recommendations(&risks, &health, &location);
    assert_eq!(recommendations.critical.len(), 1);

    let invalid = with_env(&[("CLIMATE_SIMILARITY_THRESHOLD", "2.0")], || {
        ClimateRiskService::from_env(Arc::new(InMemoryHistoricalStore::new()))
    });
    assert!(invalid.is_err());
}

#[test]
#[serial]
fn test_logging_config_from_env() {
    let config = with_env(
        &[
            ("LOG_FORMAT", "json"),
            ("ENVIRONMENT", "production"),
            ("SERVICE_NAME", "risk-batch"),
        ],
        LoggingConfig::from_env,
    );

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.environment, "production");
    assert!(config.include_location);
    assert!(config.include_thread);
    assert_eq!(config.service_name, "risk-batch");
    assert_eq!(config.target, LogTarget::Stdout);
    assert_eq!(
        config.with_target(LogTarget::Stderr).target,
        LogTarget::Stderr
    );
}

#[test]
#[serial]
fn test_logging_defaults() {
    let config = with_env(&[("LOG_FORMAT", "compact")], LoggingConfig::from_env);
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.environment, "development");

    let default = LoggingConfig::default();
    assert_eq!(default.format, LogFormat::Pretty);
    assert_eq!(default.level, "info");
    assert!(!default.include_spans);
}
