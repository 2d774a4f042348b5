// ABOUTME: Integration tests for trend, seasonality, extreme, and analogue analysis
// ABOUTME: Uses deterministic synthetic histories so rankings and positions are reproducible
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::cast_precision_loss)]

mod common;

use climate_risk_engine::config::HistoricalConfig;
use climate_risk_engine::errors::InsufficientHistory;
use climate_risk_engine::intelligence::HistoricalAnalogueEngine;
use climate_risk_engine::models::{ClimateVariable, HazardType, HistoricalWindow, RiskLevel};
use common::{calm_days, observation, seasonal_history, test_location, window_slice};

#[test]
fn test_identical_window_scores_one() {
    common::init_test_logging();
    let history = seasonal_history(800);
    let current = window_slice(&history, 100, 7);

    let matches = HistoricalAnalogueEngine::new().find_analogues(&history, &current);

    let best = &matches[0];
    assert_eq!(best.start_index, 100);
    assert!((best.similarity - 1.0).abs() < 1e-12);
    assert_eq!(best.start_date, common::day(100).date_naive());
    assert!(best.outcome.from_subsequent);
    assert_eq!(best.outcome.observed_days, 7);
}

#[test]
fn test_matches_are_ranked_capped_and_above_threshold() {
    let history = seasonal_history(800);
    let current = window_slice(&history, 420, 5);
    let engine = HistoricalAnalogueEngine::new();

    let matches = engine.find_analogues(&history, &current);

    assert!(!matches.is_empty());
    assert!(matches.len() <= engine.config().max_matches);
    assert!(matches
        .iter()
        .all(|m| m.similarity > engine.config().similarity_threshold && m.similarity <= 1.0));
    assert!(matches
        .windows(2)
        .all(|pair| pair[0].similarity >= pair[1].similarity));
}

#[test]
fn test_analogue_search_is_deterministic() {
    let history = seasonal_history(800);
    let current = window_slice(&history, 250, 10);
    let engine = HistoricalAnalogueEngine::new().for_location(test_location());

    let first = engine.find_analogues(&history, &current);
    let second = engine.find_analogues(&history, &current);
    assert_eq!(first, second);
}

#[test]
fn test_window_at_end_of_history_uses_own_outcome() {
    let history = seasonal_history(60);
    let current = window_slice(&history, 53, 7);

    let matches = HistoricalAnalogueEngine::new().find_analogues(&history, &current);

    let best = &matches[0];
    assert_eq!(best.start_index, 53);
    assert!(!best.outcome.from_subsequent);
    assert_eq!(best.outcome.observed_days, 7);
    assert_eq!(best.outcome.hazard_scores.len(), HazardType::ALL.len());
}

#[test]
fn test_outcome_levels_follow_scores() {
    let mut observations: Vec<_> = (0..10)
        .map(|d| observation(d, 15.0 + d as f64, 2.0, 5.0, 1013.0))
        .collect();
    observations.extend((10..15).map(|d| observation(d, 40.0, 0.0, 5.0, 1013.0)));
    let history = HistoricalWindow::new(observations);
    let current = window_slice(&history, 5, 5);

    let matches = HistoricalAnalogueEngine::new().find_analogues(&history, &current);
    let exact = &matches[0];
    assert_eq!(exact.start_index, 5);

    // The five days after the match are the hot spell
    assert!(exact.outcome.from_subsequent);
    assert!((exact.outcome.hazard_scores[&HazardType::Heatwave] - 1.0).abs() < 1e-9);
    for (hazard, level) in &exact.outcome.hazard_levels {
        assert_eq!(
            *level,
            RiskLevel::from_score(exact.outcome.hazard_scores[hazard])
        );
    }
}

#[test]
fn test_empty_or_oversized_current_window_yields_nothing() {
    let history = seasonal_history(30);
    let engine = HistoricalAnalogueEngine::new();
    assert!(engine
        .find_analogues(&history, &HistoricalWindow::default())
        .is_empty());
    assert!(engine
        .find_analogues(&history, &seasonal_history(31))
        .is_empty());
    assert!(engine
        .find_analogues(&HistoricalWindow::default(), &seasonal_history(3))
        .is_empty());
}

#[test]
fn test_short_history_skips_seasonality_but_keeps_analogues() {
    let history = seasonal_history(400);
    let current = window_slice(&history, 200, 7);

    let report = HistoricalAnalogueEngine::new().analyze(&history, &current);

    assert_eq!(
        report.seasonality.unwrap_err(),
        InsufficientHistory::new(730, 400)
    );
    assert!(!report.analogues.is_empty());
    assert_eq!(report.analogues[0].start_index, 200);
    assert_eq!(report.trends.len(), 3);
}

#[test]
fn test_two_full_cycles_decompose() {
    let history = seasonal_history(730);
    let decompositions = HistoricalAnalogueEngine::new().decompose(&history).unwrap();

    assert_eq!(decompositions.len(), 2);
    let temperature = &decompositions[&ClimateVariable::Temperature];
    assert_eq!(temperature.period, 365);
    assert_eq!(temperature.trend.len(), 730);
    // Yearly cycle of amplitude 10 around the trend
    assert!(temperature.seasonal_amplitude() > 15.0);
}

#[test]
fn test_custom_period_and_cycles() {
    let config = HistoricalConfig {
        seasonal_period: 7,
        min_cycles: 3,
        ..HistoricalConfig::default()
    };
    let engine = HistoricalAnalogueEngine::with_config(config);

    assert!(engine.decompose(&seasonal_history(20)).is_err());
    let precipitation = engine.decompose(&seasonal_history(21)).unwrap();
    assert_eq!(precipitation[&ClimateVariable::Precipitation].period, 7);
}

#[test]
fn test_linear_temperature_trend() {
    let history = HistoricalWindow::new(
        (0..50)
            .map(|d| observation(d, 0.2f64.mul_add(d as f64, 10.0), 1.0, 5.0, 1013.0))
            .collect(),
    );

    let trends = HistoricalAnalogueEngine::trends(&history);

    let temperature = &trends[&ClimateVariable::Temperature];
    assert!((temperature.slope - 0.2).abs() < 1e-9);
    assert!((temperature.intercept - 10.0).abs() < 1e-9);
    assert!((temperature.r_squared - 1.0).abs() < 1e-9);
    assert!(trends[&ClimateVariable::Precipitation].slope.abs() < 1e-12);
}

#[test]
fn test_extremes_are_flagged_and_capped() {
    let mut observations = calm_days(100);
    observations[40] = observation(40, 45.0, 2.0, 5.0, 1013.0);
    let history = HistoricalWindow::new(observations);

    let extremes = HistoricalAnalogueEngine::new().extremes(&history);

    let temperature = &extremes[&ClimateVariable::Temperature];
    assert_eq!(temperature.len(), 1);
    assert_eq!(temperature[0].date, common::day(40).date_naive());
    assert!((temperature[0].value - 45.0).abs() < f64::EPSILON);
    assert!(temperature[0].z_score > 2.5);
    assert!(extremes[&ClimateVariable::Precipitation].is_empty());

    let config = HistoricalConfig {
        extreme_z_score: 0.5,
        max_extremes_per_variable: 2,
        ..HistoricalConfig::default()
    };
    let spiky = HistoricalWindow::new(
        (0..30)
            .map(|d| observation(d, if d % 3 == 0 { 35.0 } else { 5.0 }, 1.0, 5.0, 1013.0))
            .collect(),
    );
    let capped = HistoricalAnalogueEngine::with_config(config).extremes(&spiky);
    assert_eq!(capped[&ClimateVariable::Temperature].len(), 2);
}
