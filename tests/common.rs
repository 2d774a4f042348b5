// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging, observation builders, synthetic history, and service setup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
    clippy::suboptimal_flops
)]
//! Shared test utilities for `climate_risk_engine`
//!
//! Fixtures build observations on a fixed daily calendar so assertions on
//! windows, dates, and analogue positions stay deterministic.

use chrono::{DateTime, Duration, TimeZone, Utc};
use climate_risk_engine::intelligence::PredictorRegistry;
use climate_risk_engine::models::{HistoricalWindow, LocationProfile, WeatherObservation};
use climate_risk_engine::providers::{HistoricalStore, InMemoryHistoricalStore};
use climate_risk_engine::ClimateRiskService;
use std::f64::consts::TAU;
use std::sync::{Arc, Once};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Midnight UTC on 2020-01-01 plus `day` days
pub fn day(day: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::days(day)
}

/// Sea-level test location with no vulnerability indicators
pub fn test_location() -> LocationProfile {
    LocationProfile::new(40.0, -74.0, 0.0, "test-region").unwrap()
}

/// Location at a given elevation
pub fn location_at(elevation: f64) -> LocationProfile {
    LocationProfile::new(40.0, -74.0, elevation, "test-region").unwrap()
}

/// Observation with moderate humidity and no UV
pub fn observation(
    day_offset: i64,
    temperature: f64,
    precipitation: f64,
    wind_speed: f64,
    pressure: f64,
) -> WeatherObservation {
    WeatherObservation::new(
        temperature,
        precipitation,
        60.0,
        wind_speed,
        pressure,
        day(day_offset),
    )
}

/// Mild day that triggers no hazard rule
pub fn calm_day(day_offset: i64) -> WeatherObservation {
    observation(day_offset, 20.0, 2.0, 5.0, 1013.0)
}

/// `count` consecutive calm days
pub fn calm_days(count: i64) -> Vec<WeatherObservation> {
    (0..count).map(calm_day).collect()
}

/// `count` consecutive days at a constant temperature with calm wind and no rain
pub fn hot_days(count: i64, temperature: f64) -> Vec<WeatherObservation> {
    (0..count)
        .map(|d| observation(d, temperature, 0.0, 5.0, 1013.0))
        .collect()
}

/// Deterministic daily history with a yearly temperature cycle and a weekly rain cycle
pub fn seasonal_history(days: i64) -> HistoricalWindow {
    let observations = (0..days)
        .map(|d| {
            let phase = TAU * (d % 365) as f64 / 365.0;
            let temperature = 10.0f64.mul_add(phase.sin(), 15.0) + 0.001 * d as f64;
            let precipitation = [0.0, 1.0, 8.0, 25.0, 3.0, 0.0, 12.0][(d % 7) as usize];
            let wind = 4.0 + (d % 5) as f64;
            WeatherObservation::new(
                temperature,
                precipitation,
                55.0 + (d % 11) as f64,
                wind,
                1010.0 + (d % 3) as f64,
                day(d),
            )
        })
        .collect();
    HistoricalWindow::new(observations)
}

/// Slice of a window as a new window
pub fn window_slice(history: &HistoricalWindow, start: usize, len: usize) -> HistoricalWindow {
    HistoricalWindow::new(history.observations()[start..start + len].to_vec())
}

/// Service with default settings over the given history store
pub fn service_with_store(store: Arc<dyn HistoricalStore>) -> ClimateRiskService {
    init_test_logging();
    ClimateRiskService::new(Arc::new(PredictorRegistry::new()), store)
}

/// Service with default settings and an empty history store
pub fn service() -> ClimateRiskService {
    service_with_store(Arc::new(InMemoryHistoricalStore::new()))
}
