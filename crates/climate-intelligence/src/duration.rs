// ABOUTME: Hazard duration estimates from counted risk days and blackout severity
// ABOUTME: Pure arithmetic over the observation sequence; empty input yields an empty map
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_possible_truncation)] // Safe: blackout days are bounded by the cap
#![allow(clippy::cast_sign_loss)] // Safe: severity is clipped to [0, 1]

use crate::config::DurationConfig;
use crate::constants::duration::{BLACKOUT_BASE_DAYS, BLACKOUT_SEVERITY_DAYS};
use crate::models::{HazardType, WeatherObservation};
use crate::predictors::formulas;
use std::collections::BTreeMap;

/// Estimates how many days each hazard lasts
#[derive(Debug, Clone, Default)]
pub struct DurationEstimator {
    config: DurationConfig,
}

impl DurationEstimator {
    /// Estimator with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimator with explicit thresholds
    #[must_use]
    pub const fn with_config(config: DurationConfig) -> Self {
        Self { config }
    }

    /// Days with heat or heavy rain, inspecting every observation but the last
    #[must_use]
    pub fn risk_days(&self, observations: &[WeatherObservation]) -> u32 {
        let inspected = observations.len().saturating_sub(1);
        let days = observations[..inspected]
            .iter()
            .filter(|obs| {
                obs.temperature() > self.config.heat_temperature_c
                    || obs.precipitation() > self.config.flood_precipitation_mm
            })
            .count();
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Blackout duration from the clipped blackout severity
    #[must_use]
    pub fn blackout_days(&self, observations: &[WeatherObservation]) -> u32 {
        let severity = formulas::blackout_severity(observations);
        let days = BLACKOUT_SEVERITY_DAYS.mul_add(severity, BLACKOUT_BASE_DAYS).floor() as u32;
        days.min(self.config.blackout_max_days)
    }

    /// Estimate durations for heatwave, flood, hurricane, and blackout
    #[must_use]
    pub fn estimate(&self, observations: &[WeatherObservation]) -> BTreeMap<HazardType, u32> {
        if observations.is_empty() {
            return BTreeMap::new();
        }

        let risk_days = self.risk_days(observations);
        BTreeMap::from([
            (
                HazardType::Heatwave,
                risk_days.max(self.config.heatwave_min_days),
            ),
            (
                HazardType::Flood,
                risk_days
                    .saturating_add(self.config.flood_extra_days)
                    .min(self.config.flood_max_days),
            ),
            (HazardType::Hurricane, self.config.hurricane_days),
            (HazardType::Blackout, self.blackout_days(observations)),
        ])
    }
}
