// ABOUTME: Scoring configuration for risk combination and duration estimation
// ABOUTME: Per-hazard confidence thresholds, overall-risk weights, and duration triggers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Scoring Configuration
//!
//! Defaults reproduce the fixed tables in [`crate::constants`]. A hazard missing
//! from the weight table falls back to `default_weight`.

use crate::constants::{confidence, duration, hazard_thresholds, weights};
use crate::models::HazardType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Risk combiner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinerConfig {
    /// Confidence below these thresholds is forced to zero
    pub confidence_thresholds: BTreeMap<HazardType, f64>,
    /// Weights for the overall weighted average
    pub weights: BTreeMap<HazardType, f64>,
    /// Weight for hazards absent from `weights`
    pub default_weight: f64,
    /// Hours added after the latest observation to close the validity window
    pub validity_horizon_hours: i64,
}

impl CombinerConfig {
    /// Confidence threshold for a hazard
    #[must_use]
    pub fn confidence_threshold(&self, hazard: HazardType) -> f64 {
        self.confidence_thresholds
            .get(&hazard)
            .copied()
            .unwrap_or_else(|| default_confidence_threshold(hazard))
    }

    /// Overall-risk weight for a hazard
    #[must_use]
    pub fn weight(&self, hazard: HazardType) -> f64 {
        self.weights
            .get(&hazard)
            .copied()
            .unwrap_or(self.default_weight)
    }
}

const fn default_confidence_threshold(hazard: HazardType) -> f64 {
    match hazard {
        HazardType::Flood => confidence::FLOOD,
        HazardType::Heatwave => confidence::HEATWAVE,
        HazardType::Hurricane => confidence::HURRICANE,
        HazardType::Drought => confidence::DROUGHT,
        HazardType::Landslide => confidence::LANDSLIDE,
        HazardType::Blackout => confidence::BLACKOUT,
    }
}

impl Default for CombinerConfig {
    fn default() -> Self {
        let confidence_thresholds = HazardType::ALL
            .into_iter()
            .map(|hazard| (hazard, default_confidence_threshold(hazard)))
            .collect();
        // Blackout has no table entry and uses the default weight
        let weights = BTreeMap::from([
            (HazardType::Flood, weights::FLOOD),
            (HazardType::Heatwave, weights::HEATWAVE),
            (HazardType::Hurricane, weights::HURRICANE),
            (HazardType::Drought, weights::DROUGHT),
            (HazardType::Landslide, weights::LANDSLIDE),
        ]);
        Self {
            confidence_thresholds,
            weights,
            default_weight: weights::DEFAULT,
            validity_horizon_hours: 24,
        }
    }
}

/// Duration estimator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DurationConfig {
    /// Temperature above which a day counts as a risk day (°C)
    pub heat_temperature_c: f64,
    /// Precipitation above which a day counts as a risk day (mm)
    pub flood_precipitation_mm: f64,
    /// Minimum heatwave duration (days)
    pub heatwave_min_days: u32,
    /// Days added to consecutive risk days for floods
    pub flood_extra_days: u32,
    /// Maximum flood duration (days)
    pub flood_max_days: u32,
    /// Standard hurricane duration (days)
    pub hurricane_days: u32,
    /// Maximum blackout duration (days)
    pub blackout_max_days: u32,
}

impl Default for DurationConfig {
    fn default() -> Self {
        Self {
            heat_temperature_c: hazard_thresholds::HEATWAVE_TEMPERATURE_C,
            flood_precipitation_mm: hazard_thresholds::FLOOD_PRECIPITATION_MM,
            heatwave_min_days: duration::HEATWAVE_MIN_DAYS,
            flood_extra_days: duration::FLOOD_EXTRA_DAYS,
            flood_max_days: duration::FLOOD_MAX_DAYS,
            hurricane_days: duration::HURRICANE_DAYS,
            blackout_max_days: duration::BLACKOUT_MAX_DAYS,
        }
    }
}
