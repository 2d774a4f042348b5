// ABOUTME: Maps hazard scores to immediate, ongoing, and long-term health hazards
// ABOUTME: Also derives a population vulnerability multiplier from location indicators
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::HealthConfig;
use crate::constants::catalog::{
    BLACKOUT_LONGTERM_HAZARDS, FLOOD_IMMEDIATE_HAZARDS, HEATWAVE_ONGOING_HAZARDS,
};
use crate::constants::health::{
    AIR_QUALITY_SENSITIVITY_FACTOR, ELDERLY_POPULATION_FACTOR, HEALTHCARE_ACCESS_FACTOR,
    VULNERABILITY_INDICATOR_THRESHOLD,
};
use crate::models::{HazardType, LocationProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Health hazards grouped by time horizon
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthHazards {
    /// Hazards requiring immediate attention
    pub immediate: Vec<String>,
    /// Hazards persisting while conditions last
    pub ongoing: Vec<String>,
    /// Hazards with lasting effects
    pub longterm: Vec<String>,
    /// Population vulnerability multiplier (1.0 = baseline)
    pub vulnerability_score: f64,
}

impl HealthHazards {
    /// Total number of listed hazards
    #[must_use]
    pub fn total(&self) -> usize {
        self.immediate.len() + self.ongoing.len() + self.longterm.len()
    }
}

/// Maps risk scores to health hazard categories
#[derive(Debug, Clone, Default)]
pub struct HealthImpactMapper {
    config: HealthConfig,
}

impl HealthImpactMapper {
    /// Mapper with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapper with explicit thresholds
    #[must_use]
    pub const fn with_config(config: HealthConfig) -> Self {
        Self { config }
    }

    /// Categorize health hazards; each category is decided independently
    #[must_use]
    pub fn map(
        &self,
        risks: &BTreeMap<HazardType, f64>,
        location: &LocationProfile,
    ) -> HealthHazards {
        let score = |hazard: HazardType| risks.get(&hazard).copied().unwrap_or(0.0);
        let catalog = |entries: [&str; 3], applies: bool| -> Vec<String> {
            if applies {
                entries.iter().map(|s| (*s).to_owned()).collect()
            } else {
                Vec::new()
            }
        };

        HealthHazards {
            immediate: catalog(
                FLOOD_IMMEDIATE_HAZARDS,
                score(HazardType::Flood) > self.config.flood_immediate,
            ),
            ongoing: catalog(
                HEATWAVE_ONGOING_HAZARDS,
                score(HazardType::Heatwave) > self.config.heatwave_ongoing,
            ),
            longterm: catalog(
                BLACKOUT_LONGTERM_HAZARDS,
                score(HazardType::Blackout) > self.config.blackout_longterm,
            ),
            vulnerability_score: Self::vulnerability_score(location),
        }
    }

    /// Vulnerability multiplier from `elderly_population`, `healthcare_access`,
    /// and `air_quality_sensitivity` topography indicators
    #[must_use]
    pub fn vulnerability_score(location: &LocationProfile) -> f64 {
        let indicator = |name: &str| {
            location
                .topography_feature(name)
                .is_some_and(|value| value > VULNERABILITY_INDICATOR_THRESHOLD)
        };

        let mut score = 1.0;
        if indicator("elderly_population") {
            score *= ELDERLY_POPULATION_FACTOR;
        }
        if indicator("healthcare_access") {
            score *= HEALTHCARE_ACCESS_FACTOR;
        }
        if indicator("air_quality_sensitivity") {
            score *= AIR_QUALITY_SENSITIVITY_FACTOR;
        }
        score
    }
}
