// ABOUTME: Emergency action recommendations in critical, important, and preparatory tiers
// ABOUTME: Critical on any extreme score, important on blackout risk, preparatory always
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::RecommendationConfig;
use crate::constants::catalog::{backup_power, communication_plan, evacuation};
use crate::health_impact::HealthHazards;
use crate::models::{HazardType, LocationProfile};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single recommended action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionItem {
    /// What to do
    pub action: String,
    /// Priority, 1 is most urgent
    pub priority: u8,
    /// When to do it
    pub timeline: String,
    /// What is needed
    pub resources: Vec<String>,
}

impl ActionItem {
    fn from_catalog(action: &str, priority: u8, timeline: &str, resources: &[&str]) -> Self {
        Self {
            action: action.to_owned(),
            priority,
            timeline: timeline.to_owned(),
            resources: resources.iter().map(|r| (*r).to_owned()).collect(),
        }
    }
}

/// Recommended actions grouped by tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Act now
    pub critical: Vec<ActionItem>,
    /// Act within a day
    pub important: Vec<ActionItem>,
    /// Act within days
    pub preparatory: Vec<ActionItem>,
}

impl Recommendations {
    /// Number of actions across all tiers
    #[must_use]
    pub fn total(&self) -> usize {
        self.critical.len() + self.important.len() + self.preparatory.len()
    }

    /// Every action ordered by priority
    #[must_use]
    pub fn all_sorted(&self) -> Vec<&ActionItem> {
        let mut all: Vec<&ActionItem> = self
            .critical
            .iter()
            .chain(&self.important)
            .chain(&self.preparatory)
            .collect();
        all.sort_by_key(|item| item.priority);
        all
    }
}

/// Generates tiered action recommendations
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Engine with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit thresholds
    #[must_use]
    pub const fn with_config(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Recommend actions for the given risk scores
    ///
    /// Health hazards and location are accepted for callers that already hold
    /// them; the tier rules depend on scores only.
    #[must_use]
    pub fn recommend(
        &self,
        risks: &BTreeMap<HazardType, f64>,
        _health: &HealthHazards,
        _location: &LocationProfile,
    ) -> Recommendations {
        let mut recommendations = Recommendations::default();

        if risks.values().any(|&score| score > self.config.critical_score) {
            recommendations.critical.push(ActionItem::from_catalog(
                evacuation::ACTION,
                evacuation::PRIORITY,
                evacuation::TIMELINE,
                &evacuation::RESOURCES,
            ));
        }

        let blackout = risks.get(&HazardType::Blackout).copied().unwrap_or(0.0);
        if blackout > self.config.blackout_important {
            recommendations.important.push(ActionItem::from_catalog(
                backup_power::ACTION,
                backup_power::PRIORITY,
                backup_power::TIMELINE,
                &backup_power::RESOURCES,
            ));
        }

        recommendations.preparatory.push(ActionItem::from_catalog(
            communication_plan::ACTION,
            communication_plan::PRIORITY,
            communication_plan::TIMELINE,
            &communication_plan::RESOURCES,
        ));

        recommendations
    }
}
