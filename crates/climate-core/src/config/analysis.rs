// ABOUTME: Analysis configuration for health impact, recommendations, history, and ensembles
// ABOUTME: Trigger thresholds, analogue search limits, and bagged ridge learner settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{ensemble, health, historical, recommendations};
use serde::{Deserialize, Serialize};

/// Health impact trigger thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthConfig {
    /// Flood score above which immediate hazards apply
    pub flood_immediate: f64,
    /// Heatwave score above which ongoing hazards apply
    pub heatwave_ongoing: f64,
    /// Blackout score above which long-term hazards apply
    pub blackout_longterm: f64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            flood_immediate: health::FLOOD_IMMEDIATE,
            heatwave_ongoing: health::HEATWAVE_ONGOING,
            blackout_longterm: health::BLACKOUT_LONGTERM,
        }
    }
}

/// Recommendation trigger thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Any score above this adds critical actions
    pub critical_score: f64,
    /// Blackout score above this adds important actions
    pub blackout_important: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            critical_score: recommendations::CRITICAL_SCORE,
            blackout_important: recommendations::BLACKOUT_IMPORTANT,
        }
    }
}

/// Historical analysis settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalConfig {
    /// Seasonal period in samples
    pub seasonal_period: usize,
    /// Full cycles required before decomposing
    pub min_cycles: usize,
    /// Analogue windows must exceed this similarity
    pub similarity_threshold: f64,
    /// Maximum analogue matches returned
    pub max_matches: usize,
    /// |z-score| at or above which a sample is reported as extreme
    pub extreme_z_score: f64,
    /// Maximum extremes listed per variable
    pub max_extremes_per_variable: usize,
}

impl HistoricalConfig {
    /// Samples needed for a seasonal decomposition
    #[must_use]
    pub const fn required_samples(&self) -> usize {
        self.seasonal_period.saturating_mul(self.min_cycles)
    }
}

impl Default for HistoricalConfig {
    fn default() -> Self {
        Self {
            seasonal_period: historical::SEASONAL_PERIOD,
            min_cycles: historical::MIN_CYCLES,
            similarity_threshold: historical::SIMILARITY_THRESHOLD,
            max_matches: historical::MAX_MATCHES,
            extreme_z_score: historical::EXTREME_Z_SCORE,
            max_extremes_per_variable: historical::MAX_EXTREMES_PER_VARIABLE,
        }
    }
}

/// Bagged ridge ensemble settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnsembleConfig {
    /// Bootstrap members
    pub members: usize,
    /// Ridge regularization strength
    pub ridge_lambda: f64,
    /// Seed for bootstrap resampling
    pub seed: u64,
    /// Minimum training rows
    pub min_training_rows: usize,
    /// Cross-validation folds, 0 disables cross-validation
    pub cv_folds: usize,
    /// Training runs retained per hazard
    pub metrics_history: usize,
}

impl Default for EnsembleConfig {
    fn default() -> Self {
        Self {
            members: ensemble::MEMBERS,
            ridge_lambda: ensemble::RIDGE_LAMBDA,
            seed: ensemble::SEED,
            min_training_rows: ensemble::MIN_TRAINING_ROWS,
            cv_folds: ensemble::CV_FOLDS,
            metrics_history: ensemble::METRICS_HISTORY,
        }
    }
}
