// ABOUTME: Historical analysis over long-run records: trends, seasonality, extremes, analogues
// ABOUTME: Sliding-window similarity search ranks past episodes resembling current conditions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: window sizes are far below 2^52

//! # Historical Analogue Engine
//!
//! Analogue search slides a window the length of the current observations over
//! the whole history, one sample at a time. Both series are z-scaled with the
//! history's per-variable mean and standard deviation, and each window is scored
//! as `1 / (1 + rms_distance)`. Window scoring runs on the rayon pool; ranking is
//! a deterministic sort on (similarity desc, start index asc).

use crate::config::HistoricalConfig;
use crate::decomposition::{SeasonalDecomposer, SeasonalDecomposition};
use crate::errors::InsufficientHistory;
use crate::models::{
    AnalogueMatch, AnalogueOutcome, ClimateVariable, HistoricalWindow, LocationProfile, RiskLevel,
};
use crate::predictors::formulas;
use crate::statistical_analysis::{RegressionResult, StatisticalAnalyzer};
use chrono::NaiveDate;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Variables that get trend lines and extreme-value listings
pub const TREND_VARIABLES: [ClimateVariable; 3] = [
    ClimateVariable::Temperature,
    ClimateVariable::Precipitation,
    ClimateVariable::WindSpeed,
];

/// Variables that get a seasonal decomposition
pub const SEASONAL_VARIABLES: [ClimateVariable; 2] =
    [ClimateVariable::Temperature, ClimateVariable::Precipitation];

/// A sample far from its series mean
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeEvent {
    /// Observation date
    pub date: NaiveDate,
    /// Observed value
    pub value: f64,
    /// Standard score
    pub z_score: f64,
}

/// Full historical analysis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoricalReport {
    /// Linear trend per variable
    pub trends: BTreeMap<ClimateVariable, RegressionResult>,
    /// Seasonal decompositions, or why they were skipped
    pub seasonality: Result<BTreeMap<ClimateVariable, SeasonalDecomposition>, InsufficientHistory>,
    /// Extreme samples per variable, largest |z| first
    pub extremes: BTreeMap<ClimateVariable, Vec<ExtremeEvent>>,
    /// Ranked analogue matches
    pub analogues: Vec<AnalogueMatch>,
}

/// Scaling applied to each variable before computing distances
#[derive(Debug, Clone, Copy)]
struct Scale {
    mean: f64,
    std_dev: f64,
}

/// Historical analysis engine
#[derive(Debug, Clone, Default)]
pub struct HistoricalAnalogueEngine {
    config: HistoricalConfig,
    location: Option<LocationProfile>,
}

impl HistoricalAnalogueEngine {
    /// Engine with default settings and sea-level outcome scoring
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with explicit settings
    #[must_use]
    pub const fn with_config(config: HistoricalConfig) -> Self {
        Self {
            config,
            location: None,
        }
    }

    /// Score analogue outcomes for this location (elevation affects flood and landslide)
    #[must_use]
    pub fn for_location(mut self, location: LocationProfile) -> Self {
        self.location = Some(location);
        self
    }

    /// Active settings
    #[must_use]
    pub const fn config(&self) -> &HistoricalConfig {
        &self.config
    }

    /// Run every analysis phase
    ///
    /// Analogues are searched even when the history is too short to decompose.
    #[must_use]
    pub fn analyze(
        &self,
        history: &HistoricalWindow,
        current: &HistoricalWindow,
    ) -> HistoricalReport {
        let seasonality = self.decompose(history);
        match &seasonality {
            Ok(decompositions) => debug!(
                variables = decompositions.len(),
                samples = history.len(),
                "Decomposed historical series"
            ),
            Err(insufficient) => debug!(
                required = insufficient.required,
                available = insufficient.available,
                "Skipping seasonal decomposition"
            ),
        }

        HistoricalReport {
            trends: Self::trends(history),
            seasonality,
            extremes: self.extremes(history),
            analogues: self.find_analogues(history, current),
        }
    }

    /// Linear trends for temperature, precipitation, and wind speed
    #[must_use]
    pub fn trends(history: &HistoricalWindow) -> BTreeMap<ClimateVariable, RegressionResult> {
        TREND_VARIABLES
            .into_iter()
            .filter_map(|variable| {
                StatisticalAnalyzer::linear_regression(&history.series(variable))
                    .ok()
                    .map(|regression| (variable, regression))
            })
            .collect()
    }

    /// Seasonal decomposition of temperature and precipitation
    ///
    /// # Errors
    ///
    /// Returns `InsufficientHistory` when the history covers fewer than the
    /// configured number of seasonal cycles
    pub fn decompose(
        &self,
        history: &HistoricalWindow,
    ) -> Result<BTreeMap<ClimateVariable, SeasonalDecomposition>, InsufficientHistory> {
        let decomposer = SeasonalDecomposer::new(self.config.seasonal_period)
            .with_min_cycles(self.config.min_cycles);
        SEASONAL_VARIABLES
            .into_iter()
            .map(|variable| {
                decomposer
                    .decompose(&history.series(variable))
                    .map(|decomposition| (variable, decomposition))
            })
            .collect()
    }

    /// Samples with |z| at or above the configured threshold, capped per variable
    #[must_use]
    pub fn extremes(
        &self,
        history: &HistoricalWindow,
    ) -> BTreeMap<ClimateVariable, Vec<ExtremeEvent>> {
        TREND_VARIABLES
            .into_iter()
            .map(|variable| {
                let z_scores = StatisticalAnalyzer::z_scores(&history.series(variable));
                let mut events: Vec<(usize, ExtremeEvent)> = history
                    .observations()
                    .iter()
                    .zip(z_scores)
                    .enumerate()
                    .filter(|(_, (_, z))| z.abs() >= self.config.extreme_z_score)
                    .map(|(index, (obs, z_score))| {
                        (
                            index,
                            ExtremeEvent {
                                date: obs.timestamp().date_naive(),
                                value: variable.value(obs),
                                z_score,
                            },
                        )
                    })
                    .collect();
                events.sort_by(|(ia, a), (ib, b)| {
                    b.z_score
                        .abs()
                        .total_cmp(&a.z_score.abs())
                        .then(ia.cmp(ib))
                });
                events.truncate(self.config.max_extremes_per_variable);
                (variable, events.into_iter().map(|(_, e)| e).collect())
            })
            .collect()
    }

    /// Rank past windows by similarity to the current conditions
    #[must_use]
    pub fn find_analogues(
        &self,
        history: &HistoricalWindow,
        current: &HistoricalWindow,
    ) -> Vec<AnalogueMatch> {
        let window = current.len();
        if window == 0 || history.is_empty() || history.len() < window {
            return Vec::new();
        }

        let scales: Vec<Scale> = ClimateVariable::ALL
            .iter()
            .map(|variable| {
                let moments = StatisticalAnalyzer::moments(&history.series(*variable));
                moments.map_or(
                    Scale {
                        mean: 0.0,
                        std_dev: 1.0,
                    },
                    |m| Scale {
                        mean: m.mean,
                        std_dev: if m.std_dev > f64::EPSILON { m.std_dev } else { 1.0 },
                    },
                )
            })
            .collect();
        let history_scaled = scaled_series(history, &scales);
        let current_scaled = scaled_series(current, &scales);

        let mut candidates: Vec<(usize, f64)> = (0..=history.len() - window)
            .into_par_iter()
            .map(|start| (start, similarity(&history_scaled, &current_scaled, start, window)))
            .filter(|(_, sim)| *sim > self.config.similarity_threshold)
            .collect();

        candidates.sort_by(|(sa, a), (sb, b)| b.total_cmp(a).then(sa.cmp(sb)));
        candidates.truncate(self.config.max_matches);

        candidates
            .into_iter()
            .filter_map(|(start, similarity)| {
                let start_date = history.observations()[start].timestamp().date_naive();
                Some(AnalogueMatch {
                    start_date,
                    start_index: start,
                    similarity,
                    outcome: self.outcome(history, start, window)?,
                })
            })
            .collect()
    }

    /// Hazard levels realized in the days after a window, or in the window itself
    fn outcome(
        &self,
        history: &HistoricalWindow,
        start: usize,
        window: usize,
    ) -> Option<AnalogueOutcome> {
        let observations = history.observations();
        let after = start + window;
        let end = (after + window).min(observations.len());
        let following = &observations[after.min(end)..end];
        let (inspected, from_subsequent) = if following.is_empty() {
            (&observations[start..after], false)
        } else {
            (following, true)
        };
        if inspected.is_empty() {
            return None;
        }

        let hazard_scores = formulas::deterministic_scores(inspected, self.location.as_ref());
        let hazard_levels = hazard_scores
            .iter()
            .map(|(hazard, score)| (*hazard, RiskLevel::from_score(*score)))
            .collect();

        Some(AnalogueOutcome {
            hazard_levels,
            hazard_scores,
            observed_days: inspected.len(),
            from_subsequent,
        })
    }
}

/// Per-variable z-scaled series, indexed `[variable][sample]`
fn scaled_series(window: &HistoricalWindow, scales: &[Scale]) -> Vec<Vec<f64>> {
    ClimateVariable::ALL
        .iter()
        .zip(scales)
        .map(|(variable, scale)| {
            window
                .series(*variable)
                .into_iter()
                .map(|value| (value - scale.mean) / scale.std_dev)
                .collect()
        })
        .collect()
}

/// `1 / (1 + rms)` between the current window and history starting at `start`
fn similarity(history: &[Vec<f64>], current: &[Vec<f64>], start: usize, window: usize) -> f64 {
    let mut squared = 0.0;
    let mut count = 0usize;
    for (hist_var, cur_var) in history.iter().zip(current) {
        for (h, c) in hist_var[start..start + window].iter().zip(cur_var) {
            let diff = h - c;
            squared = diff.mul_add(diff, squared);
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    let rms = (squared / count as f64).sqrt();
    if rms.is_finite() {
        1.0 / (1.0 + rms)
    } else {
        0.0
    }
}
