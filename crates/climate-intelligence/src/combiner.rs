// ABOUTME: Combines raw predictions into calibrated, confidence-weighted risk scores
// ABOUTME: Applies elevation adjustment, confidence thresholds, and the weighted overall risk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::CombinerConfig;
use crate::error::PredictorError;
use crate::errors::{ClimateError, ClimateResult};
use crate::models::{
    HazardType, LocationProfile, RiskAssessment, RiskScore, ValidityWindow, WeatherObservation,
};
use crate::predictors::{formulas, Prediction};
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Turns per-hazard predictions into a [`RiskAssessment`]
#[derive(Debug, Clone, Default)]
pub struct RiskCombiner {
    config: CombinerConfig,
}

impl RiskCombiner {
    /// Combiner with default thresholds and weights
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Combiner with explicit configuration
    #[must_use]
    pub const fn with_config(config: CombinerConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &CombinerConfig {
        &self.config
    }

    /// Shrink a score by its uncertainty
    #[must_use]
    pub fn calibrate(prediction: Prediction) -> f64 {
        let uncertainty = prediction.uncertainty.clamp(0.0, 1.0);
        (prediction.score * (1.0 - uncertainty)).clamp(0.0, 1.0)
    }

    /// Confidence from distance to 0.5, zeroed below the hazard threshold
    #[must_use]
    pub fn confidence(&self, hazard: HazardType, score: f64) -> f64 {
        let confidence = ((score - 0.5).abs() * 2.0).min(1.0);
        if confidence < self.config.confidence_threshold(hazard) {
            0.0
        } else {
            confidence
        }
    }

    /// Validity window spanning the observations plus the configured horizon
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::NoData` for an empty sequence
    pub fn validity_window(
        &self,
        observations: &[WeatherObservation],
    ) -> ClimateResult<ValidityWindow> {
        let earliest = observations.iter().map(WeatherObservation::timestamp).min();
        let latest = observations.iter().map(WeatherObservation::timestamp).max();
        let (Some(valid_from), Some(latest)) = (earliest, latest) else {
            return Err(ClimateError::no_data("cannot score an empty observation sequence"));
        };
        let valid_to = latest + Duration::hours(self.config.validity_horizon_hours.max(1));
        ValidityWindow::new(valid_from, valid_to)
    }

    /// Build the assessment
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::NoData` for an empty sequence. Predictor errors are
    /// recorded per hazard and never abort the assessment.
    pub fn combine(
        &self,
        raw: &BTreeMap<HazardType, Result<Prediction, PredictorError>>,
        observations: &[WeatherObservation],
        location: &LocationProfile,
        assessed_at: DateTime<Utc>,
    ) -> ClimateResult<RiskAssessment> {
        let window = self.validity_window(observations)?;
        let elevation_factor = formulas::elevation_factor(location.elevation());

        let mut scores = BTreeMap::new();
        let mut failures = BTreeMap::new();
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;

        for (&hazard, result) in raw {
            match result {
                Ok(prediction) => {
                    let raw_score = if hazard == HazardType::Flood {
                        prediction.score * elevation_factor
                    } else {
                        prediction.score
                    };
                    let score = Self::calibrate(Prediction {
                        score: raw_score,
                        uncertainty: prediction.uncertainty,
                    });
                    let confidence = self.confidence(hazard, score);
                    let risk = RiskScore::new(hazard, score, confidence, window)?;

                    let weight = self.config.weight(hazard);
                    weighted_sum = weight.mul_add(risk.score(), weighted_sum);
                    weight_total += weight;

                    debug!(hazard = %hazard, score = risk.score(), confidence, "Scored hazard");
                    scores.insert(hazard, Some(risk));
                }
                Err(error) => {
                    warn!(hazard = %hazard, error = %error, "Hazard predictor failed");
                    failures.insert(hazard, error.to_string());
                    scores.insert(hazard, None);
                }
            }
        }

        let overall = if weight_total > 0.0 {
            weighted_sum / weight_total
        } else {
            0.0
        };

        RiskAssessment::new(scores, failures, overall, assessed_at, window)
    }
}
