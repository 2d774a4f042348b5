// ABOUTME: Hazard predictor trait and shared input checks for formula and learned predictors
// ABOUTME: Each hazard is scored by exactly one predictor selected through HazardType
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Hazard Predictors
//!
//! Blackout, heatwave, and landslide are fixed formulas. Flood, hurricane, and
//! drought are learned: they score with a baseline formula until a model has been
//! trained for them, then with a bagged ridge [`EnsembleModel`].

/// Bagged ridge regression ensemble
pub mod ensemble;
/// Cross-validation and held-out evaluation metrics
pub mod evaluation;
/// Predictors for the fixed-formula hazards
pub mod fixed;
/// Hazard formulas shared by predictors, duration, and analogue outcomes
pub mod formulas;
/// Learned predictors backed by a model snapshot
pub mod learned;

pub use ensemble::EnsembleModel;
pub use evaluation::{cross_validate, CrossValidation, ModelMetrics};
pub use fixed::{BlackoutPredictor, HeatwavePredictor, LandslidePredictor};
pub use learned::{is_learned, LearnedModel, LearnedPredictor, LEARNED_HAZARDS};

use crate::error::PredictorError;
use crate::features::{columns, FeatureMatrix};
use crate::models::HazardType;
use serde::{Deserialize, Serialize};

/// Raw predictor output before calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Raw score; flood intensity may exceed 1 before elevation adjustment
    pub score: f64,
    /// Spread of the prediction, 0 for deterministic formulas
    pub uncertainty: f64,
}

impl Prediction {
    /// Prediction with no uncertainty
    #[must_use]
    pub const fn certain(score: f64) -> Self {
        Self {
            score,
            uncertainty: 0.0,
        }
    }
}

/// Scores one hazard from a feature matrix
pub trait HazardPredictor: Send + Sync {
    /// Hazard this predictor scores
    fn hazard(&self) -> HazardType;

    /// Whether rows must carry latitude, longitude, and elevation columns
    fn requires_spatial_context(&self) -> bool;

    /// Score the hazard over the whole matrix
    ///
    /// # Errors
    ///
    /// Returns `PredictorError` if the matrix is empty, too narrow, or the score is not finite
    fn predict(&self, features: &FeatureMatrix) -> Result<Prediction, PredictorError>;
}

/// Reject empty or too-narrow input
pub(crate) fn check_input(
    hazard: HazardType,
    features: &FeatureMatrix,
    spatial: bool,
) -> Result<(), PredictorError> {
    if features.is_empty() {
        return Err(PredictorError::EmptyInput { hazard });
    }
    let expected = if spatial {
        columns::SPATIAL_WIDTH
    } else {
        columns::BASE_WIDTH
    };
    if features.columns() < expected {
        return Err(PredictorError::FeatureWidth {
            hazard,
            expected,
            actual: features.columns(),
        });
    }
    Ok(())
}

/// Reject non-finite output
pub(crate) fn check_output(
    hazard: HazardType,
    prediction: Prediction,
) -> Result<Prediction, PredictorError> {
    if prediction.score.is_finite() && prediction.uncertainty.is_finite() {
        Ok(prediction)
    } else {
        Err(PredictorError::NonFinite { hazard })
    }
}
