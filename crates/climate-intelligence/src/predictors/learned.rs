// ABOUTME: Learned hazard predictors for flood, hurricane, and drought
// ABOUTME: Score with a baseline formula until a fitted ensemble snapshot is installed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ensemble::EnsembleModel;
use super::{check_input, check_output, formulas, HazardPredictor, Prediction};
use crate::error::PredictorError;
use crate::features::FeatureMatrix;
use crate::models::HazardType;
use std::sync::Arc;

/// Model state of a learned hazard slot
#[derive(Debug, Clone, PartialEq)]
pub enum LearnedModel {
    /// Untrained; the deterministic baseline formula applies
    Baseline,
    /// Trained bagged ridge ensemble
    Fitted(EnsembleModel),
}

impl LearnedModel {
    /// Whether a fitted model is installed
    #[must_use]
    pub const fn is_fitted(&self) -> bool {
        matches!(self, Self::Fitted(_))
    }
}

/// Hazards scored by learned models
pub const LEARNED_HAZARDS: [HazardType; 3] =
    [HazardType::Flood, HazardType::Hurricane, HazardType::Drought];

/// Whether a hazard is backed by a learned model
#[must_use]
pub fn is_learned(hazard: HazardType) -> bool {
    LEARNED_HAZARDS.contains(&hazard)
}

/// Predictor bound to one model snapshot
#[derive(Debug, Clone)]
pub struct LearnedPredictor {
    hazard: HazardType,
    model: Arc<LearnedModel>,
}

impl LearnedPredictor {
    /// Bind a hazard to a model snapshot
    #[must_use]
    pub const fn new(hazard: HazardType, model: Arc<LearnedModel>) -> Self {
        Self { hazard, model }
    }

    /// Predictor using the baseline formula
    #[must_use]
    pub fn baseline(hazard: HazardType) -> Self {
        Self::new(hazard, Arc::new(LearnedModel::Baseline))
    }

    /// Model snapshot backing this predictor
    #[must_use]
    pub fn model(&self) -> &LearnedModel {
        &self.model
    }

    fn baseline_score(&self, features: &FeatureMatrix) -> f64 {
        match self.hazard {
            HazardType::Flood => formulas::flood_baseline(features),
            HazardType::Hurricane => formulas::hurricane_baseline(features),
            HazardType::Drought => formulas::drought_baseline(features),
            HazardType::Heatwave => formulas::heatwave_score(features),
            HazardType::Landslide => formulas::landslide_score(features),
            HazardType::Blackout => formulas::blackout_score(features),
        }
    }
}

impl HazardPredictor for LearnedPredictor {
    fn hazard(&self) -> HazardType {
        self.hazard
    }

    fn requires_spatial_context(&self) -> bool {
        true
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Prediction, PredictorError> {
        check_input(self.hazard, features, true)?;

        let prediction = match self.model.as_ref() {
            LearnedModel::Baseline => Prediction::certain(self.baseline_score(features)),
            LearnedModel::Fitted(model) => {
                if features.columns() != model.columns() {
                    return Err(PredictorError::FeatureWidth {
                        hazard: self.hazard,
                        expected: model.columns(),
                        actual: features.columns(),
                    });
                }
                let output = model
                    .predict(features)
                    .ok_or(PredictorError::EmptyInput {
                        hazard: self.hazard,
                    })?;
                Prediction {
                    score: output.mean,
                    uncertainty: output.spread,
                }
            }
        };

        check_output(self.hazard, prediction)
    }
}
