// ABOUTME: Per-hazard predictor error caught by the combiner without aborting the assessment
// ABOUTME: Converts into ClimateError::PredictorFailure at crate boundaries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ClimateError;
use crate::models::HazardType;
use thiserror::Error;

/// Failure of a single hazard predictor
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictorError {
    /// No feature rows were supplied
    #[error("{hazard} predictor received no feature rows")]
    EmptyInput {
        /// Hazard being predicted
        hazard: HazardType,
    },

    /// Feature width does not match what the predictor needs
    #[error("{hazard} predictor expected {expected} feature columns, got {actual}")]
    FeatureWidth {
        /// Hazard being predicted
        hazard: HazardType,
        /// Required column count
        expected: usize,
        /// Supplied column count
        actual: usize,
    },

    /// The model produced NaN or infinity
    #[error("{hazard} predictor produced a non-finite score")]
    NonFinite {
        /// Hazard being predicted
        hazard: HazardType,
    },
}

impl PredictorError {
    /// Hazard whose predictor failed
    #[must_use]
    pub const fn hazard(&self) -> HazardType {
        match self {
            Self::EmptyInput { hazard }
            | Self::FeatureWidth { hazard, .. }
            | Self::NonFinite { hazard } => *hazard,
        }
    }
}

impl From<PredictorError> for ClimateError {
    fn from(error: PredictorError) -> Self {
        Self::predictor_failure(error.hazard().as_str(), error.to_string())
    }
}
