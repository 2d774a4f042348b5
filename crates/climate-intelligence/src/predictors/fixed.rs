// ABOUTME: Fixed-formula predictors for blackout, heatwave, and landslide hazards
// ABOUTME: Stateless and certain, so they never need training or snapshots
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{check_input, check_output, formulas, HazardPredictor, Prediction};
use crate::error::PredictorError;
use crate::features::FeatureMatrix;
use crate::models::HazardType;

/// Power infrastructure failure from wind, heat, and heavy rain exceedances
#[derive(Debug, Clone, Copy, Default)]
pub struct BlackoutPredictor;

impl HazardPredictor for BlackoutPredictor {
    fn hazard(&self) -> HazardType {
        HazardType::Blackout
    }

    fn requires_spatial_context(&self) -> bool {
        false
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Prediction, PredictorError> {
        check_input(HazardType::Blackout, features, false)?;
        check_output(
            HazardType::Blackout,
            Prediction::certain(formulas::blackout_score(features)),
        )
    }
}

/// Sustained heat from the mean temperature
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatwavePredictor;

impl HazardPredictor for HeatwavePredictor {
    fn hazard(&self) -> HazardType {
        HazardType::Heatwave
    }

    fn requires_spatial_context(&self) -> bool {
        false
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Prediction, PredictorError> {
        check_input(HazardType::Heatwave, features, false)?;
        check_output(
            HazardType::Heatwave,
            Prediction::certain(formulas::heatwave_score(features)),
        )
    }
}

/// Slope failure from saturation and relief
#[derive(Debug, Clone, Copy, Default)]
pub struct LandslidePredictor;

impl HazardPredictor for LandslidePredictor {
    fn hazard(&self) -> HazardType {
        HazardType::Landslide
    }

    fn requires_spatial_context(&self) -> bool {
        true
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Prediction, PredictorError> {
        check_input(HazardType::Landslide, features, true)?;
        check_output(
            HazardType::Landslide,
            Prediction::certain(formulas::landslide_score(features)),
        )
    }
}
