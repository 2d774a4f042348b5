// ABOUTME: Predictor registry holding one model slot per learned hazard
// ABOUTME: Assessments run on Arc snapshots; retraining swaps the pointer under a short write lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Predictor Registry
//!
//! The registry is an explicit value owned by the service. Each learned hazard
//! has a slot holding `RwLock<Arc<LearnedModel>>`. A [`RegistrySnapshot`] clones the
//! `Arc`s once, so a running assessment never observes a half-installed model.
//! Training fits a brand-new model without holding any lock and only then takes
//! the write lock to replace the pointer. Each slot also keeps a bounded history
//! of training runs with their cross-validation metrics.

use crate::config::EnsembleConfig;
use crate::error::PredictorError;
use crate::errors::{ClimateError, ClimateResult};
use crate::features::{columns, FeatureExtractor, FeatureMatrix};
use crate::models::{HazardType, LocationProfile, WeatherObservation};
use crate::predictors::{
    cross_validate, is_learned, BlackoutPredictor, CrossValidation, EnsembleModel,
    HazardPredictor, HeatwavePredictor, LandslidePredictor, LearnedModel, LearnedPredictor,
    ModelMetrics, Prediction, LEARNED_HAZARDS,
};
use chrono::{DateTime, Utc};
use nalgebra::DVector;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::info;

/// Model slot for one learned hazard
#[derive(Debug)]
struct LearnedSlot {
    model: RwLock<Arc<LearnedModel>>,
    version: AtomicU64,
    history: Mutex<VecDeque<TrainingReport>>,
}

impl LearnedSlot {
    fn new() -> Self {
        Self {
            model: RwLock::new(Arc::new(LearnedModel::Baseline)),
            version: AtomicU64::new(0),
            history: Mutex::new(VecDeque::new()),
        }
    }

    fn record(&self, report: TrainingReport, limit: usize) {
        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        history.push_back(report);
        while history.len() > limit {
            history.pop_front();
        }
    }

    fn current(&self) -> Arc<LearnedModel> {
        Arc::clone(&self.model.read().unwrap_or_else(PoisonError::into_inner))
    }
}

/// Summary of a completed training run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainingReport {
    /// Hazard that was retrained
    pub hazard: HazardType,
    /// Model version now installed
    pub version: u64,
    /// Rows used for training
    pub training_rows: usize,
    /// Ensemble members fitted
    pub members: usize,
    /// When the model was installed
    pub trained_at: DateTime<Utc>,
    /// K-fold metrics, absent when disabled or the data is too small
    pub cross_validation: Option<CrossValidation>,
}

/// Registry of hazard predictors with swappable learned models
#[derive(Debug)]
pub struct PredictorRegistry {
    slots: BTreeMap<HazardType, LearnedSlot>,
    ensemble: EnsembleConfig,
}

impl Default for PredictorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PredictorRegistry {
    /// Registry with baseline models and default ensemble settings
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EnsembleConfig::default())
    }

    /// Registry with explicit ensemble settings
    #[must_use]
    pub fn with_config(ensemble: EnsembleConfig) -> Self {
        let slots = LEARNED_HAZARDS
            .into_iter()
            .map(|hazard| (hazard, LearnedSlot::new()))
            .collect();
        Self { slots, ensemble }
    }

    /// Capture the current model of every hazard
    #[must_use]
    pub fn snapshot(&self) -> RegistrySnapshot {
        let mut predictors: Vec<Arc<dyn HazardPredictor>> = Vec::with_capacity(HazardType::ALL.len());
        let mut versions = BTreeMap::new();

        for hazard in HazardType::ALL {
            match hazard {
                HazardType::Heatwave => predictors.push(Arc::new(HeatwavePredictor)),
                HazardType::Blackout => predictors.push(Arc::new(BlackoutPredictor)),
                HazardType::Landslide => predictors.push(Arc::new(LandslidePredictor)),
                HazardType::Flood | HazardType::Hurricane | HazardType::Drought => {
                    let (model, version) = self.slots.get(&hazard).map_or_else(
                        || (Arc::new(LearnedModel::Baseline), 0),
                        |slot| {
                            let guard = slot.model.read().unwrap_or_else(PoisonError::into_inner);
                            (Arc::clone(&guard), slot.version.load(Ordering::Acquire))
                        },
                    );
                    versions.insert(hazard, version);
                    predictors.push(Arc::new(LearnedPredictor::new(hazard, model)));
                }
            }
        }

        RegistrySnapshot {
            predictors,
            versions,
        }
    }

    /// Train a new model for a learned hazard and install it
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` for formula hazards, matrices without
    /// location columns, or training data rejected by the ensemble
    pub fn train(
        &self,
        hazard: HazardType,
        features: &FeatureMatrix,
        targets: &[f64],
    ) -> ClimateResult<TrainingReport> {
        let slot = self.slots.get(&hazard).ok_or_else(|| {
            ClimateError::validation(format!("{hazard} uses a fixed formula and cannot be trained"))
        })?;
        if features.columns() != columns::SPATIAL_WIDTH {
            return Err(ClimateError::validation(format!(
                "training features need {} columns, got {}",
                columns::SPATIAL_WIDTH,
                features.columns()
            )));
        }

        let model = EnsembleModel::fit(features, targets, &self.ensemble)?;
        let cross_validation = cross_validate(features, targets, &self.ensemble)?;
        let report_rows = model.training_rows();
        let members = model.member_count();
        let replacement = Arc::new(LearnedModel::Fitted(model));

        let version = {
            let mut guard = slot.model.write().unwrap_or_else(PoisonError::into_inner);
            *guard = replacement;
            slot.version.fetch_add(1, Ordering::AcqRel) + 1
        };

        info!(
            hazard = %hazard,
            version,
            training_rows = report_rows,
            members,
            cv_r_squared = cross_validation.as_ref().map(|cv| cv.mean_r_squared),
            cv_rmse = cross_validation.as_ref().map(|cv| cv.mean_rmse),
            "Installed retrained hazard model"
        );

        let report = TrainingReport {
            hazard,
            version,
            training_rows: report_rows,
            members,
            trained_at: Utc::now(),
            cross_validation,
        };
        slot.record(report.clone(), self.ensemble.metrics_history);
        Ok(report)
    }

    /// Score the installed model for a hazard against labelled rows
    ///
    /// Every row is scored on its own, so untrained hazards are measured with
    /// their baseline formula.
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` for formula hazards or mismatched
    /// lengths, and `ClimateError::PredictorFailure` if a row cannot be scored
    pub fn evaluate(
        &self,
        hazard: HazardType,
        features: &FeatureMatrix,
        targets: &[f64],
    ) -> ClimateResult<ModelMetrics> {
        let slot = self.slots.get(&hazard).ok_or_else(|| {
            ClimateError::validation(format!("{hazard} uses a fixed formula and has no model"))
        })?;
        if features.len() != targets.len() {
            return Err(ClimateError::validation(format!(
                "{} feature rows but {} targets",
                features.len(),
                targets.len()
            )));
        }

        let predictor = LearnedPredictor::new(hazard, slot.current());
        let predicted = (0..features.len())
            .map(|row| {
                predictor
                    .predict(&features.select_rows(&[row]))
                    .map(|prediction| prediction.score)
            })
            .collect::<Result<Vec<f64>, PredictorError>>()?;

        ModelMetrics::from_predictions(
            &DVector::from_vec(predicted),
            &DVector::from_column_slice(targets),
        )
        .ok_or_else(|| ClimateError::validation("evaluation needs at least one row"))
    }

    /// Training runs for a hazard, oldest first
    #[must_use]
    pub fn metrics_history(&self, hazard: HazardType) -> Vec<TrainingReport> {
        self.slots.get(&hazard).map_or_else(Vec::new, |slot| {
            slot.history
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .cloned()
                .collect()
        })
    }

    /// Number of models installed for a hazard, 0 for formula hazards
    #[must_use]
    pub fn model_version(&self, hazard: HazardType) -> u64 {
        self.slots
            .get(&hazard)
            .map_or(0, |slot| slot.version.load(Ordering::Acquire))
    }

    /// Whether a fitted model is installed for a hazard
    #[must_use]
    pub fn is_trained(&self, hazard: HazardType) -> bool {
        is_learned(hazard)
            && self
                .slots
                .get(&hazard)
                .is_some_and(|slot| slot.current().is_fitted())
    }
}

/// Immutable set of predictors captured from a registry
#[derive(Clone)]
pub struct RegistrySnapshot {
    predictors: Vec<Arc<dyn HazardPredictor>>,
    versions: BTreeMap<HazardType, u64>,
}

impl RegistrySnapshot {
    /// Extract features once and score every hazard in parallel
    #[must_use]
    pub fn predict_all(
        &self,
        observations: &[WeatherObservation],
        location: &LocationProfile,
    ) -> BTreeMap<HazardType, Result<Prediction, PredictorError>> {
        let features = FeatureExtractor::extract_batch(observations)
            .matrix
            .with_location(location);
        self.predict_features(&features)
    }

    /// Score every hazard in parallel against a prepared matrix
    #[must_use]
    pub fn predict_features(
        &self,
        features: &FeatureMatrix,
    ) -> BTreeMap<HazardType, Result<Prediction, PredictorError>> {
        self.predictors
            .par_iter()
            .map(|predictor| (predictor.hazard(), predictor.predict(features)))
            .collect()
    }

    /// Model version captured for a learned hazard
    #[must_use]
    pub fn version(&self, hazard: HazardType) -> Option<u64> {
        self.versions.get(&hazard).copied()
    }

    /// Hazards covered by this snapshot
    #[must_use]
    pub fn hazards(&self) -> Vec<HazardType> {
        self.predictors.iter().map(|p| p.hazard()).collect()
    }
}
