// ABOUTME: Regression metrics for learned hazard models and k-fold cross-validation
// ABOUTME: Folds are contiguous row blocks so results are reproducible for a fixed seed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: row and fold counts are small

use super::ensemble::EnsembleModel;
use crate::config::EnsembleConfig;
use crate::errors::{ClimateError, ClimateResult};
use crate::features::FeatureMatrix;
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use tracing::debug;

/// Goodness of fit on a set of labelled rows
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Rows scored
    pub rows: usize,
    /// Coefficient of determination
    pub r_squared: f64,
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
}

impl ModelMetrics {
    /// Compare predictions against actual targets
    ///
    /// Constant targets give an R² of 1 for a perfect fit and 0 otherwise.
    /// Returns `None` when the lengths differ or there are no rows.
    #[must_use]
    pub fn from_predictions(predicted: &DVector<f64>, actual: &DVector<f64>) -> Option<Self> {
        if predicted.len() != actual.len() || actual.is_empty() {
            return None;
        }
        let n = actual.len() as f64;
        let residuals = actual - predicted;
        let ss_res = residuals.norm_squared();
        let ss_tot = actual.variance() * n;

        let r_squared = if ss_tot > f64::EPSILON {
            1.0 - ss_res / ss_tot
        } else if ss_res <= f64::EPSILON {
            1.0
        } else {
            0.0
        };

        Some(Self {
            rows: actual.len(),
            r_squared,
            rmse: (ss_res / n).sqrt(),
            mae: residuals.iter().fold(0.0, |acc, r| acc + r.abs()) / n,
        })
    }
}

/// Averaged k-fold cross-validation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossValidation {
    /// Metrics on each held-out fold, in row order
    pub folds: Vec<ModelMetrics>,
    /// Mean R² across folds
    pub mean_r_squared: f64,
    /// Mean RMSE across folds
    pub mean_rmse: f64,
    /// Mean MAE across folds
    pub mean_mae: f64,
}

impl CrossValidation {
    fn from_folds(folds: Vec<ModelMetrics>) -> Self {
        let count = folds.len() as f64;
        let mean = |f: fn(&ModelMetrics) -> f64| folds.iter().map(f).sum::<f64>() / count;
        let mean_r_squared = mean(|m| m.r_squared);
        let mean_rmse = mean(|m| m.rmse);
        let mean_mae = mean(|m| m.mae);
        Self {
            folds,
            mean_r_squared,
            mean_rmse,
            mean_mae,
        }
    }
}

/// Contiguous fold boundaries; the first `rows % folds` folds get one extra row
fn fold_ranges(rows: usize, folds: usize) -> Vec<Range<usize>> {
    let base = rows / folds;
    let extra = rows % folds;
    let mut start = 0;
    (0..folds)
        .map(|fold| {
            let size = base + usize::from(fold < extra);
            let range = start..start + size;
            start += size;
            range
        })
        .collect()
}

/// Score an ensemble configuration with k-fold cross-validation
///
/// Each fold trains a fresh ensemble on the remaining rows and scores the
/// held-out block. Returns `Ok(None)` when `cv_folds` is 0 or the data is too
/// small for every training split to reach `min_training_rows`.
///
/// # Errors
///
/// Returns `ClimateError::Validation` if a fold cannot be fitted
pub fn cross_validate(
    features: &FeatureMatrix,
    targets: &[f64],
    config: &EnsembleConfig,
) -> ClimateResult<Option<CrossValidation>> {
    let rows = features.len();
    let folds = config.cv_folds;
    if rows != targets.len() {
        return Err(ClimateError::validation(format!(
            "{rows} feature rows but {} targets",
            targets.len()
        )));
    }
    if folds < 2 || rows < folds || rows - rows.div_ceil(folds) < config.min_training_rows {
        debug!(rows, folds, "Skipping cross-validation");
        return Ok(None);
    }

    let mut metrics = Vec::with_capacity(folds);
    for held_out in fold_ranges(rows, folds) {
        let train: Vec<usize> = (0..rows).filter(|row| !held_out.contains(row)).collect();
        let test: Vec<usize> = held_out.collect();
        let train_targets: Vec<f64> = train.iter().map(|&row| targets[row]).collect();

        let model = EnsembleModel::fit(&features.select_rows(&train), &train_targets, config)?;
        let predicted = model
            .predict_rows(&features.select_rows(&test))
            .ok_or_else(|| ClimateError::validation("held-out fold could not be scored"))?;
        let actual = DVector::from_iterator(test.len(), test.iter().map(|&row| targets[row]));
        let fold = ModelMetrics::from_predictions(&predicted, &actual)
            .ok_or_else(|| ClimateError::validation("held-out fold is empty"))?;
        metrics.push(fold);
    }

    Ok(Some(CrossValidation::from_folds(metrics)))
}
