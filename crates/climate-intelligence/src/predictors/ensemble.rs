// ABOUTME: Bagged ridge regression ensemble with seeded bootstrap resampling
// ABOUTME: Prediction spread across members provides the uncertainty estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: row and member counts are small

use crate::config::EnsembleConfig;
use crate::errors::{ClimateError, ClimateResult};
use crate::features::FeatureMatrix;
use nalgebra::{DMatrix, DVector};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Columns with a smaller standard deviation are left unscaled
const SCALE_EPSILON: f64 = 1e-12;

/// One ridge regression fitted on a bootstrap resample
#[derive(Debug, Clone, PartialEq)]
struct RidgeMember {
    weights: DVector<f64>,
    intercept: f64,
}

impl RidgeMember {
    fn predict(&self, standardized: &DMatrix<f64>) -> DVector<f64> {
        (standardized * &self.weights).add_scalar(self.intercept)
    }
}

/// Ensemble of ridge regressions on standardized features
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleModel {
    columns: usize,
    means: DVector<f64>,
    scales: DVector<f64>,
    members: Vec<RidgeMember>,
    training_rows: usize,
}

/// Ensemble output for a feature matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnsembleOutput {
    /// Mean of the member predictions
    pub mean: f64,
    /// Population standard deviation of the member predictions
    pub spread: f64,
}

impl EnsembleModel {
    /// Fit a new ensemble
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` if shapes disagree, there are too few rows,
    /// targets are outside [0, 1], features are not finite, or the regularized normal
    /// equations are not positive definite
    pub fn fit(
        features: &FeatureMatrix,
        targets: &[f64],
        config: &EnsembleConfig,
    ) -> ClimateResult<Self> {
        let rows = features.len();
        if rows != targets.len() {
            return Err(ClimateError::validation(format!(
                "{rows} feature rows but {} targets",
                targets.len()
            )));
        }
        if rows < config.min_training_rows {
            return Err(ClimateError::validation(format!(
                "need at least {} training rows, got {rows}",
                config.min_training_rows
            )));
        }
        if config.members == 0 {
            return Err(ClimateError::validation("ensemble needs at least one member"));
        }
        if let Some(bad) = targets
            .iter()
            .find(|t| !t.is_finite() || !(0.0..=1.0).contains(*t))
        {
            return Err(ClimateError::validation(format!(
                "training target {bad} outside [0, 1]"
            )));
        }
        if features.matrix().iter().any(|v| !v.is_finite()) {
            return Err(ClimateError::validation("training features must be finite"));
        }

        let (means, scales) = column_moments(features.matrix());
        let standardized = standardize(features.matrix(), &means, &scales);
        let targets = DVector::from_column_slice(targets);

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut members = Vec::with_capacity(config.members);
        for _ in 0..config.members {
            let sample: Vec<usize> = (0..rows).map(|_| rng.gen_range(0..rows)).collect();
            members.push(fit_ridge(
                &standardized,
                &targets,
                &sample,
                config.ridge_lambda,
            )?);
        }

        Ok(Self {
            columns: features.columns(),
            means,
            scales,
            members,
            training_rows: rows,
        })
    }

    /// Feature width the model was trained on
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of ensemble members
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    /// Rows used for training
    #[must_use]
    pub const fn training_rows(&self) -> usize {
        self.training_rows
    }

    /// Predict over a matrix of the trained width
    ///
    /// Each member scores the matrix as the mean of its row predictions.
    /// Returns `None` for an empty matrix or a width mismatch.
    #[must_use]
    pub fn predict(&self, features: &FeatureMatrix) -> Option<EnsembleOutput> {
        let standardized = self.prepare(features)?;
        let member_scores = DVector::from_iterator(
            self.members.len(),
            self.members
                .iter()
                .map(|member| member.predict(&standardized).mean()),
        );

        Some(EnsembleOutput {
            mean: member_scores.mean(),
            spread: member_scores.variance().sqrt(),
        })
    }

    /// Per-row prediction averaged across members
    ///
    /// Returns `None` for an empty matrix or a width mismatch.
    #[must_use]
    pub fn predict_rows(&self, features: &FeatureMatrix) -> Option<DVector<f64>> {
        let standardized = self.prepare(features)?;
        let mut total = DVector::zeros(standardized.nrows());
        for member in &self.members {
            total += member.predict(&standardized);
        }
        Some(total / self.members.len() as f64)
    }

    fn prepare(&self, features: &FeatureMatrix) -> Option<DMatrix<f64>> {
        if features.is_empty() || self.members.is_empty() || features.columns() != self.columns {
            return None;
        }
        Some(standardize(features.matrix(), &self.means, &self.scales))
    }
}

/// Per-column mean and scale (population std, 1 for constant columns)
fn column_moments(data: &DMatrix<f64>) -> (DVector<f64>, DVector<f64>) {
    let (means, scales): (Vec<f64>, Vec<f64>) = data
        .column_iter()
        .map(|column| {
            let std = column.variance().sqrt();
            (column.mean(), if std > SCALE_EPSILON { std } else { 1.0 })
        })
        .unzip();
    (DVector::from_vec(means), DVector::from_vec(scales))
}

fn standardize(data: &DMatrix<f64>, means: &DVector<f64>, scales: &DVector<f64>) -> DMatrix<f64> {
    let mut standardized = data.clone();
    for (index, mut column) in standardized.column_iter_mut().enumerate() {
        let (mean, scale) = (means[index], scales[index]);
        column.apply(|value| *value = (*value - mean) / scale);
    }
    standardized
}

/// Fit one centered ridge regression on the sampled rows
fn fit_ridge(
    standardized: &DMatrix<f64>,
    targets: &DVector<f64>,
    sample: &[usize],
    lambda: f64,
) -> ClimateResult<RidgeMember> {
    let mut x = standardized.select_rows(sample);
    let y = DVector::from_iterator(sample.len(), sample.iter().map(|&row| targets[row]));

    let n = sample.len() as f64;
    let x_mean = DVector::from_iterator(x.ncols(), x.column_iter().map(|column| column.sum() / n));
    for (index, mut column) in x.column_iter_mut().enumerate() {
        column.add_scalar_mut(-x_mean[index]);
    }
    let y_mean = y.mean();
    let y = y.add_scalar(-y_mean);

    let columns = x.ncols();
    let gram = x.tr_mul(&x) + DMatrix::<f64>::identity(columns, columns) * lambda;
    let moment = x.tr_mul(&y);
    let weights = gram
        .cholesky()
        .ok_or_else(|| ClimateError::validation("ridge normal equations are singular"))?
        .solve(&moment);
    if weights.iter().any(|w| !w.is_finite()) {
        return Err(ClimateError::validation("ridge weights are not finite"));
    }
    let intercept = y_mean - weights.dot(&x_mean);

    Ok(RidgeMember { weights, intercept })
}
