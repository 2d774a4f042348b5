// ABOUTME: Statistical analysis for climate series trends and anomaly detection
// ABOUTME: Implements linear regression with significance testing and z-score extremes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: statistical calculations with controlled ranges

use crate::errors::{ClimateError, ClimateResult};
use serde::{Deserialize, Serialize};

/// Complete linear regression analysis results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope of the regression line (change per sample)
    pub slope: f64,
    /// Y-intercept of the regression line
    pub intercept: f64,
    /// Coefficient of determination (goodness of fit, 0-1)
    pub r_squared: f64,
    /// Pearson correlation coefficient (-1 to 1)
    pub correlation: f64,
    /// Standard error of the estimate
    pub standard_error: f64,
    /// Degrees of freedom (n - 2)
    pub degrees_of_freedom: usize,
    /// P-value for statistical significance testing
    pub p_value: Option<f64>,
}

impl RegressionResult {
    /// Value of the fitted line at sample index `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }

    /// Significance of the slope
    #[must_use]
    pub fn significance(&self) -> SignificanceLevel {
        self.p_value
            .map_or(SignificanceLevel::NotSignificant, SignificanceLevel::from_p_value)
    }
}

/// Statistical significance levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignificanceLevel {
    /// No statistical significance (p >= 0.1)
    NotSignificant,
    /// Weak significance (p < 0.1)
    Weak,
    /// Moderate significance (p < 0.05)
    Moderate,
    /// Strong significance (p < 0.01)
    Strong,
    /// Very strong significance (p < 0.001)
    VeryStrong,
}

impl SignificanceLevel {
    /// Get the alpha threshold for this significance level
    #[must_use]
    pub const fn alpha_threshold(self) -> f64 {
        match self {
            Self::NotSignificant => 1.0,
            Self::Weak => 0.1,
            Self::Moderate => 0.05,
            Self::Strong => 0.01,
            Self::VeryStrong => 0.001,
        }
    }

    /// Create significance level from p-value
    #[must_use]
    pub fn from_p_value(p_value: f64) -> Self {
        if p_value < 0.001 {
            Self::VeryStrong
        } else if p_value < 0.01 {
            Self::Strong
        } else if p_value < 0.05 {
            Self::Moderate
        } else if p_value < 0.1 {
            Self::Weak
        } else {
            Self::NotSignificant
        }
    }
}

/// Descriptive statistics of a series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesMoments {
    /// Arithmetic mean
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

/// Statistical analyzer for evenly spaced series
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Linear regression of values against their sample index
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` with fewer than 2 points or non-finite values
    pub fn linear_regression(values: &[f64]) -> ClimateResult<RegressionResult> {
        if values.len() < 2 {
            return Err(ClimateError::validation(format!(
                "Insufficient data points for regression: need at least 2, got {}",
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ClimateError::validation(
                "Cannot calculate regression: non-finite values",
            ));
        }

        let n = values.len() as f64;
        let x_values: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

        // Calculate sums for regression
        let sum_x = x_values.iter().sum::<f64>();
        let sum_y = values.iter().sum::<f64>();
        let sum_xx = x_values.iter().map(|x| x * x).sum::<f64>();
        let sum_x_y = x_values
            .iter()
            .zip(values)
            .map(|(x, y)| x * y)
            .sum::<f64>();
        let sum_yy = values.iter().map(|y| y * y).sum::<f64>();

        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        let denominator = (n * mean_x).mul_add(-mean_x, sum_xx);
        if denominator.abs() < f64::EPSILON {
            return Err(ClimateError::validation(
                "Cannot calculate regression: zero variance in x",
            ));
        }

        let slope = (n * mean_x).mul_add(-mean_y, sum_x_y) / denominator;
        let intercept = slope.mul_add(-mean_x, mean_y);

        let numerator = (n * mean_x).mul_add(-mean_y, sum_x_y);
        let y_spread = (n * mean_y).mul_add(-mean_y, sum_yy);
        let denominator_corr = (denominator * y_spread).sqrt();

        // Constant series have no correlation to report
        let correlation = if denominator_corr > f64::EPSILON {
            (numerator / denominator_corr).clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let r_squared = correlation * correlation;

        let sse = x_values
            .iter()
            .zip(values)
            .map(|(x, actual)| {
                let diff = actual - slope.mul_add(*x, intercept);
                diff * diff
            })
            .sum::<f64>();

        let degrees_of_freedom = values.len().saturating_sub(2);
        let standard_error = if degrees_of_freedom > 0 {
            (sse / degrees_of_freedom as f64).sqrt()
        } else {
            0.0
        };

        let p_value = if degrees_of_freedom > 0 && standard_error > 0.0 {
            let se_slope = standard_error / denominator.sqrt();
            let t_stat = slope / se_slope;
            Some(Self::t_test_p_value(t_stat.abs(), degrees_of_freedom))
        } else {
            None
        };

        Ok(RegressionResult {
            slope,
            intercept,
            r_squared,
            correlation,
            standard_error,
            degrees_of_freedom,
            p_value,
        })
    }

    /// Mean and population standard deviation, `None` for an empty series
    #[must_use]
    pub fn moments(values: &[f64]) -> Option<SeriesMoments> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
        Some(SeriesMoments {
            mean,
            std_dev: variance.sqrt(),
        })
    }

    /// Standard scores; a constant series scores 0 everywhere
    #[must_use]
    pub fn z_scores(values: &[f64]) -> Vec<f64> {
        let Some(moments) = Self::moments(values) else {
            return Vec::new();
        };
        if moments.std_dev <= f64::EPSILON {
            return vec![0.0; values.len()];
        }
        values
            .iter()
            .map(|v| (v - moments.mean) / moments.std_dev)
            .collect()
    }

    /// Two-tailed t-test p-value via a normal approximation
    fn t_test_p_value(t_stat: f64, df: usize) -> f64 {
        if df == 0 {
            return 1.0;
        }

        let z_equivalent = t_stat / (1.0 + t_stat * t_stat / (4.0 * df as f64)).sqrt();

        // Two-tailed test
        (2.0 * (1.0 - Self::standard_normal_cdf(z_equivalent.abs()))).clamp(0.0, 1.0)
    }

    /// Standard normal cumulative distribution function approximation
    fn standard_normal_cdf(x: f64) -> f64 {
        // Abramowitz and Stegun approximation
        let t = 1.0 / 0.231_641_9f64.mul_add(x.abs(), 1.0);
        let poly = t.mul_add(
            t.mul_add(
                t.mul_add(t.mul_add(1.330_274_429, -1.821_255_978), 1.781_477_937),
                -0.356_563_782,
            ),
            0.319_381_530,
        );
        let cdf = (0.398_942_3 * (x * x * -0.5).exp()).mul_add(-poly * t, 1.0);

        if x >= 0.0 {
            cdf
        } else {
            1.0 - cdf
        }
    }
}
