// ABOUTME: Classical additive seasonal decomposition into trend, seasonal, and residual parts
// ABOUTME: Centered moving-average trend with least-squares extrapolation at the series ends
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: series lengths are far below 2^52

use crate::constants::historical::{MIN_CYCLES, SEASONAL_PERIOD};
use crate::errors::InsufficientHistory;
use crate::statistical_analysis::StatisticalAnalyzer;
use serde::{Deserialize, Serialize};

/// Components of an additive decomposition; `observed = trend + seasonal + residual`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalDecomposition {
    /// Seasonal period in samples
    pub period: usize,
    /// Long-run trend
    pub trend: Vec<f64>,
    /// Zero-mean repeating component
    pub seasonal: Vec<f64>,
    /// What remains
    pub residual: Vec<f64>,
}

impl SeasonalDecomposition {
    /// Peak-to-trough size of the seasonal cycle
    #[must_use]
    pub fn seasonal_amplitude(&self) -> f64 {
        let max = self.seasonal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = self.seasonal.iter().copied().fold(f64::INFINITY, f64::min);
        if max.is_finite() && min.is_finite() {
            max - min
        } else {
            0.0
        }
    }
}

/// Additive decomposer for a fixed period
#[derive(Debug, Clone, Copy)]
pub struct SeasonalDecomposer {
    period: usize,
    min_cycles: usize,
}

impl Default for SeasonalDecomposer {
    fn default() -> Self {
        Self::new(SEASONAL_PERIOD)
    }
}

impl SeasonalDecomposer {
    /// Decomposer requiring two full cycles
    #[must_use]
    pub const fn new(period: usize) -> Self {
        Self {
            period,
            min_cycles: MIN_CYCLES,
        }
    }

    /// Override the number of cycles required
    #[must_use]
    pub const fn with_min_cycles(mut self, min_cycles: usize) -> Self {
        self.min_cycles = min_cycles;
        self
    }

    /// Samples needed before decomposing
    #[must_use]
    pub const fn required_samples(&self) -> usize {
        self.period.saturating_mul(self.min_cycles)
    }

    /// Decompose a series
    ///
    /// # Errors
    ///
    /// Returns `InsufficientHistory` when the series is shorter than the required
    /// number of cycles, or the period is below 2
    pub fn decompose(&self, series: &[f64]) -> Result<SeasonalDecomposition, InsufficientHistory> {
        let required = self.required_samples().max(self.period + 2);
        if self.period < 2 || series.len() < required {
            return Err(InsufficientHistory::new(required, series.len()));
        }

        let trend = self.trend(series);
        let detrended: Vec<f64> = series.iter().zip(&trend).map(|(x, t)| x - t).collect();

        let mut phase_sums = vec![0.0; self.period];
        let mut phase_counts = vec![0usize; self.period];
        for (i, value) in detrended.iter().enumerate() {
            phase_sums[i % self.period] += value;
            phase_counts[i % self.period] += 1;
        }
        let phase_means: Vec<f64> = phase_sums
            .iter()
            .zip(&phase_counts)
            .map(|(sum, count)| sum / (*count).max(1) as f64)
            .collect();
        let offset = phase_means.iter().sum::<f64>() / self.period as f64;

        let seasonal: Vec<f64> = (0..series.len())
            .map(|i| phase_means[i % self.period] - offset)
            .collect();
        let residual = series
            .iter()
            .zip(trend.iter().zip(&seasonal))
            .map(|(x, (t, s))| x - t - s)
            .collect();

        Ok(SeasonalDecomposition {
            period: self.period,
            trend,
            seasonal,
            residual,
        })
    }

    /// Centered moving average (2×period for even periods) with extrapolated ends
    fn trend(&self, series: &[f64]) -> Vec<f64> {
        let n = series.len();
        let half = self.period / 2;
        let period = self.period as f64;
        let mut trend = vec![0.0; n];

        for (i, slot) in trend.iter_mut().enumerate().take(n - half).skip(half) {
            *slot = if self.period % 2 == 0 {
                let inner: f64 = series[i + 1 - half..i + half].iter().sum();
                0.5f64.mul_add(series[i - half] + series[i + half], inner) / period
            } else {
                series[i - half..=i + half].iter().sum::<f64>() / period
            };
        }

        // Extrapolate both ends from lines fitted over `period` centered values
        let span = self.period.min(n - 2 * half);
        let head = &trend[half..half + span];
        if let Ok(line) = StatisticalAnalyzer::linear_regression(head) {
            for (i, slot) in trend.iter_mut().enumerate().take(half) {
                *slot = line.predict(i as f64 - half as f64);
            }
        }
        let tail_start = n - half - span;
        let tail = trend[tail_start..n - half].to_vec();
        if let Ok(line) = StatisticalAnalyzer::linear_regression(&tail) {
            for (i, slot) in trend.iter_mut().enumerate().skip(n - half) {
                *slot = line.predict((i - tail_start) as f64);
            }
        }

        trend
    }
}
