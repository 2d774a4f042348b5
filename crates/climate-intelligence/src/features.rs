// ABOUTME: Observation validation against physical bounds and feature matrix construction
// ABOUTME: Invalid observations are logged and dropped without aborting a batch
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::cast_precision_loss)] // Safe: row counts are small

use crate::errors::{ClimateError, ClimateResult};
use crate::models::{LocationProfile, WeatherObservation};
use chrono::{DateTime, Utc};
use nalgebra::DMatrix;
use tracing::warn;

/// Column positions in a feature row
pub mod columns {
    /// Air temperature (°C)
    pub const TEMPERATURE: usize = 0;
    /// Precipitation (mm)
    pub const PRECIPITATION: usize = 1;
    /// Relative humidity (%)
    pub const HUMIDITY: usize = 2;
    /// Wind speed (m/s)
    pub const WIND_SPEED: usize = 3;
    /// Pressure (hPa)
    pub const PRESSURE: usize = 4;
    /// UV index
    pub const UV_INDEX: usize = 5;
    /// Latitude (degrees), spatial rows only
    pub const LATITUDE: usize = 6;
    /// Longitude (degrees), spatial rows only
    pub const LONGITUDE: usize = 7;
    /// Elevation (m), spatial rows only
    pub const ELEVATION: usize = 8;

    /// Width of an observation-only row
    pub const BASE_WIDTH: usize = 6;
    /// Width of a row with location columns appended
    pub const SPATIAL_WIDTH: usize = 9;
}

/// Feature vector for a single observation
pub type FeatureRow = [f64; columns::BASE_WIDTH];

/// Numeric feature matrix, one observation per row
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    data: DMatrix<f64>,
}

impl FeatureMatrix {
    /// Create an empty matrix with a fixed width
    #[must_use]
    pub fn new(columns: usize) -> Self {
        Self {
            data: DMatrix::zeros(0, columns),
        }
    }

    /// Build a matrix from rows of equal width
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` if rows differ in width or the input is empty
    pub fn from_rows(rows: Vec<Vec<f64>>) -> ClimateResult<Self> {
        let columns = rows
            .first()
            .map(Vec::len)
            .ok_or_else(|| ClimateError::validation("feature matrix needs at least one row"))?;
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != columns) {
            return Err(ClimateError::validation(format!(
                "row {index} has {} columns, expected {columns}",
                row.len()
            )));
        }
        Ok(Self::from_valid_rows(rows.len(), columns, rows.into_iter().flatten()))
    }

    fn from_valid_rows(rows: usize, columns: usize, values: impl Iterator<Item = f64>) -> Self {
        Self {
            data: DMatrix::from_row_iterator(rows, columns, values),
        }
    }

    /// Append latitude, longitude, and elevation as constant columns
    #[must_use]
    pub fn with_location(self, location: &LocationProfile) -> Self {
        self.with_coordinates(
            location.latitude(),
            location.longitude(),
            location.elevation(),
        )
    }

    /// Append explicit coordinates as constant columns
    #[must_use]
    pub fn with_coordinates(self, latitude: f64, longitude: f64, elevation: f64) -> Self {
        let width = self.data.ncols();
        let mut data = self.data.insert_columns(width, 3, 0.0);
        for (offset, value) in [latitude, longitude, elevation].into_iter().enumerate() {
            data.column_mut(width + offset).fill(value);
        }
        Self { data }
    }

    /// Underlying matrix
    #[must_use]
    pub const fn matrix(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Copy of the rows at the given positions, in the given order
    #[must_use]
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self {
            data: self.data.select_rows(indices),
        }
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.nrows()
    }

    /// Whether the matrix has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.nrows() == 0
    }

    /// Number of columns
    #[must_use]
    pub fn columns(&self) -> usize {
        self.data.ncols()
    }

    /// Whether location columns are present
    #[must_use]
    pub fn has_spatial_context(&self) -> bool {
        self.columns() >= columns::SPATIAL_WIDTH
    }

    /// Copy out one column, empty when out of range
    #[must_use]
    pub fn column(&self, index: usize) -> Vec<f64> {
        if index >= self.columns() {
            return Vec::new();
        }
        self.data.column(index).iter().copied().collect()
    }

    /// Mean of one column, `None` when empty or out of range
    #[must_use]
    pub fn column_mean(&self, index: usize) -> Option<f64> {
        if index >= self.columns() || self.is_empty() {
            return None;
        }
        Some(self.data.column(index).mean())
    }

    /// Sum of `f` applied to each row
    #[must_use]
    pub fn sum_rows(&self, f: impl Fn(&[f64]) -> f64) -> f64 {
        self.row_values().map(|row| f(&row)).sum()
    }

    /// Fraction of rows satisfying a predicate, 0 when empty
    #[must_use]
    pub fn fraction_where(&self, predicate: impl Fn(&[f64]) -> bool) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        let hits = self.row_values().filter(|row| predicate(row)).count();
        hits as f64 / self.len() as f64
    }

    fn row_values(&self) -> impl Iterator<Item = Vec<f64>> + '_ {
        self.data
            .row_iter()
            .map(|row| row.iter().copied().collect())
    }
}

/// An observation dropped during batch extraction
#[derive(Debug)]
pub struct RejectedObservation {
    /// Position in the input batch
    pub index: usize,
    /// Observation timestamp
    pub timestamp: DateTime<Utc>,
    /// Validation failure
    pub error: ClimateError,
}

/// Result of extracting features from a batch
#[derive(Debug)]
pub struct BatchExtraction {
    /// Feature rows for the accepted observations
    pub matrix: FeatureMatrix,
    /// Observations that failed validation
    pub rejected: Vec<RejectedObservation>,
}

/// Validates observations and converts them into feature vectors
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Check an observation against physical bounds
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::InvalidObservation` for the first field that is
    /// non-finite or outside its bounds
    pub fn validate(observation: &WeatherObservation) -> ClimateResult<()> {
        observation.check_bounds()
    }

    /// Build the feature vector for one observation
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::InvalidObservation` if validation fails
    pub fn extract(observation: &WeatherObservation) -> ClimateResult<FeatureRow> {
        Self::validate(observation)?;
        Ok([
            observation.temperature(),
            observation.precipitation(),
            observation.humidity(),
            observation.wind_speed(),
            observation.pressure(),
            observation.uv_index(),
        ])
    }

    /// Extract a feature matrix, dropping invalid observations
    #[must_use]
    pub fn extract_batch(observations: &[WeatherObservation]) -> BatchExtraction {
        let mut accepted: Vec<FeatureRow> = Vec::with_capacity(observations.len());
        let mut rejected = Vec::new();

        for (index, observation) in observations.iter().enumerate() {
            match Self::extract(observation) {
                Ok(row) => accepted.push(row),
                Err(error) => {
                    warn!(
                        index,
                        timestamp = %observation.timestamp(),
                        error = %error,
                        "Dropping invalid observation"
                    );
                    rejected.push(RejectedObservation {
                        index,
                        timestamp: observation.timestamp(),
                        error,
                    });
                }
            }
        }

        let matrix = FeatureMatrix::from_valid_rows(
            accepted.len(),
            columns::BASE_WIDTH,
            accepted.into_iter().flatten(),
        );
        BatchExtraction { matrix, rejected }
    }

    /// Observations that pass validation, in input order
    #[must_use]
    pub fn valid_observations(observations: &[WeatherObservation]) -> Vec<WeatherObservation> {
        observations
            .iter()
            .filter(|obs| Self::validate(obs).is_ok())
            .cloned()
            .collect()
    }
}
