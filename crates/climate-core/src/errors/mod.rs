// ABOUTME: Unified error taxonomy for observation validation, scoring, and historical analysis
// ABOUTME: Defines ClimateError with stable error codes and typed constructors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Every fallible operation in the engine returns [`ClimateResult`]. Per-observation
//! and per-hazard failures are isolated by the callers; whole-batch failures
//! (no data, invalid location) are surfaced as typed errors.

use crate::config::ConfigError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Insufficient history marker attached to analysis reports
pub mod history;

pub use history::InsufficientHistory;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Observation outside physical bounds
    #[serde(rename = "INVALID_OBSERVATION")]
    InvalidObservation = 3000,
    /// Location outside coordinate or elevation bounds
    #[serde(rename = "INVALID_LOCATION")]
    InvalidLocation = 3001,
    /// Generic value validation failure
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed = 3002,

    // Data availability (4000-4999)
    /// No observations supplied
    #[serde(rename = "NO_DATA")]
    NoData = 4000,
    /// Historical series too short for decomposition
    #[serde(rename = "INSUFFICIENT_HISTORY")]
    InsufficientHistory = 4001,

    // External sources (5000-5999)
    /// Weather source or historical store failed
    #[serde(rename = "SOURCE_ERROR")]
    SourceError = 5000,

    // Configuration (6000-6999)
    /// Configuration could not be loaded or validated
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal (9000-9999)
    /// A hazard predictor failed internally
    #[serde(rename = "PREDICTOR_FAILURE")]
    PredictorFailure = 9000,
    /// Unexpected internal failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9001,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::InvalidObservation => "The observation is outside physical bounds",
            Self::InvalidLocation => "The location is outside coordinate or elevation bounds",
            Self::ValidationFailed => "The provided value failed validation",
            Self::NoData => "No observations were supplied",
            Self::InsufficientHistory => "The historical series is too short for decomposition",
            Self::SourceError => "A weather data source failed",
            Self::ConfigError => "The engine configuration is invalid",
            Self::PredictorFailure => "A hazard predictor failed",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Errors produced by the climate risk engine
#[derive(Debug, Error)]
pub enum ClimateError {
    /// A measurement is outside its physical range
    #[error("Invalid observation: {field}={value} outside [{min}, {max}]")]
    InvalidObservation {
        /// Name of the offending field
        field: &'static str,
        /// Offending value
        value: f64,
        /// Lower physical bound
        min: f64,
        /// Upper physical bound
        max: f64,
    },

    /// Scoring was requested for an empty observation sequence
    #[error("No data: {0}")]
    NoData(String),

    /// Historical series too short for seasonal decomposition
    #[error(transparent)]
    InsufficientHistory(#[from] InsufficientHistory),

    /// An individual hazard predictor failed
    #[error("Predictor failure for {hazard}: {reason}")]
    PredictorFailure {
        /// Hazard whose predictor failed
        hazard: String,
        /// Failure details
        reason: String,
    },

    /// Location rejected on construction
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// Generic validation failure (windows, shapes, training data)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Configuration could not be loaded or validated
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Weather source or historical store failure
    #[error("Source '{source_name}' failed: {reason}")]
    Source {
        /// Name of the failing source
        source_name: String,
        /// Failure details
        reason: String,
    },

    /// Unexpected internal failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClimateError {
    /// Create a no-data error
    #[must_use]
    pub fn no_data(message: impl Into<String>) -> Self {
        Self::NoData(message.into())
    }

    /// Create a validation error
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an invalid location error
    #[must_use]
    pub fn invalid_location(message: impl Into<String>) -> Self {
        Self::InvalidLocation(message.into())
    }

    /// Create a predictor failure error
    #[must_use]
    pub fn predictor_failure(hazard: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PredictorFailure {
            hazard: hazard.into(),
            reason: reason.into(),
        }
    }

    /// Create a source failure error
    #[must_use]
    pub fn source(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Source {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an internal error
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the stable error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidObservation { .. } => ErrorCode::InvalidObservation,
            Self::NoData(_) => ErrorCode::NoData,
            Self::InsufficientHistory(_) => ErrorCode::InsufficientHistory,
            Self::PredictorFailure { .. } => ErrorCode::PredictorFailure,
            Self::InvalidLocation(_) => ErrorCode::InvalidLocation,
            Self::Validation(_) => ErrorCode::ValidationFailed,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Source { .. } => ErrorCode::SourceError,
            Self::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether the error only affects a single observation or hazard
    ///
    /// Isolated errors are logged and skipped; the surrounding batch continues.
    #[must_use]
    pub const fn is_isolated(&self) -> bool {
        matches!(
            self,
            Self::InvalidObservation { .. }
                | Self::PredictorFailure { .. }
                | Self::InsufficientHistory(_)
                | Self::Source { .. }
        )
    }
}

/// Result alias used across the engine
pub type ClimateResult<T> = Result<T, ClimateError>;
