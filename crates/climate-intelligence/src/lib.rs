// ABOUTME: Climate risk scoring engine turning observations into calibrated hazard scores
// ABOUTME: Feature extraction, predictor registry, risk combination, and historical analogue search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Climate Intelligence
//!
//! The scoring pipeline runs `FeatureExtractor` → predictors (via a
//! [`registry::RegistrySnapshot`]) → [`combiner::RiskCombiner`]. The combined
//! assessment feeds the duration, health impact, and recommendation stages.
//! [`historical::HistoricalAnalogueEngine`] works on long-run records independently.

// Re-export climate-core modules so intelligence code can use `crate::errors::*` etc.
pub use climate_core::config;
pub use climate_core::constants;
pub use climate_core::errors;
pub use climate_core::models;

/// Predictor error type isolated per hazard
pub mod error;
/// Observation validation and feature matrices
pub mod features;
/// Hazard predictor trait, formula predictors, and the bagged ridge ensemble
pub mod predictors;
/// Injected predictor registry with copy-on-write model snapshots
pub mod registry;
/// Calibration, confidence, and weighted overall risk
pub mod combiner;
/// Hazard duration estimates
pub mod duration;
/// Health hazard categories and vulnerability score
pub mod health_impact;
/// Prioritized action recommendations
pub mod recommendation_engine;
/// Regression and descriptive statistics
pub mod statistical_analysis;
/// Classical additive seasonal decomposition
pub mod decomposition;
/// Trend, seasonality, extremes, and analogue search over long-run records
pub mod historical;

pub use combiner::RiskCombiner;
pub use decomposition::{SeasonalDecomposer, SeasonalDecomposition};
pub use duration::DurationEstimator;
pub use error::PredictorError;
pub use features::{BatchExtraction, FeatureExtractor, FeatureMatrix, RejectedObservation};
pub use health_impact::{HealthHazards, HealthImpactMapper};
pub use historical::{ExtremeEvent, HistoricalAnalogueEngine, HistoricalReport};
pub use predictors::{
    CrossValidation, EnsembleModel, HazardPredictor, LearnedModel, ModelMetrics, Prediction,
};
pub use recommendation_engine::{ActionItem, RecommendationEngine, Recommendations};
pub use registry::{PredictorRegistry, RegistrySnapshot, TrainingReport};
pub use statistical_analysis::{RegressionResult, SignificanceLevel, StatisticalAnalyzer};
