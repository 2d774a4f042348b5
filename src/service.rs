// ABOUTME: Climate risk service wiring predictors, combiner, and downstream analyses together
// ABOUTME: Holds the injected predictor registry and historical store for every operation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Climate Risk Service
//!
//! One service instance owns the component configuration and two injected
//! collaborators: the [`PredictorRegistry`] (whose learned models can be
//! retrained while the service runs) and a [`HistoricalStore`]. Each
//! assessment captures a registry snapshot first, so a concurrent retrain never
//! changes the models halfway through scoring.

use crate::config::{ConfigError, EngineConfig, HistoricalConfig};
use crate::errors::{ClimateError, ClimateResult};
use crate::intelligence::{
    DurationEstimator, FeatureExtractor, FeatureMatrix, HealthHazards, HealthImpactMapper,
    HistoricalAnalogueEngine, HistoricalReport, ModelMetrics, PredictorRegistry,
    RecommendationEngine, Recommendations, RiskCombiner, TrainingReport,
};
use crate::models::{
    AnalogueMatch, HazardType, HistoricalWindow, LocationProfile, RiskAssessment,
    WeatherObservation,
};
use crate::providers::{DataIntegration, HistoricalStore};
use crate::report::{ClimateReport, SourcedReport};
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Service facade over the scoring and historical analysis components
pub struct ClimateRiskService {
    registry: Arc<PredictorRegistry>,
    history: Arc<dyn HistoricalStore>,
    combiner: RiskCombiner,
    duration: DurationEstimator,
    health: HealthImpactMapper,
    recommendations: RecommendationEngine,
    historical: HistoricalConfig,
}

impl ClimateRiskService {
    /// Service with default component settings
    #[must_use]
    pub fn new(registry: Arc<PredictorRegistry>, history: Arc<dyn HistoricalStore>) -> Self {
        Self::with_config(&EngineConfig::default(), registry, history)
    }

    /// Service with explicit component settings
    ///
    /// The registry keeps its own ensemble settings; build it with
    /// `PredictorRegistry::with_config(config.ensemble.clone())` to share them.
    #[must_use]
    pub fn with_config(
        config: &EngineConfig,
        registry: Arc<PredictorRegistry>,
        history: Arc<dyn HistoricalStore>,
    ) -> Self {
        Self {
            registry,
            history,
            combiner: RiskCombiner::with_config(config.combiner.clone()),
            duration: DurationEstimator::with_config(config.duration.clone()),
            health: HealthImpactMapper::with_config(config.health.clone()),
            recommendations: RecommendationEngine::with_config(config.recommendation.clone()),
            historical: config.historical.clone(),
        }
    }

    /// Service configured from `CLIMATE_*` environment variables with a fresh registry
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when an override is malformed or fails validation
    pub fn from_env(history: Arc<dyn HistoricalStore>) -> Result<Self, ConfigError> {
        let config = EngineConfig::load()?;
        let registry = Arc::new(PredictorRegistry::with_config(config.ensemble.clone()));
        Ok(Self::with_config(&config, registry, history))
    }

    /// Shared predictor registry
    #[must_use]
    pub const fn registry(&self) -> &Arc<PredictorRegistry> {
        &self.registry
    }

    /// Score every hazard for a location
    ///
    /// Invalid observations are logged and dropped. A failing predictor leaves
    /// its hazard unscored without failing the assessment.
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::NoData` when no valid observation remains
    #[instrument(skip_all, fields(region = location.region(), observations = observations.len()))]
    pub fn assess(
        &self,
        location: &LocationProfile,
        observations: &[WeatherObservation],
    ) -> ClimateResult<RiskAssessment> {
        if observations.is_empty() {
            return Err(ClimateError::no_data("cannot score an empty observation sequence"));
        }
        let batch = FeatureExtractor::extract_batch(observations);
        if batch.matrix.is_empty() {
            return Err(ClimateError::no_data(format!(
                "all {} observations failed validation",
                observations.len()
            )));
        }
        let valid = FeatureExtractor::valid_observations(observations);

        let snapshot = self.registry.snapshot();
        let raw = snapshot.predict_features(&batch.matrix.with_location(location));
        let assessment = self.combiner.combine(&raw, &valid, location, Utc::now())?;

        info!(
            overall_risk = assessment.overall_risk(),
            overall_level = %assessment.overall_level(),
            rejected = batch.rejected.len(),
            failed_predictors = assessment.predictor_failures().len(),
            "Risk assessment complete"
        );
        Ok(assessment)
    }

    /// Expected duration in days per hazard, counting only valid observations
    #[must_use]
    pub fn duration(&self, observations: &[WeatherObservation]) -> BTreeMap<HazardType, u32> {
        self.duration
            .estimate(&FeatureExtractor::valid_observations(observations))
    }

    /// Health hazards implied by risk scores
    #[must_use]
    pub fn health_hazards(
        &self,
        risks: &BTreeMap<HazardType, f64>,
        location: &LocationProfile,
    ) -> HealthHazards {
        self.health.map(risks, location)
    }

    /// Tiered action recommendations
    #[must_use]
    pub fn recommendations(
        &self,
        risks: &BTreeMap<HazardType, f64>,
        health: &HealthHazards,
        location: &LocationProfile,
    ) -> Recommendations {
        self.recommendations.recommend(risks, health, location)
    }

    fn analogue_engine(&self, location: &LocationProfile) -> HistoricalAnalogueEngine {
        HistoricalAnalogueEngine::with_config(self.historical.clone()).for_location(location.clone())
    }

    /// Past windows resembling the current conditions
    ///
    /// A location without stored history yields no matches.
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Source` when the historical store fails
    #[instrument(skip_all, fields(region = location.region(), window = current.len()))]
    pub fn historical_analogues(
        &self,
        location: &LocationProfile,
        current: &HistoricalWindow,
    ) -> ClimateResult<Vec<AnalogueMatch>> {
        let Some(history) = self.history.get_history(location)? else {
            return Ok(Vec::new());
        };
        Ok(self.analogue_engine(location).find_analogues(&history, current))
    }

    /// Trends, seasonality, extremes, and analogues for a location
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Source` when the historical store fails
    #[instrument(skip_all, fields(region = location.region(), window = current.len()))]
    pub fn historical_report(
        &self,
        location: &LocationProfile,
        current: &HistoricalWindow,
    ) -> ClimateResult<Option<HistoricalReport>> {
        let Some(history) = self.history.get_history(location)? else {
            return Ok(None);
        };
        Ok(Some(self.analogue_engine(location).analyze(&history, current)))
    }

    /// Assessment plus every downstream analysis
    ///
    /// A failing historical store is logged and leaves the historical section empty.
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::NoData` when no valid observation remains
    #[instrument(skip_all, fields(region = location.region()))]
    pub fn full_report(
        &self,
        location: &LocationProfile,
        observations: &[WeatherObservation],
    ) -> ClimateResult<ClimateReport> {
        let assessment = self.assess(location, observations)?;
        let risks = assessment.score_map();
        let health = self.health_hazards(&risks, location);
        let recommendations = self.recommendations(&risks, &health, location);

        let valid = FeatureExtractor::valid_observations(observations);
        let durations = self.duration.estimate(&valid);
        let current = HistoricalWindow::new(valid);
        let historical = match self.historical_report(location, &current) {
            Ok(report) => report,
            Err(error) => {
                warn!(error = %error, "Historical store unavailable, omitting historical analysis");
                None
            }
        };

        Ok(ClimateReport {
            region: location.region().to_owned(),
            durations,
            assessment,
            health,
            recommendations,
            historical,
        })
    }

    /// Fetch observations from every source, then build the full report
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::NoData` when the sources produced no valid observation
    #[instrument(skip_all, fields(region = location.region(), sources = integration.len(), days = days))]
    pub async fn assess_from_sources(
        &self,
        integration: &DataIntegration,
        location: &LocationProfile,
        days: u32,
    ) -> ClimateResult<SourcedReport> {
        let ingestion = integration.fetch_all(location, days).await;
        if ingestion.observations.is_empty() {
            let failed: Vec<&str> = ingestion.failures.keys().map(String::as_str).collect();
            return Err(ClimateError::no_data(format!(
                "no observations from {} sources (failed: {})",
                integration.len(),
                failed.join(", ")
            )));
        }

        let report = self.full_report(location, &ingestion.observations)?;
        Ok(SourcedReport { report, ingestion })
    }

    /// Retrain a learned hazard and install the new model
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` for formula hazards or unusable training data
    #[instrument(skip_all, fields(hazard = %hazard, rows = features.len()))]
    pub fn retrain(
        &self,
        hazard: HazardType,
        features: &FeatureMatrix,
        targets: &[f64],
    ) -> ClimateResult<TrainingReport> {
        self.registry.train(hazard, features, targets)
    }

    /// Measure the installed model of a learned hazard on labelled rows
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` for formula hazards or mismatched lengths
    #[instrument(skip_all, fields(hazard = %hazard, rows = features.len()))]
    pub fn evaluate(
        &self,
        hazard: HazardType,
        features: &FeatureMatrix,
        targets: &[f64],
    ) -> ClimateResult<ModelMetrics> {
        self.registry.evaluate(hazard, features, targets)
    }
}
