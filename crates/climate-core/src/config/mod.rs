// ABOUTME: Engine configuration orchestrating scoring, analysis, and ingestion settings
// ABOUTME: Loads defaults, applies CLIMATE_* environment overrides, and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Engine Configuration Module
//!
//! Configuration is organized into domain-specific modules:
//! - `scoring` - Risk combiner thresholds and weights, duration triggers
//! - `analysis` - Health impact, recommendations, historical analysis, ensemble learner
//! - `ingestion` - Per-source timeout and rate limit defaults
//!
//! Every component takes its section explicitly; [`EngineConfig::global`] exists for
//! callers that want a process-wide instance.

pub mod analysis;
pub mod error;
pub mod ingestion;
pub mod scoring;

pub use analysis::{EnsembleConfig, HealthConfig, HistoricalConfig, RecommendationConfig};
pub use error::ConfigError;
pub use ingestion::IngestionConfig;
pub use scoring::{CombinerConfig, DurationConfig};

use crate::models::HazardType;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::warn;

/// Global configuration singleton
static ENGINE_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Main engine configuration container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Risk combiner thresholds, weights, and validity horizon
    pub combiner: CombinerConfig,
    /// Duration estimator triggers
    pub duration: DurationConfig,
    /// Health impact thresholds
    pub health: HealthConfig,
    /// Recommendation thresholds
    pub recommendation: RecommendationConfig,
    /// Historical analysis settings
    pub historical: HistoricalConfig,
    /// Ensemble learner settings
    pub ensemble: EnsembleConfig,
    /// Ingestion defaults
    pub ingestion: IngestionConfig,
}

impl EngineConfig {
    /// Get the global configuration instance
    pub fn global() -> &'static Self {
        ENGINE_CONFIG.get_or_init(|| {
            Self::load().unwrap_or_else(|e| {
                warn!("Failed to load engine config: {}, using defaults", e);
                Self::default()
            })
        })
    }

    /// Load configuration from defaults and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values or validation fails
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error naming the first setting outside its valid range
    pub fn validate(&self) -> Result<(), ConfigError> {
        let combiner = &self.combiner;
        if !combiner
            .confidence_thresholds
            .values()
            .all(|t| is_unit_interval(*t))
        {
            return Err(ConfigError::InvalidRange(
                "confidence thresholds must be within [0, 1]",
            ));
        }
        if !combiner.weights.values().all(|w| is_non_negative(*w))
            || !is_non_negative(combiner.default_weight)
        {
            return Err(ConfigError::InvalidWeights(
                "hazard weights must be finite and non-negative",
            ));
        }
        if combiner.validity_horizon_hours <= 0 {
            return Err(ConfigError::ValueOutOfRange(
                "validity_horizon_hours must be positive",
            ));
        }

        if !self.duration.heat_temperature_c.is_finite()
            || !is_non_negative(self.duration.flood_precipitation_mm)
        {
            return Err(ConfigError::ValueOutOfRange(
                "duration thresholds must be finite",
            ));
        }

        let health = &self.health;
        if ![
            health.flood_immediate,
            health.heatwave_ongoing,
            health.blackout_longterm,
            self.recommendation.critical_score,
            self.recommendation.blackout_important,
        ]
        .into_iter()
        .all(is_unit_interval)
        {
            return Err(ConfigError::InvalidRange(
                "health and recommendation thresholds must be within [0, 1]",
            ));
        }

        self.validate_historical()?;
        self.validate_ensemble()?;

        if self.ingestion.source_rate_limit == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "source_rate_limit must be at least 1",
            ));
        }
        if self.ingestion.source_timeout_secs == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "source_timeout_secs must be at least 1",
            ));
        }

        Ok(())
    }

    fn validate_historical(&self) -> Result<(), ConfigError> {
        let historical = &self.historical;
        if historical.seasonal_period < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "seasonal_period must be at least 2",
            ));
        }
        if historical.min_cycles == 0 {
            return Err(ConfigError::ValueOutOfRange("min_cycles must be at least 1"));
        }
        if !is_unit_interval(historical.similarity_threshold) {
            return Err(ConfigError::InvalidRange(
                "similarity_threshold must be within [0, 1]",
            ));
        }
        if historical.max_matches == 0 {
            return Err(ConfigError::ValueOutOfRange("max_matches must be at least 1"));
        }
        if !historical.extreme_z_score.is_finite() || historical.extreme_z_score <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "extreme_z_score must be positive",
            ));
        }
        Ok(())
    }

    fn validate_ensemble(&self) -> Result<(), ConfigError> {
        let ensemble = &self.ensemble;
        if ensemble.members == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "ensemble members must be at least 1",
            ));
        }
        if !is_non_negative(ensemble.ridge_lambda) {
            return Err(ConfigError::ValueOutOfRange(
                "ridge_lambda must be finite and non-negative",
            ));
        }
        if ensemble.min_training_rows < 2 {
            return Err(ConfigError::ValueOutOfRange(
                "min_training_rows must be at least 2",
            ));
        }
        if ensemble.cv_folds == 1 {
            return Err(ConfigError::ValueOutOfRange(
                "cv_folds must be 0 or at least 2",
            ));
        }
        if ensemble.metrics_history == 0 {
            return Err(ConfigError::ValueOutOfRange(
                "metrics_history must be at least 1",
            ));
        }
        Ok(())
    }

    /// Read and parse an environment variable, if set
    fn read_env_var<T: FromStr>(env_var_name: &str) -> Result<Option<T>, ConfigError> {
        env::var(env_var_name).map_or(Ok(None), |val| {
            val.trim()
                .parse()
                .map(Some)
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))
        })
    }

    /// Helper function to parse and apply an environment variable override
    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Some(value) = Self::read_env_var(env_var_name)? {
            *target = value;
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        for hazard in HazardType::ALL {
            let suffix = hazard.as_str().to_uppercase();
            if let Some(threshold) =
                Self::read_env_var(&format!("CLIMATE_CONFIDENCE_THRESHOLD_{suffix}"))?
            {
                self.combiner.confidence_thresholds.insert(hazard, threshold);
            }
            if let Some(weight) = Self::read_env_var(&format!("CLIMATE_WEIGHT_{suffix}"))? {
                self.combiner.weights.insert(hazard, weight);
            }
        }
        Self::apply_env_var("CLIMATE_DEFAULT_WEIGHT", &mut self.combiner.default_weight)?;
        Self::apply_env_var(
            "CLIMATE_VALIDITY_HORIZON_HOURS",
            &mut self.combiner.validity_horizon_hours,
        )?;

        // Duration overrides
        Self::apply_env_var(
            "CLIMATE_DURATION_HEAT_TEMPERATURE",
            &mut self.duration.heat_temperature_c,
        )?;
        Self::apply_env_var(
            "CLIMATE_DURATION_FLOOD_PRECIPITATION",
            &mut self.duration.flood_precipitation_mm,
        )?;

        // Health and recommendation overrides
        Self::apply_env_var(
            "CLIMATE_HEALTH_FLOOD_IMMEDIATE",
            &mut self.health.flood_immediate,
        )?;
        Self::apply_env_var(
            "CLIMATE_HEALTH_HEATWAVE_ONGOING",
            &mut self.health.heatwave_ongoing,
        )?;
        Self::apply_env_var(
            "CLIMATE_HEALTH_BLACKOUT_LONGTERM",
            &mut self.health.blackout_longterm,
        )?;
        Self::apply_env_var(
            "CLIMATE_RECOMMENDATION_CRITICAL_SCORE",
            &mut self.recommendation.critical_score,
        )?;
        Self::apply_env_var(
            "CLIMATE_RECOMMENDATION_BLACKOUT_IMPORTANT",
            &mut self.recommendation.blackout_important,
        )?;

        // Historical overrides
        Self::apply_env_var(
            "CLIMATE_SEASONAL_PERIOD",
            &mut self.historical.seasonal_period,
        )?;
        Self::apply_env_var("CLIMATE_MIN_CYCLES", &mut self.historical.min_cycles)?;
        Self::apply_env_var(
            "CLIMATE_SIMILARITY_THRESHOLD",
            &mut self.historical.similarity_threshold,
        )?;
        Self::apply_env_var("CLIMATE_MAX_MATCHES", &mut self.historical.max_matches)?;
        Self::apply_env_var(
            "CLIMATE_EXTREME_Z_SCORE",
            &mut self.historical.extreme_z_score,
        )?;
        Self::apply_env_var(
            "CLIMATE_MAX_EXTREMES",
            &mut self.historical.max_extremes_per_variable,
        )?;

        // Ensemble overrides
        Self::apply_env_var("CLIMATE_ENSEMBLE_MEMBERS", &mut self.ensemble.members)?;
        Self::apply_env_var(
            "CLIMATE_ENSEMBLE_RIDGE_LAMBDA",
            &mut self.ensemble.ridge_lambda,
        )?;
        Self::apply_env_var("CLIMATE_ENSEMBLE_SEED", &mut self.ensemble.seed)?;
        Self::apply_env_var("CLIMATE_CV_FOLDS", &mut self.ensemble.cv_folds)?;
        Self::apply_env_var(
            "CLIMATE_METRICS_HISTORY",
            &mut self.ensemble.metrics_history,
        )?;

        // Ingestion overrides
        Self::apply_env_var(
            "CLIMATE_SOURCE_TIMEOUT_SECS",
            &mut self.ingestion.source_timeout_secs,
        )?;
        Self::apply_env_var(
            "CLIMATE_SOURCE_RATE_LIMIT",
            &mut self.ingestion.source_rate_limit,
        )?;
        Self::apply_env_var("CLIMATE_DEFAULT_DAYS", &mut self.ingestion.default_days)?;

        Ok(self)
    }
}

fn is_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_blackout_uses_default_weight() {
        let config = CombinerConfig::default();
        assert!((config.weight(HazardType::Blackout) - 0.1).abs() < f64::EPSILON);
        assert!((config.weight(HazardType::Flood) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_threshold_out_of_range_rejected() {
        let mut config = EngineConfig::default();
        config
            .combiner
            .confidence_thresholds
            .insert(HazardType::Drought, 1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange(_))
        ));
    }

    #[test]
    #[serial]
    fn test_env_override_applied() {
        env::set_var("CLIMATE_SIMILARITY_THRESHOLD", "0.9");
        let config = EngineConfig::load();
        env::remove_var("CLIMATE_SIMILARITY_THRESHOLD");

        let config = config.unwrap();
        assert!((config.historical.similarity_threshold - 0.9).abs() < f64::EPSILON);
    }
}
