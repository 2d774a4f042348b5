// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Physical bounds, hazard thresholds, weights, and catalog text for the risk engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.
//! Configuration defaults in [`crate::config`] are built from these values.

/// Catalog text for health hazards and recommended actions
pub mod catalog;

/// Physical bounds for observation validation (canonical units)
pub mod physical_bounds {
    /// Minimum plausible air temperature (°C)
    pub const TEMPERATURE_MIN_C: f64 = -100.0;
    /// Maximum plausible air temperature (°C)
    pub const TEMPERATURE_MAX_C: f64 = 60.0;
    /// Minimum precipitation (mm)
    pub const PRECIPITATION_MIN_MM: f64 = 0.0;
    /// Maximum plausible precipitation (mm)
    pub const PRECIPITATION_MAX_MM: f64 = 2000.0;
    /// Minimum relative humidity (%)
    pub const HUMIDITY_MIN_PCT: f64 = 0.0;
    /// Maximum relative humidity (%)
    pub const HUMIDITY_MAX_PCT: f64 = 100.0;
    /// Minimum wind speed (m/s)
    pub const WIND_SPEED_MIN_MS: f64 = 0.0;
    /// Maximum plausible wind speed (m/s)
    pub const WIND_SPEED_MAX_MS: f64 = 500.0;
    /// Minimum plausible sea-level pressure (hPa)
    pub const PRESSURE_MIN_HPA: f64 = 800.0;
    /// Maximum plausible sea-level pressure (hPa)
    pub const PRESSURE_MAX_HPA: f64 = 1100.0;

    /// Latitude bound (degrees)
    pub const LATITUDE_LIMIT: f64 = 90.0;
    /// Longitude bound (degrees)
    pub const LONGITUDE_LIMIT: f64 = 180.0;
    /// Lowest dry land elevation, Dead Sea shore (m)
    pub const ELEVATION_MIN_M: f64 = -420.0;
}

/// Threshold values used by the deterministic hazard formulas
pub mod hazard_thresholds {
    /// Heatwave temperature threshold (°C)
    pub const HEATWAVE_TEMPERATURE_C: f64 = 35.0;
    /// Flood daily precipitation threshold (mm)
    pub const FLOOD_PRECIPITATION_MM: f64 = 50.0;

    /// Blackout: wind speed that stresses transmission lines (m/s)
    pub const BLACKOUT_WIND_MS: f64 = 50.0;
    /// Blackout: temperature that overloads the grid (°C)
    pub const BLACKOUT_TEMPERATURE_C: f64 = 35.0;
    /// Blackout: precipitation that floods substations (mm)
    pub const BLACKOUT_PRECIPITATION_MM: f64 = 100.0;
    /// Blackout contribution for high wind
    pub const BLACKOUT_WIND_WEIGHT: f64 = 0.3;
    /// Blackout contribution for high temperature
    pub const BLACKOUT_TEMPERATURE_WEIGHT: f64 = 0.2;
    /// Blackout contribution for heavy precipitation
    pub const BLACKOUT_PRECIPITATION_WEIGHT: f64 = 0.25;

    /// Heatwave formula baseline temperature (°C)
    pub const HEATWAVE_BASELINE_C: f64 = 25.0;
    /// Heatwave formula span from baseline to saturation (°C)
    pub const HEATWAVE_SPAN_C: f64 = 15.0;

    /// Flood baseline normalization for mean precipitation (mm)
    pub const FLOOD_PRECIPITATION_SCALE_MM: f64 = 50.0;
    /// Elevation at which the flood elevation factor reaches its floor (m)
    pub const FLOOD_ELEVATION_SCALE_M: f64 = 1000.0;
    /// Floor of the flood elevation factor
    pub const FLOOD_ELEVATION_FACTOR_MIN: f64 = 0.1;

    /// Hurricane-force wind, 119 km/h (m/s)
    pub const HURRICANE_WIND_MS: f64 = 33.0;
    /// Hurricane central pressure threshold (hPa)
    pub const HURRICANE_PRESSURE_HPA: f64 = 980.0;
    /// Hurricane contribution of wind exceedance fraction
    pub const HURRICANE_WIND_WEIGHT: f64 = 0.6;
    /// Hurricane contribution of pressure exceedance fraction
    pub const HURRICANE_PRESSURE_WEIGHT: f64 = 0.4;

    /// Drought: daily precipitation below this is dry (mm)
    pub const DROUGHT_PRECIPITATION_MM: f64 = 5.0;
    /// Drought: temperature above this is hot (°C)
    pub const DROUGHT_TEMPERATURE_C: f64 = 30.0;

    /// Landslide: saturating rainfall (mm)
    pub const LANDSLIDE_PRECIPITATION_MM: f64 = 50.0;
    /// Landslide: saturated-air humidity (%)
    pub const LANDSLIDE_HUMIDITY_PCT: f64 = 90.0;
    /// Landslide: elevation at which relief contribution saturates (m)
    pub const LANDSLIDE_ELEVATION_SCALE_M: f64 = 2000.0;
    /// Landslide contribution of heavy-rain fraction
    pub const LANDSLIDE_PRECIPITATION_WEIGHT: f64 = 0.5;
    /// Landslide contribution of saturated-air fraction
    pub const LANDSLIDE_HUMIDITY_WEIGHT: f64 = 0.3;
    /// Landslide contribution of relief
    pub const LANDSLIDE_RELIEF_WEIGHT: f64 = 0.2;
}

/// Risk level breakpoints on the [0, 1] score scale
pub mod risk_levels {
    /// Score at or above which risk is extreme
    pub const EXTREME: f64 = 0.8;
    /// Score at or above which risk is high
    pub const HIGH: f64 = 0.6;
    /// Score at or above which risk is moderate
    pub const MODERATE: f64 = 0.4;
}

/// Confidence thresholds below which confidence is forced to zero
pub mod confidence {
    /// Flood confidence threshold
    pub const FLOOD: f64 = 0.8;
    /// Heatwave confidence threshold
    pub const HEATWAVE: f64 = 0.85;
    /// Hurricane confidence threshold
    pub const HURRICANE: f64 = 0.9;
    /// Drought confidence threshold
    pub const DROUGHT: f64 = 0.75;
    /// Landslide confidence threshold
    pub const LANDSLIDE: f64 = 0.75;
    /// Blackout confidence threshold
    pub const BLACKOUT: f64 = 0.8;
}

/// Weights for the overall weighted risk
pub mod weights {
    /// Flood weight
    pub const FLOOD: f64 = 0.30;
    /// Heatwave weight
    pub const HEATWAVE: f64 = 0.25;
    /// Hurricane weight
    pub const HURRICANE: f64 = 0.20;
    /// Drought weight
    pub const DROUGHT: f64 = 0.15;
    /// Landslide weight
    pub const LANDSLIDE: f64 = 0.10;
    /// Weight for hazards absent from the table
    pub const DEFAULT: f64 = 0.1;
}

/// Duration estimation constants (days)
pub mod duration {
    /// Minimum heatwave duration
    pub const HEATWAVE_MIN_DAYS: u32 = 3;
    /// Days added to consecutive risk days for floods
    pub const FLOOD_EXTRA_DAYS: u32 = 2;
    /// Maximum flood duration
    pub const FLOOD_MAX_DAYS: u32 = 7;
    /// Standard hurricane duration
    pub const HURRICANE_DAYS: u32 = 2;
    /// Base blackout duration
    pub const BLACKOUT_BASE_DAYS: f64 = 1.0;
    /// Extra blackout days at full severity
    pub const BLACKOUT_SEVERITY_DAYS: f64 = 5.0;
    /// Maximum blackout duration
    pub const BLACKOUT_MAX_DAYS: u32 = 6;
}

/// Health impact trigger thresholds
pub mod health {
    /// Flood score above which immediate hazards apply
    pub const FLOOD_IMMEDIATE: f64 = 0.6;
    /// Heatwave score above which ongoing hazards apply
    pub const HEATWAVE_ONGOING: f64 = 0.5;
    /// Blackout score above which long-term hazards apply
    pub const BLACKOUT_LONGTERM: f64 = 0.7;

    /// Vulnerability multiplier for elderly populations
    pub const ELDERLY_POPULATION_FACTOR: f64 = 1.5;
    /// Vulnerability multiplier for good healthcare access
    pub const HEALTHCARE_ACCESS_FACTOR: f64 = 0.8;
    /// Vulnerability multiplier for air quality sensitivity
    pub const AIR_QUALITY_SENSITIVITY_FACTOR: f64 = 1.2;
    /// Topography indicator value above which a vulnerability factor applies
    pub const VULNERABILITY_INDICATOR_THRESHOLD: f64 = 0.5;
}

/// Recommendation trigger thresholds
pub mod recommendations {
    /// Any score above this triggers critical actions
    pub const CRITICAL_SCORE: f64 = 0.8;
    /// Blackout score above this triggers important actions
    pub const BLACKOUT_IMPORTANT: f64 = 0.6;
}

/// Historical analysis constants
pub mod historical {
    /// Seasonal period in daily samples
    pub const SEASONAL_PERIOD: usize = 365;
    /// Number of seasonal cycles required for decomposition
    pub const MIN_CYCLES: usize = 2;
    /// Analogue windows must exceed this similarity
    pub const SIMILARITY_THRESHOLD: f64 = 0.8;
    /// Maximum analogue matches returned
    pub const MAX_MATCHES: usize = 5;
    /// |z-score| at or above which a sample is extreme
    pub const EXTREME_Z_SCORE: f64 = 2.5;
    /// Maximum extremes reported per variable
    pub const MAX_EXTREMES_PER_VARIABLE: usize = 10;
}

/// Ensemble learner defaults
pub mod ensemble {
    /// Number of bootstrap members
    pub const MEMBERS: usize = 10;
    /// Ridge regularization strength
    pub const RIDGE_LAMBDA: f64 = 1.0e-3;
    /// Deterministic seed for bootstrap resampling
    pub const SEED: u64 = 42;
    /// Minimum rows required to train
    pub const MIN_TRAINING_ROWS: usize = 5;
    /// Cross-validation folds scored before a model is installed
    pub const CV_FOLDS: usize = 5;
    /// Training runs kept in each hazard's metrics history
    pub const METRICS_HISTORY: usize = 20;
}

/// Ingestion defaults
pub mod ingestion {
    /// Per-source request timeout (seconds)
    pub const SOURCE_TIMEOUT_SECS: u64 = 10;
    /// Per-source concurrent request permits
    pub const SOURCE_RATE_LIMIT: usize = 60;
    /// Default number of forecast days to fetch
    pub const DEFAULT_DAYS: u32 = 7;
}

/// Service identity used in logs
pub mod service_names {
    /// Service name for structured logging
    pub const CLIMATE_RISK_ENGINE: &str = "climate-risk-engine";
}
