// ABOUTME: Validated location profile with coordinates, elevation, and terrain metadata
// ABOUTME: Rejects out-of-range coordinates and elevations on construction and deserialization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::physical_bounds::{ELEVATION_MIN_M, LATITUDE_LIMIT, LONGITUDE_LIMIT};
use crate::errors::{ClimateError, ClimateResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Default soil type when none is known
const UNKNOWN_SOIL: &str = "unknown";

/// Geographic location being assessed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocationProfile")]
pub struct LocationProfile {
    latitude: f64,
    longitude: f64,
    elevation: f64,
    region: String,
    soil_type: String,
    population_density: f64,
    topography: BTreeMap<String, f64>,
}

/// Unvalidated wire shape, converted through [`LocationProfile::new`]
#[derive(Deserialize)]
struct RawLocationProfile {
    latitude: f64,
    longitude: f64,
    elevation: f64,
    region: String,
    #[serde(default)]
    soil_type: Option<String>,
    #[serde(default)]
    population_density: f64,
    #[serde(default)]
    topography: BTreeMap<String, f64>,
}

impl TryFrom<RawLocationProfile> for LocationProfile {
    type Error = ClimateError;

    fn try_from(raw: RawLocationProfile) -> Result<Self, Self::Error> {
        let mut profile = Self::new(raw.latitude, raw.longitude, raw.elevation, raw.region)?
            .with_population_density(raw.population_density)
            .with_topography(raw.topography);
        if let Some(soil) = raw.soil_type {
            profile = profile.with_soil_type(soil);
        }
        Ok(profile)
    }
}

impl LocationProfile {
    /// Create a validated location profile
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::InvalidLocation` if latitude is outside [-90, 90],
    /// longitude outside [-180, 180], or elevation below -420 m.
    pub fn new(
        latitude: f64,
        longitude: f64,
        elevation: f64,
        region: impl Into<String>,
    ) -> ClimateResult<Self> {
        if !latitude.is_finite() || latitude.abs() > LATITUDE_LIMIT {
            return Err(ClimateError::invalid_location(format!(
                "latitude {latitude} outside [-{LATITUDE_LIMIT}, {LATITUDE_LIMIT}]"
            )));
        }
        if !longitude.is_finite() || longitude.abs() > LONGITUDE_LIMIT {
            return Err(ClimateError::invalid_location(format!(
                "longitude {longitude} outside [-{LONGITUDE_LIMIT}, {LONGITUDE_LIMIT}]"
            )));
        }
        if !elevation.is_finite() || elevation < ELEVATION_MIN_M {
            return Err(ClimateError::invalid_location(format!(
                "elevation {elevation} m below {ELEVATION_MIN_M} m"
            )));
        }

        Ok(Self {
            latitude,
            longitude,
            elevation,
            region: region.into(),
            soil_type: UNKNOWN_SOIL.to_owned(),
            population_density: 0.0,
            topography: BTreeMap::new(),
        })
    }

    /// Set the soil type label
    #[must_use]
    pub fn with_soil_type(mut self, soil_type: impl Into<String>) -> Self {
        self.soil_type = soil_type.into();
        self
    }

    /// Set population density (people per km²)
    #[must_use]
    pub fn with_population_density(mut self, population_density: f64) -> Self {
        self.population_density = population_density.max(0.0);
        self
    }

    /// Replace the topography feature map
    #[must_use]
    pub fn with_topography(mut self, topography: BTreeMap<String, f64>) -> Self {
        self.topography = topography;
        self
    }

    /// Add a single topography feature
    #[must_use]
    pub fn with_topography_feature(mut self, feature: impl Into<String>, value: f64) -> Self {
        self.topography.insert(feature.into(), value);
        self
    }

    /// Latitude in degrees
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Elevation in meters
    #[must_use]
    pub const fn elevation(&self) -> f64 {
        self.elevation
    }

    /// Region label
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Soil type label
    #[must_use]
    pub fn soil_type(&self) -> &str {
        &self.soil_type
    }

    /// Population density (people per km²)
    #[must_use]
    pub const fn population_density(&self) -> f64 {
        self.population_density
    }

    /// Topography features
    #[must_use]
    pub const fn topography(&self) -> &BTreeMap<String, f64> {
        &self.topography
    }

    /// Look up a single topography feature
    #[must_use]
    pub fn topography_feature(&self, feature: &str) -> Option<f64> {
        self.topography.get(feature).copied()
    }
}
