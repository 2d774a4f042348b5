// ABOUTME: Weather observation value object in canonical units
// ABOUTME: Immutable once built; produced by ingestion collaborators and consumed by the engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::physical_bounds::{
    HUMIDITY_MAX_PCT, HUMIDITY_MIN_PCT, PRECIPITATION_MAX_MM, PRECIPITATION_MIN_MM,
    PRESSURE_MAX_HPA, PRESSURE_MIN_HPA, TEMPERATURE_MAX_C, TEMPERATURE_MIN_C, WIND_SPEED_MAX_MS,
    WIND_SPEED_MIN_MS,
};
use crate::errors::{ClimateError, ClimateResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single weather observation
///
/// Fields are only readable through accessors so an observation cannot be
/// changed after it has been built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    /// Air temperature (°C)
    temperature: f64,
    /// Precipitation (mm)
    precipitation: f64,
    /// Relative humidity (%)
    humidity: f64,
    /// Wind speed (m/s)
    wind_speed: f64,
    /// Sea-level pressure (hPa)
    pressure: f64,
    /// Observation time
    timestamp: DateTime<Utc>,
    /// UV index
    #[serde(default)]
    uv_index: f64,
    /// Pollutant concentrations keyed by pollutant name
    #[serde(default)]
    air_quality: BTreeMap<String, f64>,
}

impl WeatherObservation {
    /// Create an observation with zero UV index and no air quality data
    #[must_use]
    pub const fn new(
        temperature: f64,
        precipitation: f64,
        humidity: f64,
        wind_speed: f64,
        pressure: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            temperature,
            precipitation,
            humidity,
            wind_speed,
            pressure,
            timestamp,
            uv_index: 0.0,
            air_quality: BTreeMap::new(),
        }
    }

    /// Set the UV index
    #[must_use]
    pub fn with_uv_index(mut self, uv_index: f64) -> Self {
        self.uv_index = uv_index;
        self
    }

    /// Set pollutant concentrations
    #[must_use]
    pub fn with_air_quality(mut self, air_quality: BTreeMap<String, f64>) -> Self {
        self.air_quality = air_quality;
        self
    }

    /// Air temperature (°C)
    #[must_use]
    pub const fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Precipitation (mm)
    #[must_use]
    pub const fn precipitation(&self) -> f64 {
        self.precipitation
    }

    /// Relative humidity (%)
    #[must_use]
    pub const fn humidity(&self) -> f64 {
        self.humidity
    }

    /// Wind speed (m/s)
    #[must_use]
    pub const fn wind_speed(&self) -> f64 {
        self.wind_speed
    }

    /// Sea-level pressure (hPa)
    #[must_use]
    pub const fn pressure(&self) -> f64 {
        self.pressure
    }

    /// Observation time
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// UV index
    #[must_use]
    pub const fn uv_index(&self) -> f64 {
        self.uv_index
    }

    /// Pollutant concentrations
    #[must_use]
    pub const fn air_quality(&self) -> &BTreeMap<String, f64> {
        &self.air_quality
    }

    /// Check every measurement against its physical bounds
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::InvalidObservation` for the first field that is
    /// non-finite or outside its bounds
    pub fn check_bounds(&self) -> ClimateResult<()> {
        let checks = [
            (
                "temperature",
                self.temperature,
                TEMPERATURE_MIN_C,
                TEMPERATURE_MAX_C,
            ),
            (
                "precipitation",
                self.precipitation,
                PRECIPITATION_MIN_MM,
                PRECIPITATION_MAX_MM,
            ),
            ("humidity", self.humidity, HUMIDITY_MIN_PCT, HUMIDITY_MAX_PCT),
            (
                "wind_speed",
                self.wind_speed,
                WIND_SPEED_MIN_MS,
                WIND_SPEED_MAX_MS,
            ),
            ("pressure", self.pressure, PRESSURE_MIN_HPA, PRESSURE_MAX_HPA),
        ];

        for (field, value, min, max) in checks {
            if !value.is_finite() || value < min || value > max {
                return Err(ClimateError::InvalidObservation {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        if !self.uv_index.is_finite() {
            return Err(ClimateError::InvalidObservation {
                field: "uv_index",
                value: self.uv_index,
                min: f64::NEG_INFINITY,
                max: f64::INFINITY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> WeatherObservation {
        WeatherObservation::new(
            24.0,
            3.5,
            70.0,
            6.0,
            1009.0,
            Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        let json = r#"{
            "temperature": 24.0,
            "precipitation": 3.5,
            "humidity": 70.0,
            "wind_speed": 6.0,
            "pressure": 1009.0,
            "timestamp": "2024-07-01T12:00:00Z"
        }"#;
        let parsed: WeatherObservation = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, sample());
        assert!(parsed.air_quality().is_empty());
    }

    #[test]
    fn test_bounds_report_offending_field() {
        assert!(sample().check_bounds().is_ok());

        let humid = WeatherObservation::new(24.0, 3.5, 101.0, 6.0, 1009.0, sample().timestamp());
        assert!(matches!(
            humid.check_bounds(),
            Err(ClimateError::InvalidObservation { field: "humidity", .. })
        ));

        let no_wind = WeatherObservation::new(24.0, 3.5, 70.0, f64::INFINITY, 1009.0, sample().timestamp());
        assert!(matches!(
            no_wind.check_bounds(),
            Err(ClimateError::InvalidObservation { field: "wind_speed", .. })
        ));

        let pm25 = BTreeMap::from([("pm2_5".to_owned(), 12.0)]);
        let with_extras = sample().with_uv_index(7.5).with_air_quality(pm25);
        assert!(with_extras.check_bounds().is_ok());
        assert!((with_extras.uv_index() - 7.5).abs() < f64::EPSILON);
    }
}
