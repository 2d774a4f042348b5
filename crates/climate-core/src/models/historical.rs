// ABOUTME: Historical window, climate variable selector, and analogue match types
// ABOUTME: Windows keep observations in timestamp order for series extraction and sliding search
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::hazard::{HazardType, RiskLevel};
use super::observation::WeatherObservation;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Observed variable used for trends, decomposition, and similarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateVariable {
    /// Air temperature (°C)
    Temperature,
    /// Precipitation (mm)
    Precipitation,
    /// Relative humidity (%)
    Humidity,
    /// Wind speed (m/s)
    WindSpeed,
    /// Sea-level pressure (hPa)
    Pressure,
}

impl ClimateVariable {
    /// Every variable, in feature-space order
    pub const ALL: [Self; 5] = [
        Self::Temperature,
        Self::Precipitation,
        Self::Humidity,
        Self::WindSpeed,
        Self::Pressure,
    ];

    /// Read this variable from an observation
    #[must_use]
    pub const fn value(self, observation: &WeatherObservation) -> f64 {
        match self {
            Self::Temperature => observation.temperature(),
            Self::Precipitation => observation.precipitation(),
            Self::Humidity => observation.humidity(),
            Self::WindSpeed => observation.wind_speed(),
            Self::Pressure => observation.pressure(),
        }
    }

    /// Snake-case identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Precipitation => "precipitation",
            Self::Humidity => "humidity",
            Self::WindSpeed => "wind_speed",
            Self::Pressure => "pressure",
        }
    }
}

impl fmt::Display for ClimateVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date-ordered sequence of observations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<WeatherObservation>", into = "Vec<WeatherObservation>")]
pub struct HistoricalWindow {
    observations: Vec<WeatherObservation>,
}

impl From<Vec<WeatherObservation>> for HistoricalWindow {
    fn from(observations: Vec<WeatherObservation>) -> Self {
        Self::new(observations)
    }
}

impl From<HistoricalWindow> for Vec<WeatherObservation> {
    fn from(window: HistoricalWindow) -> Self {
        window.observations
    }
}

impl HistoricalWindow {
    /// Build a window, sorting observations by timestamp
    #[must_use]
    pub fn new(mut observations: Vec<WeatherObservation>) -> Self {
        observations.sort_by_key(WeatherObservation::timestamp);
        Self { observations }
    }

    /// Number of observations
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the window holds no observations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations in timestamp order
    #[must_use]
    pub fn observations(&self) -> &[WeatherObservation] {
        &self.observations
    }

    /// Values of one variable in timestamp order
    #[must_use]
    pub fn series(&self, variable: ClimateVariable) -> Vec<f64> {
        self.observations
            .iter()
            .map(|obs| variable.value(obs))
            .collect()
    }

    /// Calendar date of the first observation
    #[must_use]
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.observations
            .first()
            .map(|obs| obs.timestamp().date_naive())
    }
}

/// Hazard outcome realized after (or during) a historical analogue window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogueOutcome {
    /// Realized level per hazard
    pub hazard_levels: BTreeMap<HazardType, RiskLevel>,
    /// Realized score per hazard
    pub hazard_scores: BTreeMap<HazardType, f64>,
    /// Number of observations inspected
    pub observed_days: usize,
    /// True when the outcome comes from the days following the window
    pub from_subsequent: bool,
}

/// A historical window similar to the current conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalogueMatch {
    /// Date of the first observation in the matched window
    pub start_date: NaiveDate,
    /// Index of the first observation within the history
    pub start_index: usize,
    /// Similarity in (0, 1]
    pub similarity: f64,
    /// What happened next
    pub outcome: AnalogueOutcome,
}
