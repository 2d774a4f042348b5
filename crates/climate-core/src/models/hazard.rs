// ABOUTME: Closed hazard enumeration and score-derived risk levels
// ABOUTME: Replaces string-keyed hazard dispatch with an exhaustive tagged union
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::risk_levels;
use crate::errors::ClimateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Climate hazard categories evaluated by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardType {
    /// Riverine or pluvial flooding
    Flood,
    /// Sustained extreme heat
    Heatwave,
    /// Tropical cyclone conditions
    Hurricane,
    /// Prolonged dry and hot conditions
    Drought,
    /// Slope failure driven by saturation
    Landslide,
    /// Power infrastructure failure
    Blackout,
}

impl HazardType {
    /// Every hazard, in canonical order
    pub const ALL: [Self; 6] = [
        Self::Flood,
        Self::Heatwave,
        Self::Hurricane,
        Self::Drought,
        Self::Landslide,
        Self::Blackout,
    ];

    /// Lowercase identifier used in serialized output and environment keys
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::Heatwave => "heatwave",
            Self::Hurricane => "hurricane",
            Self::Drought => "drought",
            Self::Landslide => "landslide",
            Self::Blackout => "blackout",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardType {
    type Err = ClimateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|hazard| hazard.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ClimateError::validation(format!("unknown hazard type '{s}'")))
    }
}

/// Risk level classification derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 0.4
    Low,
    /// Score in [0.4, 0.6)
    Moderate,
    /// Score in [0.6, 0.8)
    High,
    /// Score at or above 0.8
    Extreme,
}

impl RiskLevel {
    /// Derive the level from a score using fixed breakpoints
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score >= risk_levels::EXTREME {
            Self::Extreme
        } else if score >= risk_levels::HIGH {
            Self::High
        } else if score >= risk_levels::MODERATE {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Lowercase identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Extreme => "extreme",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
