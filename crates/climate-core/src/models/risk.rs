// ABOUTME: Risk score and risk assessment value objects with validity windows
// ABOUTME: Enforces bounded scores and ordered, nested validity intervals on construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::hazard::{HazardType, RiskLevel};
use crate::errors::{ClimateError, ClimateResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Half-open validity interval with `valid_to` strictly after `valid_from`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidityWindow {
    valid_from: DateTime<Utc>,
    valid_to: DateTime<Utc>,
}

impl ValidityWindow {
    /// Create a validity window
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` unless `valid_to > valid_from`
    pub fn new(valid_from: DateTime<Utc>, valid_to: DateTime<Utc>) -> ClimateResult<Self> {
        if valid_to <= valid_from {
            return Err(ClimateError::validation(format!(
                "valid_to ({valid_to}) must be after valid_from ({valid_from})"
            )));
        }
        Ok(Self {
            valid_from,
            valid_to,
        })
    }

    /// Start of the window
    #[must_use]
    pub const fn valid_from(&self) -> DateTime<Utc> {
        self.valid_from
    }

    /// End of the window
    #[must_use]
    pub const fn valid_to(&self) -> DateTime<Utc> {
        self.valid_to
    }

    /// Whether `other` lies entirely inside this window
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.valid_from >= self.valid_from && other.valid_to <= self.valid_to
    }
}

/// Calibrated score for a single hazard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskScore {
    hazard: HazardType,
    score: f64,
    confidence: f64,
    level: RiskLevel,
    #[serde(flatten)]
    window: ValidityWindow,
}

impl RiskScore {
    /// Create a risk score, clamping score and confidence to [0, 1]
    ///
    /// The level is always derived from the clamped score.
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` if score or confidence is not finite
    pub fn new(
        hazard: HazardType,
        score: f64,
        confidence: f64,
        window: ValidityWindow,
    ) -> ClimateResult<Self> {
        if !score.is_finite() || !confidence.is_finite() {
            return Err(ClimateError::validation(format!(
                "{hazard} score {score} / confidence {confidence} must be finite"
            )));
        }
        let score = score.clamp(0.0, 1.0);
        Ok(Self {
            hazard,
            score,
            confidence: confidence.clamp(0.0, 1.0),
            level: RiskLevel::from_score(score),
            window,
        })
    }

    /// Hazard this score belongs to
    #[must_use]
    pub const fn hazard(&self) -> HazardType {
        self.hazard
    }

    /// Score in [0, 1]
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Confidence in [0, 1]
    #[must_use]
    pub const fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Level derived from the score
    #[must_use]
    pub const fn level(&self) -> RiskLevel {
        self.level
    }

    /// Validity window
    #[must_use]
    pub const fn window(&self) -> ValidityWindow {
        self.window
    }
}

/// Aggregate risk for one location
///
/// A hazard whose predictor failed maps to `None` and has an entry in
/// `predictor_failures`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskAssessment {
    scores: BTreeMap<HazardType, Option<RiskScore>>,
    predictor_failures: BTreeMap<HazardType, String>,
    overall_risk: f64,
    overall_level: RiskLevel,
    assessed_at: DateTime<Utc>,
    #[serde(flatten)]
    window: ValidityWindow,
}

impl RiskAssessment {
    /// Create an assessment
    ///
    /// # Errors
    ///
    /// Returns `ClimateError::Validation` if `overall_risk` is not finite or any
    /// constituent score window falls outside the assessment window
    pub fn new(
        scores: BTreeMap<HazardType, Option<RiskScore>>,
        predictor_failures: BTreeMap<HazardType, String>,
        overall_risk: f64,
        assessed_at: DateTime<Utc>,
        window: ValidityWindow,
    ) -> ClimateResult<Self> {
        if !overall_risk.is_finite() {
            return Err(ClimateError::validation("overall risk must be finite"));
        }
        if let Some(outside) = scores
            .values()
            .flatten()
            .find(|score| !window.contains(&score.window))
        {
            return Err(ClimateError::validation(format!(
                "{} score window must lie within the assessment window",
                outside.hazard
            )));
        }

        let overall_risk = overall_risk.clamp(0.0, 1.0);
        Ok(Self {
            scores,
            predictor_failures,
            overall_risk,
            overall_level: RiskLevel::from_score(overall_risk),
            assessed_at,
            window,
        })
    }

    /// All hazard slots, `None` where the predictor failed
    #[must_use]
    pub const fn scores(&self) -> &BTreeMap<HazardType, Option<RiskScore>> {
        &self.scores
    }

    /// Risk score for a hazard, if it was produced
    #[must_use]
    pub fn risk_score(&self, hazard: HazardType) -> Option<&RiskScore> {
        self.scores.get(&hazard).and_then(Option::as_ref)
    }

    /// Numeric score for a hazard, if it was produced
    #[must_use]
    pub fn score(&self, hazard: HazardType) -> Option<f64> {
        self.risk_score(hazard).map(RiskScore::score)
    }

    /// Hazard → score for every produced score
    #[must_use]
    pub fn score_map(&self) -> BTreeMap<HazardType, f64> {
        self.scores
            .iter()
            .filter_map(|(hazard, score)| score.as_ref().map(|s| (*hazard, s.score)))
            .collect()
    }

    /// Failure reasons for hazards without a score
    #[must_use]
    pub const fn predictor_failures(&self) -> &BTreeMap<HazardType, String> {
        &self.predictor_failures
    }

    /// Weighted overall risk in [0, 1]
    #[must_use]
    pub const fn overall_risk(&self) -> f64 {
        self.overall_risk
    }

    /// Level derived from the overall risk
    #[must_use]
    pub const fn overall_level(&self) -> RiskLevel {
        self.overall_level
    }

    /// When the assessment was produced
    #[must_use]
    pub const fn assessed_at(&self) -> DateTime<Utc> {
        self.assessed_at
    }

    /// Validity window containing every constituent score window
    #[must_use]
    pub const fn window(&self) -> ValidityWindow {
        self.window
    }
}
