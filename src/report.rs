// ABOUTME: Serializable report combining an assessment with its downstream analyses
// ABOUTME: Durations, health hazards, recommendations, and optional historical context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::intelligence::{HealthHazards, HistoricalReport, Recommendations};
use crate::models::{HazardType, RiskAssessment};
use crate::providers::IngestionReport;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Everything the engine derives from one observation sequence
#[derive(Debug, Clone, Serialize)]
pub struct ClimateReport {
    /// Region the report covers
    pub region: String,
    /// Calibrated hazard scores
    pub assessment: RiskAssessment,
    /// Expected duration in days per hazard
    pub durations: BTreeMap<HazardType, u32>,
    /// Health hazards implied by the scores
    pub health: HealthHazards,
    /// Recommended actions
    pub recommendations: Recommendations,
    /// Historical analysis, when the store holds a record for the location
    pub historical: Option<HistoricalReport>,
}

impl ClimateReport {
    /// Hazards whose score reached `threshold`
    #[must_use]
    pub fn hazards_at_or_above(&self, threshold: f64) -> BTreeSet<HazardType> {
        self.assessment
            .score_map()
            .into_iter()
            .filter(|(_, score)| *score >= threshold)
            .map(|(hazard, _)| hazard)
            .collect()
    }
}

/// A report built from live sources, with the ingestion outcome
#[derive(Debug)]
pub struct SourcedReport {
    /// Report over the merged observations
    pub report: ClimateReport,
    /// What each source contributed
    pub ingestion: IngestionReport,
}
