// ABOUTME: Core data models for observations, locations, hazards, and risk assessments
// ABOUTME: Immutable value objects validated on construction and serialized in canonical units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! All values use canonical units: °C, mm, %, m/s, hPa. Serialized field names are part
//! of the contract with collaborators and must not change.

mod hazard;
mod historical;
mod location;
mod observation;
mod risk;

pub use hazard::{HazardType, RiskLevel};
pub use historical::{AnalogueMatch, AnalogueOutcome, ClimateVariable, HistoricalWindow};
pub use location::LocationProfile;
pub use observation::WeatherObservation;
pub use risk::{RiskAssessment, RiskScore, ValidityWindow};
