// ABOUTME: Climate risk engine service facade over scoring, historical analysis, and ingestion
// ABOUTME: Exposes assessment, duration, health, recommendation, and analogue operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Climate Risk Engine
//!
//! Scores climate-hazard risk for a location from a sequence of weather
//! observations, and mines long-run records for analogous past episodes.
//!
//! ## Crates
//!
//! - **climate-core**: errors, constants, domain models, configuration
//! - **climate-intelligence**: feature extraction, predictors, combiner, duration,
//!   health impact, recommendations, and historical analysis
//! - **climate-providers**: weather sources, circuit breaker, concurrent ingestion,
//!   historical stores
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use climate_risk_engine::ClimateRiskService;
//! use climate_risk_engine::intelligence::PredictorRegistry;
//! use climate_risk_engine::models::{LocationProfile, WeatherObservation};
//! use climate_risk_engine::providers::InMemoryHistoricalStore;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = ClimateRiskService::new(
//!     Arc::new(PredictorRegistry::new()),
//!     Arc::new(InMemoryHistoricalStore::new()),
//! );
//! let location = LocationProfile::new(29.76, -95.37, 15.0, "houston")?;
//! let observations: Vec<WeatherObservation> = Vec::new();
//! let report = service.full_report(&location, &observations);
//! # drop(report);
//! # Ok(())
//! # }
//! ```

pub use climate_core::config;
pub use climate_core::constants;
pub use climate_core::errors;
pub use climate_core::models;
pub use climate_intelligence as intelligence;
pub use climate_providers as providers;

/// Structured logging setup
pub mod logging;
/// Serializable report types
pub mod report;
/// Service facade over the engine components
pub mod service;

pub use report::{ClimateReport, SourcedReport};
pub use service::ClimateRiskService;
