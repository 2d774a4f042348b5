// ABOUTME: Core types and constants for the climate risk scoring engine
// ABOUTME: Foundation crate with error handling, domain models, thresholds, and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Climate Core
//!
//! Foundation crate providing shared types and constants for the climate risk
//! engine. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `ClimateError` and `ErrorCode`
//! - **constants**: Physical bounds, hazard thresholds, and catalog text
//! - **models**: Observations, locations, hazard types, risk scores, and analogue matches
//! - **config**: Engine configuration with environment overrides and validation

/// Unified error handling system with standard error codes
pub mod errors;

/// Physical bounds, hazard thresholds, and weight tables organized by domain
pub mod constants;

/// Core data models (observations, locations, risk scores, historical windows)
pub mod models;

/// Engine configuration (thresholds, weights, ensemble and historical settings)
pub mod config;

pub use errors::{ClimateError, ClimateResult, ErrorCode};
