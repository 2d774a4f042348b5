// ABOUTME: Weather data sources and historical record stores for the climate risk engine
// ABOUTME: Async source trait, circuit breaker, concurrent rate-limited ingestion, and history lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Weather source integrations and historical stores.
//!
//! Sources are fetched concurrently, each behind its own permit pool, timeout,
//! and circuit breaker. A failing source never blocks the others.

// Re-export climate-core modules so source files can keep `use crate::models::*` etc.
pub use climate_core::config;
pub use climate_core::constants;
pub use climate_core::errors;
pub use climate_core::models;

/// Circuit breaker pattern for source resilience
pub mod circuit_breaker;
/// Source-level error type
pub mod error;
/// Concurrent multi-source ingestion
pub mod integration;
/// Weather source trait and built-in sources
pub mod source;
/// Historical record lookup by location
pub mod store;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
pub use error::SourceError;
pub use integration::{DataIntegration, IngestionReport, SourceSettings};
pub use source::{JsonFileSource, StaticSource, WeatherSource};
pub use store::{HistoricalStore, InMemoryHistoricalStore};
