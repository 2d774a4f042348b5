// ABOUTME: Concurrent ingestion from multiple weather sources into one observation series
// ABOUTME: Per-source permits, timeouts, and circuit breakers; failures are isolated and reported
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Integration
//!
//! All registered sources are fetched at once. Each source holds its own
//! semaphore (the rate limit), request timeout, and circuit breaker, so a slow
//! or failing source only affects its own contribution.
//!
//! Merging keeps observations that pass the physical-bounds check, sorts them
//! by timestamp, and drops later duplicates of a timestamp. Sources are merged
//! in registration order, so the earliest registered source wins a tie.

use crate::circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState};
use crate::config::IngestionConfig;
use crate::error::SourceError;
use crate::models::{LocationProfile, WeatherObservation};
use crate::source::WeatherSource;
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Limits applied to a single source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSettings {
    /// Request timeout
    pub timeout: Duration,
    /// Concurrent in-flight requests allowed
    pub rate_limit: usize,
    /// Breaker thresholds
    pub breaker: CircuitBreakerConfig,
}

impl SourceSettings {
    /// Settings derived from the ingestion defaults
    #[must_use]
    pub fn from_config(config: &IngestionConfig) -> Self {
        Self {
            timeout: config.source_timeout(),
            rate_limit: config.source_rate_limit,
            breaker: CircuitBreakerConfig::default(),
        }
    }
}

struct RegisteredSource {
    source: Arc<dyn WeatherSource>,
    permits: Semaphore,
    breaker: CircuitBreaker,
    timeout: Duration,
}

impl RegisteredSource {
    async fn fetch(
        &self,
        location: &LocationProfile,
        days: u32,
    ) -> Result<Vec<WeatherObservation>, SourceError> {
        let name = self.source.name();
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| SourceError::fetch(name, "source permits closed"))?;

        let limit = self.timeout;
        self.breaker
            .call(async {
                match timeout(limit, self.source.fetch(location, days)).await {
                    Ok(result) => result,
                    Err(_) => Err(SourceError::Timeout {
                        source_name: name.to_owned(),
                        timeout_secs: limit.as_secs(),
                    }),
                }
            })
            .await
    }
}

/// Outcome of one ingestion run
#[derive(Debug, Default)]
pub struct IngestionReport {
    /// Merged, validated, time-ordered observations
    pub observations: Vec<WeatherObservation>,
    /// Sources that returned data
    pub succeeded: Vec<String>,
    /// Failure message per failed source
    pub failures: BTreeMap<String, String>,
    /// Observations dropped for failing bounds checks
    pub rejected: usize,
    /// Observations dropped as duplicate timestamps
    pub duplicates: usize,
}

impl IngestionReport {
    /// Whether any source failed
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Fan-out ingestion across registered weather sources
pub struct DataIntegration {
    sources: Vec<RegisteredSource>,
    defaults: IngestionConfig,
}

impl Default for DataIntegration {
    fn default() -> Self {
        Self::with_config(IngestionConfig::default())
    }
}

impl DataIntegration {
    /// Integration with default ingestion settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Integration whose sources default to `config`
    #[must_use]
    pub const fn with_config(config: IngestionConfig) -> Self {
        Self {
            sources: Vec::new(),
            defaults: config,
        }
    }

    /// Ingestion defaults
    #[must_use]
    pub const fn config(&self) -> &IngestionConfig {
        &self.defaults
    }

    /// Register a source with the default settings
    pub fn register(&mut self, source: Arc<dyn WeatherSource>) -> &mut Self {
        let settings = SourceSettings::from_config(&self.defaults);
        self.register_with(source, settings)
    }

    /// Register a source with explicit settings
    pub fn register_with(
        &mut self,
        source: Arc<dyn WeatherSource>,
        settings: SourceSettings,
    ) -> &mut Self {
        let name = source.name().to_owned();
        debug!(
            source = %name,
            timeout_secs = settings.timeout.as_secs(),
            rate_limit = settings.rate_limit,
            "Registered weather source"
        );
        self.sources.push(RegisteredSource {
            permits: Semaphore::new(settings.rate_limit.max(1)),
            breaker: CircuitBreaker::with_config(&name, settings.breaker),
            timeout: settings.timeout,
            source,
        });
        self
    }

    /// Names of registered sources in registration order
    #[must_use]
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.source.name()).collect()
    }

    /// Number of registered sources
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Whether no sources are registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Breaker state of a source
    #[must_use]
    pub fn circuit_state(&self, source_name: &str) -> Option<CircuitState> {
        self.sources
            .iter()
            .find(|s| s.source.name() == source_name)
            .map(|s| s.breaker.state())
    }

    /// Fetch every source concurrently and merge the results
    pub async fn fetch_all(&self, location: &LocationProfile, days: u32) -> IngestionReport {
        let results = join_all(
            self.sources
                .iter()
                .map(|registered| registered.fetch(location, days)),
        )
        .await;

        let mut report = IngestionReport::default();
        let mut merged = Vec::new();
        for (registered, result) in self.sources.iter().zip(results) {
            let name = registered.source.name();
            match result {
                Ok(observations) => {
                    debug!(source = %name, count = observations.len(), "Source fetched");
                    merged.extend(observations);
                    report.succeeded.push(name.to_owned());
                }
                Err(error) => {
                    warn!(source = %name, error = %error, "Weather source failed");
                    report.failures.insert(name.to_owned(), error.to_string());
                }
            }
        }

        let fetched = merged.len();
        merged.retain(|obs| match obs.check_bounds() {
            Ok(()) => true,
            Err(error) => {
                warn!(timestamp = %obs.timestamp(), error = %error, "Dropping invalid observation");
                false
            }
        });
        report.rejected = fetched - merged.len();

        // Stable sort keeps registration order within a timestamp
        merged.sort_by_key(WeatherObservation::timestamp);
        let validated = merged.len();
        merged.dedup_by_key(|obs| obs.timestamp());
        report.duplicates = validated - merged.len();
        report.observations = merged;

        info!(
            region = location.region(),
            sources = self.sources.len(),
            failed = report.failures.len(),
            observations = report.observations.len(),
            rejected = report.rejected,
            duplicates = report.duplicates,
            "Ingestion complete"
        );
        report
    }
}
