// ABOUTME: Async weather source trait with in-memory and JSON file implementations
// ABOUTME: Sources return observations for a location covering a requested number of days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::error::SourceError;
use crate::models::{LocationProfile, WeatherObservation};
use async_trait::async_trait;
use chrono::Duration;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// A provider of weather observations
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Stable name used in logs, breaker state, and failure reports
    fn name(&self) -> &str;

    /// Fetch observations for `location` spanning `days` days
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` describing why no data could be produced
    async fn fetch(
        &self,
        location: &LocationProfile,
        days: u32,
    ) -> Result<Vec<WeatherObservation>, SourceError>;
}

/// Sort by timestamp and keep the first `days` days, measured from the earliest sample
fn limit_to_days(mut observations: Vec<WeatherObservation>, days: u32) -> Vec<WeatherObservation> {
    observations.sort_by_key(WeatherObservation::timestamp);
    let Some(first) = observations.first().map(WeatherObservation::timestamp) else {
        return observations;
    };
    let cutoff = first + Duration::days(i64::from(days));
    observations.retain(|obs| obs.timestamp() < cutoff);
    observations
}

/// Source serving a fixed set of observations
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    observations: Vec<WeatherObservation>,
}

impl StaticSource {
    /// Create a source that always returns `observations`
    #[must_use]
    pub fn new(name: impl Into<String>, observations: Vec<WeatherObservation>) -> Self {
        Self {
            name: name.into(),
            observations,
        }
    }
}

#[async_trait]
impl WeatherSource for StaticSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(
        &self,
        _location: &LocationProfile,
        days: u32,
    ) -> Result<Vec<WeatherObservation>, SourceError> {
        Ok(limit_to_days(self.observations.clone(), days))
    }
}

/// Source reading a JSON array of observations from disk on every fetch
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    name: String,
    path: PathBuf,
}

impl JsonFileSource {
    /// Source named after the file stem
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
        Self { name, path }
    }

    /// Source with an explicit name
    #[must_use]
    pub fn named(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// File backing this source
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WeatherSource for JsonFileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(
        &self,
        location: &LocationProfile,
        days: u32,
    ) -> Result<Vec<WeatherObservation>, SourceError> {
        let contents = fs::read_to_string(&self.path)
            .await
            .map_err(|error| SourceError::Io {
                source_name: self.name.clone(),
                error,
            })?;
        let observations: Vec<WeatherObservation> =
            serde_json::from_str(&contents).map_err(|error| SourceError::Parse {
                source_name: self.name.clone(),
                error,
            })?;

        debug!(
            source = %self.name,
            region = location.region(),
            count = observations.len(),
            "Loaded observations from file"
        );
        Ok(limit_to_days(observations, days))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    fn observation(day: u32, temperature: f64) -> WeatherObservation {
        let timestamp = Utc.with_ymd_and_hms(2024, 7, day, 12, 0, 0).unwrap();
        WeatherObservation::new(temperature, 0.0, 50.0, 3.0, 1013.0, timestamp)
    }

    fn location() -> LocationProfile {
        LocationProfile::new(40.0, -74.0, 10.0, "test").unwrap()
    }

    #[tokio::test]
    async fn test_static_source_limits_days() {
        let source = StaticSource::new(
            "static",
            vec![observation(3, 30.0), observation(1, 28.0), observation(2, 29.0)],
        );
        let fetched = source.fetch(&location(), 2).await.unwrap();
        let temps: Vec<f64> = fetched.iter().map(WeatherObservation::temperature).collect();
        assert_eq!(temps, vec![28.0, 29.0]);
    }

    #[tokio::test]
    async fn test_json_file_source_reads_array() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        let payload = serde_json::to_string(&vec![observation(1, 25.0), observation(2, 26.0)]).unwrap();
        file.write_all(payload.as_bytes()).unwrap();

        let source = JsonFileSource::named("file", file.path());
        let fetched = source.fetch(&location(), 7).await.unwrap();
        assert_eq!(fetched.len(), 2);
    }

    #[tokio::test]
    async fn test_json_file_source_errors() {
        let missing = JsonFileSource::named("missing", "/nonexistent/observations.json");
        let err = missing.fetch(&location(), 7).await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
        assert!(err.is_retryable());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{not json").unwrap();
        let broken = JsonFileSource::named("broken", file.path());
        let err = broken.fetch(&location(), 7).await.unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        assert!(!err.is_retryable());
    }
}
