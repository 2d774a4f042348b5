// ABOUTME: Ingestion defaults applied to weather sources without explicit settings
// ABOUTME: Per-source timeout, concurrency permits, and forecast horizon
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::ingestion;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-source ingestion defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Request timeout per source (seconds)
    pub source_timeout_secs: u64,
    /// Concurrent request permits per source
    pub source_rate_limit: usize,
    /// Days of observations to request
    pub default_days: u32,
}

impl IngestionConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn source_timeout(&self) -> Duration {
        Duration::from_secs(self.source_timeout_secs)
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            source_timeout_secs: ingestion::SOURCE_TIMEOUT_SECS,
            source_rate_limit: ingestion::SOURCE_RATE_LIMIT,
            default_days: ingestion::DEFAULT_DAYS,
        }
    }
}
