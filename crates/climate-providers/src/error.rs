// ABOUTME: Error type for weather sources and historical stores
// ABOUTME: Distinguishes transient failures from permanent ones for circuit breaking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ClimateError;
use std::io;
use thiserror::Error;

/// Failure reported by a weather source or historical store
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source answered but could not deliver data
    #[error("Source '{source_name}' fetch failed: {reason}")]
    Fetch {
        /// Source name
        source_name: String,
        /// Failure details
        reason: String,
    },

    /// The source did not answer in time
    #[error("Source '{source_name}' timed out after {timeout_secs}s")]
    Timeout {
        /// Source name
        source_name: String,
        /// Configured timeout
        timeout_secs: u64,
    },

    /// Requests are being rejected while the source recovers
    #[error("Circuit open for source '{source_name}', retry in {retry_after_secs}s")]
    CircuitOpen {
        /// Source name
        source_name: String,
        /// Seconds until a recovery probe is allowed
        retry_after_secs: u64,
    },

    /// Local file access failed
    #[error("Source '{source_name}' I/O error: {error}")]
    Io {
        /// Source name
        source_name: String,
        /// Underlying error
        #[source]
        error: io::Error,
    },

    /// Payload could not be decoded
    #[error("Source '{source_name}' returned malformed data: {error}")]
    Parse {
        /// Source name
        source_name: String,
        /// Underlying error
        #[source]
        error: serde_json::Error,
    },
}

impl SourceError {
    /// Create a fetch failure
    #[must_use]
    pub fn fetch(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Fetch {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Name of the source that failed
    #[must_use]
    pub fn source_name(&self) -> &str {
        match self {
            Self::Fetch { source_name, .. }
            | Self::Timeout { source_name, .. }
            | Self::CircuitOpen { source_name, .. }
            | Self::Io { source_name, .. }
            | Self::Parse { source_name, .. } => source_name,
        }
    }

    /// Whether a later attempt might succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. } | Self::Timeout { .. } | Self::CircuitOpen { .. } | Self::Io { .. }
        )
    }
}

impl From<SourceError> for ClimateError {
    fn from(error: SourceError) -> Self {
        Self::source(error.source_name().to_owned(), error.to_string())
    }
}
