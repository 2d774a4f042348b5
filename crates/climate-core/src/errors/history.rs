// ABOUTME: Serializable insufficient-history marker for degraded historical analysis
// ABOUTME: Attached to reports instead of aborting when a series is too short to decompose
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Historical series too short for seasonal decomposition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Insufficient history: need at least {required} samples, got {available}")]
pub struct InsufficientHistory {
    /// Minimum number of samples required
    pub required: usize,
    /// Number of samples available
    pub available: usize,
}

impl InsufficientHistory {
    /// Create a new marker
    #[must_use]
    pub const fn new(required: usize, available: usize) -> Self {
        Self {
            required,
            available,
        }
    }
}
