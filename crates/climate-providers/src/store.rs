// ABOUTME: Historical record lookup keyed by location region
// ABOUTME: Trait seam for long-run observation archives with an in-memory implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::error::SourceError;
use crate::models::{HistoricalWindow, LocationProfile};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Archive of long-run observations
pub trait HistoricalStore: Send + Sync {
    /// History for a location, `None` when the archive has no record of it
    ///
    /// # Errors
    ///
    /// Returns a `SourceError` when the archive cannot be read
    fn get_history(
        &self,
        location: &LocationProfile,
    ) -> Result<Option<HistoricalWindow>, SourceError>;
}

/// Store holding histories in memory, keyed by region name
#[derive(Debug, Default)]
pub struct InMemoryHistoricalStore {
    histories: RwLock<HashMap<String, HistoricalWindow>>,
}

impl InMemoryHistoricalStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace the history for a region
    pub fn insert(&self, region: impl Into<String>, history: HistoricalWindow) {
        self.histories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(region.into(), history);
    }

    /// Number of regions with a history
    #[must_use]
    pub fn len(&self) -> usize {
        self.histories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl HistoricalStore for InMemoryHistoricalStore {
    fn get_history(
        &self,
        location: &LocationProfile,
    ) -> Result<Option<HistoricalWindow>, SourceError> {
        Ok(self
            .histories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(location.region())
            .cloned())
    }
}
