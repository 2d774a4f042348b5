// ABOUTME: JSON file loading for climate-risk inputs
// ABOUTME: Errors name the offending file
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;

/// Read and decode a JSON file
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents =
        fs::read_to_string(path).map_err(|e| anyhow!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&contents).map_err(|e| anyhow!("invalid JSON in {}: {e}", path.display()))
}
