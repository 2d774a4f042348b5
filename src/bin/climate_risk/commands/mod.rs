// ABOUTME: Subcommand implementations for climate-risk
// ABOUTME: Builds the service from configuration and JSON inputs, then prints results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Result};
use climate_risk_engine::config::EngineConfig;
use climate_risk_engine::intelligence::PredictorRegistry;
use climate_risk_engine::models::{HistoricalWindow, LocationProfile, WeatherObservation};
use climate_risk_engine::providers::{DataIntegration, InMemoryHistoricalStore, JsonFileSource};
use climate_risk_engine::ClimateRiskService;
use tracing::info;

use crate::helpers::display;
use crate::helpers::input::read_json;
use crate::OutputFormat;

fn build_service(location: &LocationProfile, history: Option<HistoricalWindow>) -> ClimateRiskService {
    let config = EngineConfig::global();
    let store = InMemoryHistoricalStore::new();
    if let Some(history) = history {
        info!(region = location.region(), samples = history.len(), "Loaded historical record");
        store.insert(location.region(), history);
    }
    ClimateRiskService::with_config(
        config,
        Arc::new(PredictorRegistry::with_config(config.ensemble.clone())),
        Arc::new(store),
    )
}

/// Full report from observation and optional history files
pub fn assess(
    location: &Path,
    observations: &Path,
    history: Option<&Path>,
    format: OutputFormat,
) -> Result<()> {
    let location: LocationProfile = read_json(location)?;
    let observations: Vec<WeatherObservation> = read_json(observations)?;
    let history = history
        .map(read_json::<Vec<WeatherObservation>>)
        .transpose()?
        .map(HistoricalWindow::new);

    let service = build_service(&location, history);
    let report = service.full_report(&location, &observations)?;

    match format {
        OutputFormat::Json => display::print_json(&report)?,
        OutputFormat::Pretty => display::print_report(&report),
    }
    Ok(())
}

/// Historical report from history and current-window files
pub fn analogues(
    location: &Path,
    history: &Path,
    current: &Path,
    format: OutputFormat,
) -> Result<()> {
    let location: LocationProfile = read_json(location)?;
    let history = HistoricalWindow::new(read_json(history)?);
    let current = HistoricalWindow::new(read_json(current)?);

    let service = build_service(&location, Some(history));
    let report = service
        .historical_report(&location, &current)?
        .ok_or_else(|| anyhow!("no historical record for region {}", location.region()))?;

    match format {
        OutputFormat::Json => display::print_json(&report)?,
        OutputFormat::Pretty => display::print_historical(&report),
    }
    Ok(())
}

/// Concurrent ingestion from file sources followed by a full report
pub async fn ingest(
    location: &Path,
    sources: &[PathBuf],
    days: Option<u32>,
    format: OutputFormat,
) -> Result<()> {
    let location: LocationProfile = read_json(location)?;
    let config = EngineConfig::global();

    let mut integration = DataIntegration::with_config(config.ingestion.clone());
    for path in sources {
        integration.register(Arc::new(JsonFileSource::new(path.clone())));
    }
    let days = days.unwrap_or(config.ingestion.default_days);

    let service = build_service(&location, None);
    let sourced = service
        .assess_from_sources(&integration, &location, days)
        .await?;

    display::print_ingestion(&sourced.ingestion);
    match format {
        OutputFormat::Json => display::print_json(&sourced.report)?,
        OutputFormat::Pretty => display::print_report(&sourced.report),
    }
    Ok(())
}
