// ABOUTME: climate-risk CLI for scoring locations and exploring historical analogues
// ABOUTME: Reads JSON inputs from disk and prints reports as JSON or text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Full report for a location from a JSON array of observations
//! climate-risk assess --location houston.json --observations week.json
//!
//! # Include historical analysis and print as text
//! climate-risk assess --location houston.json --observations week.json \
//!     --history 1990-2020.json --format pretty
//!
//! # Analogue search only
//! climate-risk analogues --location houston.json --history 1990-2020.json --current week.json
//!
//! # Fetch from several file sources concurrently, then assess
//! climate-risk ingest --location houston.json --source noaa.json --source local.json --days 5
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use climate_risk_engine::logging::{LogTarget, LoggingConfig};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "climate-risk",
    about = "Climate hazard risk scoring CLI",
    long_about = "Scores flood, heatwave, hurricane, drought, landslide, and blackout risk for a location and searches historical records for analogous episodes."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Report output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// Human-readable summary
    Pretty,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Score a location and print the full report
    Assess {
        /// Location profile JSON file
        #[arg(long)]
        location: PathBuf,

        /// JSON array of observations
        #[arg(long)]
        observations: PathBuf,

        /// JSON array of long-run historical observations
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Search historical records for windows resembling current conditions
    Analogues {
        /// Location profile JSON file
        #[arg(long)]
        location: PathBuf,

        /// JSON array of long-run historical observations
        #[arg(long)]
        history: PathBuf,

        /// JSON array of current observations
        #[arg(long)]
        current: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Fetch observations from JSON file sources concurrently, then assess
    Ingest {
        /// Location profile JSON file
        #[arg(long)]
        location: PathBuf,

        /// JSON observation file used as a source (repeatable)
        #[arg(long = "source", required = true)]
        sources: Vec<PathBuf>,

        /// Days of observations to request (default from configuration)
        #[arg(long)]
        days: Option<u32>,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let mut logging = LoggingConfig::from_env().with_target(LogTarget::Stderr);
    if cli.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;
    debug!("climate-risk CLI started");

    match cli.command {
        Command::Assess {
            location,
            observations,
            history,
            format,
        } => commands::assess(&location, &observations, history.as_deref(), format)?,
        Command::Analogues {
            location,
            history,
            current,
            format,
        } => commands::analogues(&location, &history, &current, format)?,
        Command::Ingest {
            location,
            sources,
            days,
            format,
        } => commands::ingest(&location, &sources, days, format).await?,
    }

    Ok(())
}
