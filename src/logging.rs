// ABOUTME: Logging configuration and structured tracing subscriber setup
// ABOUTME: Chooses level, format, and output stream from the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging setup for the service and the CLI

use crate::constants::service_names;
use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::{info, Level};
use tracing_subscriber::{
    filter::Directive,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Engine crates that follow the configured level even when `RUST_LOG` sets a different default
const ENGINE_TARGETS: [&str; 4] = [
    "climate_risk_engine",
    "climate_intelligence",
    "climate_providers",
    "climate_core",
];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Output stream
    pub target: LogTarget,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` lines for production
    Json,
    /// Human-readable for development
    Pretty,
    /// Single-line compact output
    Compact,
}

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Standard output
    Stdout,
    /// Standard error, keeping stdout free for command output
    Stderr,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            target: LogTarget::Stdout,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::CLIMATE_RISK_ENGINE.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());

        let format = match env::var("LOG_FORMAT").as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let is_production = environment == "production";

        Self {
            level,
            format,
            target: LogTarget::Stdout,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::CLIMATE_RISK_ENGINE.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Write logs to a different stream
    #[must_use]
    pub const fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Filter built from `RUST_LOG` (or the configured level), with engine crates pinned
    /// to the configured level when it names a single level
    fn env_filter(&self) -> EnvFilter {
        let mut filter = env::var("RUST_LOG")
            .map_or_else(|_| EnvFilter::new(&self.level), EnvFilter::new);

        if let Ok(level) = self.level.parse::<Level>() {
            for target in ENGINE_TARGETS {
                if let Ok(directive) = format!("{target}={level}").parse::<Directive>() {
                    filter = filter.add_directive(directive);
                }
            }
        }
        filter
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let to_stderr = self.target == LogTarget::Stderr;

        let layer = fmt::layer()
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_thread_ids(self.include_thread)
            .with_thread_names(self.include_thread)
            .with_target(true)
            .with_span_events(span_events);

        // Each format and writer combination is a distinct layer type
        match (self.format, to_stderr) {
            (LogFormat::Json, false) => registry
                .with(layer.json().with_writer(io::stdout))
                .try_init()?,
            (LogFormat::Json, true) => registry
                .with(layer.json().with_writer(io::stderr))
                .try_init()?,
            (LogFormat::Pretty, false) => registry.with(layer.with_writer(io::stdout)).try_init()?,
            (LogFormat::Pretty, true) => registry.with(layer.with_writer(io::stderr)).try_init()?,
            (LogFormat::Compact, false) => registry
                .with(layer.compact().with_target(false).with_writer(io::stdout))
                .try_init()?,
            (LogFormat::Compact, true) => registry
                .with(layer.compact().with_target(false).with_writer(io::stderr))
                .try_init()?,
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Climate risk engine starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });
        info!("Logging configured: {}", config_summary);
    }
}

/// Initialize logging with default configuration
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_default() -> Result<()> {
    LoggingConfig::default().init()
}

/// Initialize logging from environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}
