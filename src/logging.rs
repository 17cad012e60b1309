//! # Logging
//!
//! Structured logging through `tracing`, initialised once per process.
//!
//! ## Environment Variables
//!
//! | variable               | effect                                   | default  |
//! |------------------------|------------------------------------------|----------|
//! | `EXACTMUX_LOG_LEVEL`   | `trace`, `debug`, `info`, `warn`, `error`| `info`   |
//! | `EXACTMUX_LOG_FORMAT`  | `pretty` or `json`                       | `pretty` |
//! | `EXACTMUX_LOG_TARGETS` | extra filter directives, comma separated | unset    |
//! | `RUST_LOG`             | replaces the level-based filter entirely | unset    |
//!
//! ```no_run
//! use exactmux::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::from_env()).expect("Failed to initialize logging");
//! ```

use std::env;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Output format for log lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Parse a format name; anything unrecognised is `Pretty`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    /// Extra `EnvFilter` directives, e.g. `exactmux::router=debug`
    pub target_filter: Option<String>,
    /// Include file and line in each record
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Defaults overridden by `EXACTMUX_LOG_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Override fields from `EXACTMUX_LOG_*` variables that are set.
    pub fn apply_env(&mut self) {
        if let Ok(level) = env::var("EXACTMUX_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(format) = env::var("EXACTMUX_LOG_FORMAT") {
            self.format = LogFormat::parse(&format);
        }
        if let Ok(targets) = env::var("EXACTMUX_LOG_TARGETS") {
            self.target_filter = Some(targets);
        }
    }

    /// The configured level; unknown names fall back to `INFO`.
    #[must_use]
    pub fn level(&self) -> Level {
        match self.level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));

        if let Some(targets) = &self.target_filter {
            for directive in targets.split(',').map(str::trim).filter(|d| !d.is_empty()) {
                match directive.parse() {
                    Ok(directive) => filter = filter.add_directive(directive),
                    Err(_) => eprintln!("Warning: Invalid log filter directive: {directive}"),
                }
            }
        }
        filter
    }
}

/// Install the global `tracing` subscriber. Records go to stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")
}
