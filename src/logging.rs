// ABOUTME: Logging configuration and structured logging setup for observability and debugging
// ABOUTME: Configures log levels, formatters, and output destinations for server and CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 SpiceSync Contributors

//! Structured logging configuration built on `tracing-subscriber`

use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::ServerConfig;

/// Service name reported in startup logs
pub const SERVICE_NAME: &str = "spicesync";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Where log lines go
    pub output: LogOutput,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Environment (development, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for terminals
    Compact,
}

/// Log destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogOutput {
    /// Standard output, used by the server
    Stdout,
    /// Standard error, keeps stdout clean for CLI results
    Stderr,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            output: LogOutput::Stdout,
            include_location: false,
            include_spans: false,
            service_name: SERVICE_NAME.into(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Server logging from the loaded configuration
    ///
    /// `RUST_LOG` wins over `LOG_LEVEL` when both are set. Production turns
    /// on source locations and span events.
    #[must_use]
    pub fn for_server(config: &ServerConfig) -> Self {
        let level = env::var("RUST_LOG")
            .ok()
            .filter(|level| !level.trim().is_empty())
            .unwrap_or_else(|| config.log_level.to_string());
        let format = LogFormat::parse(env::var("LOG_FORMAT").as_deref().unwrap_or("pretty"));
        let is_production = config.environment.is_production();

        Self {
            level,
            format,
            output: LogOutput::Stdout,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| SERVICE_NAME.into()),
            environment: config.environment.to_string(),
        }
    }

    /// Configuration for the terminal client: compact, stderr, quiet by default
    #[must_use]
    pub fn for_cli(verbose: bool) -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| {
            if verbose {
                "debug".into()
            } else {
                "warn".into()
            }
        });
        Self {
            level,
            format: LogFormat::Compact,
            output: LogOutput::Stderr,
            ..Self::default()
        }
    }

    /// Build the filter: the configured level plus fixed noise reduction rules
    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(&self.level);
        for directive in ["hyper=warn", "hyper::proto=warn", "reqwest=warn", "tower_http=info"] {
            if let Ok(parsed) = directive.parse() {
                filter = filter.add_directive(parsed);
            }
        }
        if let Ok(parsed) = format!("spicesync={}", self.level).parse() {
            filter = filter.add_directive(parsed);
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

        match (self.format, self.output) {
            (LogFormat::Json, LogOutput::Stdout) => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events)
                        .json(),
                )
                .try_init()?,
            (LogFormat::Json, LogOutput::Stderr) => registry
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_writer(io::stderr)
                        .json(),
                )
                .try_init()?,
            (LogFormat::Pretty, LogOutput::Stdout) => registry
                .with(
                    fmt::layer()
                        .with_file(self.include_location)
                        .with_line_number(self.include_location)
                        .with_target(true)
                        .with_writer(io::stdout)
                        .with_span_events(span_events),
                )
                .try_init()?,
            (LogFormat::Pretty, LogOutput::Stderr) => registry
                .with(fmt::layer().with_target(true).with_writer(io::stderr))
                .try_init()?,
            (LogFormat::Compact, LogOutput::Stdout) => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stdout),
                )
                .try_init()?,
            (LogFormat::Compact, LogOutput::Stderr) => registry
                .with(
                    fmt::layer()
                        .compact()
                        .with_target(false)
                        .with_writer(io::stderr),
                )
                .try_init()?,
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Logging initialized"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "output": format!("{:?}", self.output),
                "features": {
                    "location": self.include_location,
                    "spans": self.include_spans
                }
            }
        });
        tracing::debug!("Logging configuration: {config_summary}");
    }
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value; unknown values fall back to pretty
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}
