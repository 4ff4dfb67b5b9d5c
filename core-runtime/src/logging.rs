//! # Logging & Tracing Infrastructure
//!
//! Configures structured logging with the `tracing` crate:
//! - Pretty, compact, and JSON output formats
//! - Module-level filtering via `EnvFilter` (`RUST_LOG` or explicit directive)
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! let config = LoggingConfig::default()
//!     .with_format(LogFormat::Compact)
//!     .with_filter("core_scan=debug,info");
//! init_logging(config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

use tracing_subscriber::{filter::EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{Error, Result};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable pretty format
    Pretty,
    /// Compact format for production
    Compact,
    /// Structured JSON format for machine parsing
    Json,
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter directive. Falls back to `RUST_LOG`, then to this value.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed or the filter
/// directive does not parse.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .map_err(|e| Error::Config(format!("Invalid log filter directive: {}", e)))?;

    let registry = tracing_subscriber::registry().with(filter);

    let result = match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init(),
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
    };

    result.map_err(|e| Error::Config(format!("Failed to install subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LoggingConfig::default();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.filter, "info");
    }

    #[test]
    fn test_builder_chain() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_filter("core_scan=trace");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.filter, "core_scan=trace");
    }

    #[test]
    fn test_invalid_filter_rejected() {
        // Guard against RUST_LOG masking the explicit directive in this test.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig::default().with_filter("core_scan=notalevel");
        assert!(init_logging(config).is_err());
    }
}
