//! # Logging Infrastructure
//!
//! Configures the `tracing-subscriber` stack for the shell: env-filter
//! directives plus pretty, compact, or JSON output.
//!
//! ## Usage
//!
//! ```ignore
//! use shell_runtime::logging::{init_logging, LogFormat, LoggingConfig};
//!
//! init_logging(LoggingConfig::default().with_format(LogFormat::Compact))
//!     .expect("Failed to initialize logging");
//!
//! tracing::info!("Shell started");
//! ```

use tracing_subscriber::EnvFilter;

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

impl Default for LogFormat {
    fn default() -> Self {
        #[cfg(debug_assertions)]
        return Self::Pretty;

        #[cfg(not(debug_assertions))]
        return Self::Json;
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Output format
    pub format: LogFormat,
    /// Filter directives; falls back to `RUST_LOG`, then `info`
    pub filter: Option<String>,
}

impl LoggingConfig {
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

/// Initialize the global tracing subscriber
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let filter = match &config.filter {
        Some(directives) => {
            EnvFilter::try_new(directives).map_err(|e| Error::Logging(e.to_string()))?
        }
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("info"))
            .map_err(|e| Error::Logging(e.to_string()))?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = match config.format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    result.map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builders() {
        let config = LoggingConfig::default()
            .with_format(LogFormat::Json)
            .with_filter("shell_bridge=debug,info");

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(
            config.filter.as_deref(),
            Some("shell_bridge=debug,info")
        );
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let err = init_logging(LoggingConfig::default().with_filter("not a valid filter!!!"))
            .unwrap_err();

        match err {
            Error::Logging(_) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
