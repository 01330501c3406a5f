//! Tracing/logging initialization.
//!
//! Filtering follows `RUST_LOG`; the output format follows
//! `SWEETSHOP_LOG_FORMAT` (`json`, `pretty` or `compact`).

use core::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub const LOG_FORMAT_VAR: &str = "SWEETSHOP_LOG_FORMAT";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TracingConfigError {
    #[error("unknown log format {0:?} (expected json, pretty or compact)")]
    UnknownFormat(String),
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

impl FromStr for LogFormat {
    type Err = TracingConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(TracingConfigError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Directive used when `RUST_LOG` is unset or unparsable.
    pub default_filter: String,
    pub format: LogFormat,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
            format: LogFormat::Json,
        }
    }
}

impl TracingConfig {
    pub fn from_env() -> Result<Self, TracingConfigError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(LOG_FORMAT_VAR) {
            config.format = raw.parse()?;
        }
        Ok(config)
    }
}

/// Initialize tracing/logging for the process.
///
/// Safe to call multiple times (subsequent calls are no-ops). An invalid
/// `SWEETSHOP_LOG_FORMAT` falls back to JSON and is reported once the
/// subscriber is up.
pub fn init() {
    match TracingConfig::from_env() {
        Ok(config) => init_with(&config),
        Err(e) => {
            init_with(&TracingConfig::default());
            tracing::warn!(error = %e, "falling back to json logs");
        }
    }
}

pub fn init_with(config: &TracingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime)
        .with_target(false);

    let _ = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
    };
}
