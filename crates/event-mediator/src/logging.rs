//! # Logging
//!
//! Everything in this crate logs through the `log` facade. Hosts that do not
//! bring their own logger can call [`init_logging`] once at startup: it
//! bridges `log` records into `tracing` and installs a `tracing-subscriber`
//! formatter. `RUST_LOG` still overrides the configured level.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_log::LogTracer;
use tracing_subscriber::EnvFilter;

/// Output layout for [`init_logging`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Timestamp, level and target
    #[default]
    Full,
    /// Level and message only
    Compact,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter, e.g. `info` or `event_mediator=trace`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log filter '{level}': {reason}")]
    InvalidLevel { level: String, reason: String },

    #[error("Failed to initialize logging: {0}")]
    AlreadyInitialized(String),
}

/// Install the global logger.
///
/// The `tracing` subscriber is installed first and the `log` bridge second,
/// so a call that fails because a subscriber already exists leaves the
/// process untouched. If the subscriber goes in but another `log` logger is
/// already registered, the subscriber stays installed and the error is
/// returned.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| LoggingError::InvalidLevel {
            level: config.level.clone(),
            reason: e.to_string(),
        })?,
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format {
        LogFormat::Full => builder.try_init(),
        LogFormat::Compact => builder.compact().without_time().with_target(false).try_init(),
    };
    installed.map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    LogTracer::init().map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    log::info!("Logging initialized at level '{}'", config.level);
    Ok(())
}
