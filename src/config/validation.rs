//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Pure function: LoggerSettings → Result<(), Vec<ValidationError>>
//! - Signal names are not checked here; they depend on the host and are
//!   resolved at startup

use thiserror::Error;

use crate::config::schema::LoggerSettings;

pub const MAX_IDLE_INTERVAL_MS: u64 = 3_600_000;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logger.idle_interval_ms must be between 1 and {max}, got {value}")]
    IdleInterval { value: u64, max: u64 },

    #[error("observability.log_level '{0}' is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("logger.exclude contains an empty signal name")]
    EmptyExclusion,
}

/// Check the semantic constraints serde cannot express.
pub fn validate_config(config: &LoggerSettings) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let interval = config.logger.idle_interval_ms;
    if interval == 0 || interval > MAX_IDLE_INTERVAL_MS {
        errors.push(ValidationError::IdleInterval {
            value: interval,
            max: MAX_IDLE_INTERVAL_MS,
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.logger.exclude.iter().any(|name| name.trim().is_empty()) {
        errors.push(ValidationError::EmptyExclusion);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
