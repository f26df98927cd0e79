//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

use crate::signals::OutputFormat;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct LoggerSettings {
    /// Signal logging behavior.
    pub logger: LoggerConfig,

    /// Diagnostics on stderr.
    pub observability: ObservabilityConfig,
}

/// Signal logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggerConfig {
    /// Output line format.
    pub format: OutputFormat,

    /// Idle sleep interval in milliseconds.
    pub idle_interval_ms: u64,

    /// Signals left at their default disposition (`SIGWINCH`, `USR1`, ...).
    pub exclude: Vec<String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Legacy,
            idle_interval_ms: 1000,
            exclude: Vec::new(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}
