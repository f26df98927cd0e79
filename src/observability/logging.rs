//! Structured logging.
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Always writes to stderr; stdout belongs to the signal lines
//! - `RUST_LOG` takes precedence over the configured level

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
pub fn default_filter(level: &str) -> String {
    format!("signal_logger={}", level.to_ascii_lowercase())
}

/// Initialize the global subscriber.
///
/// Returns an error if a subscriber has already been installed.
pub fn init_logging(level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
