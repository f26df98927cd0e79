//! signal-logger
//!
//! Diagnostic process for exercising signal delivery.
//!
//! ```text
//!   startup                        idle
//!   ┌──────────┐  ┌───────────┐   ┌─────────────────────────────┐
//!   │ registry │─▶│ installer │──▶│ sleep(interval)             │
//!   └──────────┘  └─────┬─────┘   │   ├─ elapsed → sleep again  │
//!                       │         │   └─ signal  → handler ─────┼──▶ stdout
//!                 "\nPID: <pid>"  └─────────────────────────────┘
//!                       └──────────────────────────────────────────▶ stdout
//! ```
//!
//! Diagnostics go to stderr through `tracing`; stdout carries only the PID
//! announcement and the per-signal lines.

use std::path::PathBuf;

use clap::Parser;

use signal_logger::config::{load_config, validate_config, ConfigError, LoggerSettings};
use signal_logger::lifecycle::startup::{self, resolve_exclusions};
use signal_logger::observability::logging::init_logging;
use signal_logger::signals::{install, OutputFormat, SignalRegistry};

#[derive(Parser)]
#[command(name = "signal-logger")]
#[command(about = "Log every catchable signal delivered to this process", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output line format.
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Idle sleep interval in milliseconds.
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Leave a signal at its default disposition (repeatable).
    #[arg(short = 'x', long = "exclude", value_name = "SIGNAL")]
    exclude: Vec<String>,

    /// Diagnostic log level on stderr.
    #[arg(long)]
    log_level: Option<String>,

    /// Print the registration report as JSON and exit.
    #[arg(long)]
    list: bool,
}

impl Cli {
    /// Load the config file (if any) and apply command-line overrides.
    fn settings(&self) -> Result<LoggerSettings, ConfigError> {
        let mut settings = match &self.config {
            Some(path) => load_config(path)?,
            None => LoggerSettings::default(),
        };

        if let Some(format) = self.format {
            settings.logger.format = format;
        }
        if let Some(interval) = self.interval_ms {
            settings.logger.idle_interval_ms = interval;
        }
        if let Some(level) = &self.log_level {
            settings.observability.log_level = level.clone();
        }
        settings.logger.exclude.extend(self.exclude.iter().cloned());

        validate_config(&settings).map_err(ConfigError::Validation)?;
        Ok(settings)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = cli.settings()?;

    init_logging(&settings.observability.log_level)?;
    tracing::info!("signal-logger v{} starting", env!("CARGO_PKG_VERSION"));

    let registry = SignalRegistry::from_platform();
    tracing::info!(
        signals = registry.len(),
        format = ?settings.logger.format,
        idle_interval_ms = settings.logger.idle_interval_ms,
        "Configuration loaded"
    );

    if cli.list {
        let exclude = resolve_exclusions(&registry, &settings.logger.exclude);
        let (report, _listeners) = install(&registry, &exclude);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let prepared = startup::prepare(registry, &settings.logger, std::io::stdout())?;
    prepared.idle.run(None).await;

    Ok(())
}
