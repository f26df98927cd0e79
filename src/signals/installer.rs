//! Handler installation.
//!
//! # Responsibilities
//! - Attempt one registration per registry entry, in numeric order
//! - Leave excluded signals at their default disposition
//! - Record every attempt, successful or not
//!
//! # Design Decisions
//! - A rejected signal never aborts installation
//! - Rejections stay off stdout; they are visible at debug level and in the report
//! - Fault signals Tokio refuses (`SIGILL`, `SIGFPE`, `SIGSEGV`) go through
//!   `raw.rs`; only what the platform itself refuses is `Rejected`
//! - Must run inside a Tokio runtime (listeners bind to its signal driver)

use std::collections::BTreeSet;

use serde::Serialize;
use tokio::signal::unix::{signal, Signal, SignalKind};

use crate::signals::raw::{self, RawListener};
use crate::signals::registry::SignalRegistry;

/// Result of one registration attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "outcome", content = "reason")]
pub enum RegistrationOutcome {
    /// Deliveries of this signal now reach the handler.
    Installed,
    /// Skipped by configuration; default disposition kept.
    Excluded,
    /// The platform or runtime refused the registration.
    Rejected(String),
}

/// One attempted registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub number: i32,
    pub name: String,
    #[serde(flatten)]
    pub outcome: RegistrationOutcome,
}

/// Outcome of installing handlers for a registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InstallReport {
    pub registrations: Vec<Registration>,
}

impl InstallReport {
    /// Signal numbers that were installed.
    pub fn installed(&self) -> impl Iterator<Item = i32> + '_ {
        self.registrations
            .iter()
            .filter(|r| r.outcome == RegistrationOutcome::Installed)
            .map(|r| r.number)
    }

    /// Outcome recorded for a signal number.
    pub fn outcome(&self, number: i32) -> Option<&RegistrationOutcome> {
        self.registrations
            .iter()
            .find(|r| r.number == number)
            .map(|r| &r.outcome)
    }

    pub fn installed_count(&self) -> usize {
        self.installed().count()
    }

    pub fn rejected_count(&self) -> usize {
        self.registrations
            .iter()
            .filter(|r| matches!(r.outcome, RegistrationOutcome::Rejected(_)))
            .count()
    }
}

/// A live listener for one installed signal.
pub struct SignalListener {
    pub number: i32,
    source: Source,
}

enum Source {
    Runtime(Signal),
    Raw(RawListener),
}

impl SignalListener {
    /// Start listening for `number`.
    pub fn listen(number: i32) -> std::io::Result<Self> {
        let source = if raw::is_fault_signal(number) {
            Source::Raw(RawListener::register(number)?)
        } else {
            Source::Runtime(signal(SignalKind::from_raw(number))?)
        };
        Ok(Self { number, source })
    }

    /// Wait for the next delivery; `None` once the listener can no longer receive.
    pub async fn recv(&mut self) -> Option<()> {
        match &mut self.source {
            Source::Runtime(signal) => signal.recv().await,
            Source::Raw(raw) => raw.recv().await,
        }
    }
}

/// Install a listener for every registry entry not in `exclude`.
pub fn install(
    registry: &SignalRegistry,
    exclude: &BTreeSet<i32>,
) -> (InstallReport, Vec<SignalListener>) {
    let mut report = InstallReport::default();
    let mut listeners = Vec::new();

    for (number, name) in registry.iter() {
        let outcome = if exclude.contains(&number) {
            tracing::debug!(signal = number, name, "Signal excluded, keeping default disposition");
            RegistrationOutcome::Excluded
        } else {
            match SignalListener::listen(number) {
                Ok(listener) => {
                    listeners.push(listener);
                    RegistrationOutcome::Installed
                }
                Err(e) => {
                    tracing::debug!(signal = number, name, error = %e, "Signal registration rejected");
                    RegistrationOutcome::Rejected(e.to_string())
                }
            }
        };

        report.registrations.push(Registration {
            number,
            name: name.to_string(),
            outcome,
        });
    }

    tracing::info!(
        installed = report.installed_count(),
        rejected = report.rejected_count(),
        total = report.registrations.len(),
        "Signal handlers installed"
    );

    (report, listeners)
}
