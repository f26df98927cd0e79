//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve configured exclusions against the registry
//! - Install handlers for every remaining signal
//! - Announce the PID once installation is complete
//!
//! # Design Decisions
//! - Unknown exclusion names are warned about, not fatal
//! - Only a failed PID announcement aborts startup

use std::collections::BTreeSet;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use crate::config::LoggerConfig;
use crate::lifecycle::idle::IdleLoop;
use crate::signals::{install, InstallReport, SignalHandler, SignalRegistry};

/// Everything needed to start idling.
pub struct Prepared<W> {
    pub pid: u32,
    pub report: InstallReport,
    pub idle: IdleLoop<W>,
}

/// Install handlers, announce the PID on `out`, and return the idle loop.
///
/// Must be called from within a Tokio runtime.
pub fn prepare<W: Write>(registry: SignalRegistry, config: &LoggerConfig, mut out: W) -> io::Result<Prepared<W>> {
    let registry = Arc::new(registry);
    let exclude = resolve_exclusions(&registry, &config.exclude);
    let (report, listeners) = install(&registry, &exclude);

    let pid = std::process::id();
    announce_pid(&mut out, pid)?;
    tracing::info!(pid, "Process ready for signals");

    let handler = SignalHandler::new(registry, config.format, out);
    let idle = IdleLoop::new(handler, listeners, Duration::from_millis(config.idle_interval_ms));

    Ok(Prepared { pid, report, idle })
}

/// Write the startup line: a blank line then `PID: <pid>`.
pub fn announce_pid<W: Write>(out: &mut W, pid: u32) -> io::Result<()> {
    write!(out, "\nPID: {}\n", pid)?;
    out.flush()
}

/// Map exclusion names to signal numbers, dropping names the registry lacks.
pub fn resolve_exclusions(registry: &SignalRegistry, names: &[String]) -> BTreeSet<i32> {
    names
        .iter()
        .filter_map(|name| match registry.lookup(name) {
            Some(number) => Some(number),
            None => {
                tracing::warn!(signal = %name, "Unknown signal in exclude list, ignoring");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::Shutdown;
    use crate::signals::{OutputFormat, RegistrationOutcome};

    #[test]
    fn test_announce_pid() {
        let mut out = Vec::new();
        announce_pid(&mut out, 4242).unwrap();
        assert_eq!(out, b"\nPID: 4242\n");
    }

    #[test]
    fn test_resolve_exclusions() {
        let registry = SignalRegistry::from_entries([("SIGUSR1", 10), ("SIGWINCH", 28)]);
        let names = vec!["usr1".to_string(), "SIGWINCH".to_string(), "NOPE".to_string()];

        let exclude = resolve_exclusions(&registry, &names);
        assert_eq!(exclude, BTreeSet::from([10, 28]));
    }

    #[tokio::test]
    async fn test_exclusion_by_canonical_name_under_alias() {
        let registry = SignalRegistry::from_platform();
        let names = vec!["SIGABRT".to_string(), "IO".to_string()];

        let exclude = resolve_exclusions(&registry, &names);
        assert_eq!(exclude, BTreeSet::from([libc::SIGABRT, libc::SIGIO]));

        let subset = SignalRegistry::from_entries([
            ("SIGABRT", libc::SIGABRT),
            ("SIGIOT", libc::SIGABRT),
            ("SIGUSR2", libc::SIGUSR2),
        ]);
        let (report, _listeners) = install(&subset, &resolve_exclusions(&subset, &names[..1]));
        assert_eq!(report.outcome(libc::SIGABRT), Some(&RegistrationOutcome::Excluded));
        assert_eq!(report.outcome(libc::SIGUSR2), Some(&RegistrationOutcome::Installed));
    }

    #[tokio::test]
    async fn test_empty_registry_still_announces() {
        let config = LoggerConfig {
            idle_interval_ms: 10,
            ..LoggerConfig::default()
        };
        let prepared = prepare(SignalRegistry::default(), &config, Vec::new()).unwrap();
        assert!(prepared.report.registrations.is_empty());
        assert_eq!(prepared.pid, std::process::id());

        let shutdown = Shutdown::new();
        let rx = shutdown.subscribe();
        shutdown.trigger();

        let out = prepared.idle.run(Some(rx)).await;
        assert_eq!(String::from_utf8(out).unwrap(), format!("\nPID: {}\n", std::process::id()));
    }

    #[tokio::test]
    async fn test_reserved_signal_does_not_block_startup() {
        let registry = SignalRegistry::from_entries([("SIGKILL", libc::SIGKILL), ("SIGSTOP", libc::SIGSTOP)]);
        let config = LoggerConfig {
            format: OutputFormat::Named,
            ..LoggerConfig::default()
        };

        let prepared = prepare(registry, &config, Vec::new()).unwrap();
        assert_eq!(prepared.report.installed_count(), 0);
        assert!(matches!(
            prepared.report.outcome(libc::SIGKILL),
            Some(RegistrationOutcome::Rejected(_))
        ));
    }
}
