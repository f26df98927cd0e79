//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events on stderr)
//!
//! stdout carries only the PID line and one line per signal, so log
//! scrapers never see diagnostics.
//! ```

pub mod logging;
