//! Signal logger library.
//!
//! Installs one handler for every catchable signal on the host, announces the
//! process id, and writes one line per delivered signal while idling.

pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod signals;

pub use config::LoggerSettings;
pub use lifecycle::{IdleLoop, Shutdown};
pub use signals::{OutputFormat, SignalRegistry};
