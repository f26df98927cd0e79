//! Signal subsystem.
//!
//! # Data Flow
//! ```text
//! platform.rs (symbolic constants exposed by the host)
//!     → registry.rs (number → name, immutable)
//!     → installer.rs (one registration attempt per number)
//!     → handler.rs (one flushed line per delivered signal)
//! ```
//!
//! # Design Decisions
//! - Registry is a plain value owned by whoever needs it, never a global
//! - Installation never aborts: every attempt is recorded in an `InstallReport`
//! - Delivery goes through Tokio listeners (or a socket pair for fault
//!   signals), so the handler runs on the main task instead of inside an
//!   async-signal context

pub mod handler;
pub mod installer;
pub mod platform;
pub mod raw;
pub mod registry;

pub use handler::{HandlerError, OutputFormat, SignalHandler};
pub use installer::{install, InstallReport, Registration, RegistrationOutcome, SignalListener};
pub use registry::SignalRegistry;
