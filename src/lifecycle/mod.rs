//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Build registry → Install handlers → Announce PID
//!
//! Idle (idle.rs):
//!     Sleep interval ─┬─ elapsed → sleep again
//!                     ├─ signal  → handler → sleep again
//!                     └─ shutdown → return
//!
//! Shutdown (shutdown.rs):
//!     Optional sticky stop flag; without one the idle loop never returns
//! ```
//!
//! # Design Decisions
//! - PID is announced only after installation, so any signal sent after the
//!   announcement is one the process handles
//! - The binary never triggers shutdown; tests do

pub mod idle;
pub mod shutdown;
pub mod startup;

pub use idle::IdleLoop;
pub use shutdown::{Shutdown, ShutdownReceiver};
pub use startup::{prepare, Prepared};
