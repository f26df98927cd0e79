//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LoggerSettings (validated, immutable)
//!     → CLI overrides applied in main.rs, then validated again
//! ```
//!
//! # Design Decisions
//! - All fields have defaults, so running without a file is the common case
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LoggerConfig, LoggerSettings, ObservabilityConfig};
pub use validation::{validate_config, ValidationError};
