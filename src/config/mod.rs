//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file, parse & deserialize)
//!     → loader.rs (environment overrides: PORT, WEB_CONCURRENCY)
//!     → validation.rs (semantic checks, all errors reported)
//!     → AppConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; it is read exactly once at startup
//! - All fields have defaults to allow running with no config file at all
//! - Validation separates syntactic (serde) from semantic checks
//! - An empty `PORT` counts as unset; a malformed one refuses to start

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::AppConfig;
pub use schema::CompressionConfig;
pub use schema::ListenerConfig;
