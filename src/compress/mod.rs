//! PDF compression subsystem.
//!
//! # Data Flow
//! ```text
//! upload bytes
//!     → engine.rs (stage into temp dir)
//!     → ghostscript.rs (pdfwrite run at chosen DPI/profile)
//!     → engine.rs (target-size bisection, best-candidate tracking)
//!     → CompressionOutcome (bytes + sizes + winning DPI)
//! ```

pub mod engine;
pub mod ghostscript;
pub mod quality;

pub use engine::{CompressionOutcome, Compressor, EngineError};
pub use ghostscript::Ghostscript;
pub use quality::Quality;
