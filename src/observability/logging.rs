//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Respect `RUST_LOG` when set, falling back to the configured level
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Output goes to stderr unbuffered, so container log capture needs no
//!   extra flushing flag

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global subscriber.
///
/// `fallback_level` is the configured log level, used when `RUST_LOG` is
/// absent or unparsable.
pub fn init(fallback_level: &str) {
    let fallback = format!("zenpdf={fallback_level},tower_http={fallback_level}");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| fallback.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
