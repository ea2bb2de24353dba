//! TCP listener binding.
//!
//! # Responsibilities
//! - Resolve the configured `host:port` pair
//! - Bind the listening socket before workers start serving
//! - Surface bind failures as fatal startup errors

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    #[error("invalid listen address {address:?}: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        source: std::io::Error,
    },
}

/// Bind the listening socket for the configured address.
///
/// A port of 0 asks the OS for an ephemeral port; the bound address is
/// logged and available via `local_addr`.
pub async fn bind(config: &ListenerConfig) -> Result<TcpListener, ListenerError> {
    let address: SocketAddr =
        config
            .bind_address()
            .parse()
            .map_err(|source| ListenerError::Address {
                address: config.bind_address(),
                source,
            })?;

    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| ListenerError::Bind { address, source })?;

    let local_addr = listener.local_addr().map_err(|source| ListenerError::Bind {
        address,
        source,
    })?;

    tracing::info!(
        address = %local_addr,
        workers = config.workers,
        "Listener bound"
    );

    Ok(listener)
}
