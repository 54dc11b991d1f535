//! Liveboard server lifecycle: bind, serve, drain.
//!
//! [`start_server`] owns the whole lifetime of the HTTP listener. It
//! runs until Ctrl-C, then shuts down gracefully: the listener stops
//! accepting, in-flight requests drain, and every open `WebSocket`
//! session ends -- which drops its `Subscription` and deregisters it
//! from its hub. The hubs themselves keep running until their last
//! command sender (the shared [`AppState`]) is dropped.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::router::build_router;
use crate::state::AppState;

/// Errors that can occur while running the Liveboard server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The TCP listener could not bind the requested address.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// The address that could not be bound.
        addr: SocketAddr,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The server hit a fatal I/O error while serving.
    #[error("serve failed: {source}")]
    Serve {
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Serve the Liveboard API on `addr` until the process is told to stop.
///
/// # Errors
///
/// Returns [`ServerError::Bind`] if the address cannot be bound and
/// [`ServerError::Serve`] for a fatal I/O error afterwards. A clean
/// Ctrl-C shutdown is `Ok(())`.
pub async fn start_server(addr: SocketAddr, state: Arc<AppState>) -> Result<(), ServerError> {
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%addr, "liveboard listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServerError::Serve { source })?;

    info!("liveboard server drained");
    Ok(())
}

/// Resolve when the process receives Ctrl-C.
///
/// If the signal handler cannot be installed the server simply never
/// shuts down gracefully; that is logged rather than treated as fatal.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(error) => {
            warn!(%error, "failed to install shutdown handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bind_conflict_surfaces_the_address() {
        // Occupy a port, then ask the server to bind the same one.
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = taken.local_addr().unwrap();

        let state = Arc::new(AppState::new().unwrap());
        let result = start_server(addr, state).await;

        match result {
            Err(ServerError::Bind { addr: reported, .. }) => assert_eq!(reported, addr),
            other => panic!("expected a bind error, got {other:?}"),
        }
    }
}
