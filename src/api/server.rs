//! HTTP server lifecycle
//!
//! Binds the listener, serves the router and drains in-flight requests once the
//! shutdown signal flips. Draining is bounded by `shutdown_timeout_secs`.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::watch;

use crate::config::ServerConfig;
use crate::domain::{MedtrackError, Result};

/// Bind the configured address
///
/// # Errors
///
/// Returns an I/O error if the address is invalid or already in use.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener> {
    let address = config.bind_address();
    TcpListener::bind(&address)
        .await
        .map_err(|e| MedtrackError::Io(format!("Failed to bind {address}: {e}")))
}

/// Serve until the shutdown signal is received
///
/// New connections stop being accepted as soon as the signal is seen. Requests
/// still running after `drain_timeout` are dropped.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    drain_timeout: Duration,
    shutdown_signal: watch::Receiver<bool>,
) -> Result<()> {
    let local_addr: Option<SocketAddr> = listener.local_addr().ok();
    tracing::info!(address = ?local_addr, "HTTP server listening");

    let server = axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown(shutdown_signal.clone()))
        .into_future();

    let drain_deadline = async {
        wait_for_shutdown(shutdown_signal).await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| MedtrackError::Io(format!("HTTP server failed: {e}")))?;
            tracing::info!("HTTP server stopped");
        }
        _ = drain_deadline => {
            tracing::warn!(
                timeout_secs = drain_timeout.as_secs(),
                "Shutdown timeout elapsed, dropping open connections"
            );
        }
    }

    Ok(())
}

/// Resolves once the flag is set or every sender is gone
async fn wait_for_shutdown(mut shutdown_signal: watch::Receiver<bool>) {
    let _ = shutdown_signal.wait_for(|stop| *stop).await;
    tracing::info!("Shutdown requested, draining in-flight requests");
}
