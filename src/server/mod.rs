//! HTTP Server — Router and Listener Wiring
//!
//! Builds the axum router for all service routes and serves it with
//! graceful shutdown. Undefined paths get axum's default 404.

pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::routing::get;
use axum::Router;
use tokio::sync::broadcast;
use tracing::{info, instrument};

use crate::metrics::MetricsRegistry;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide metric registry.
    pub metrics: Arc<MetricsRegistry>,
}

/// Build the service router with all routes registered.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/my-app", get(routes::my_app))
        .route("/about", get(routes::about))
        .route("/ready", get(routes::ready))
        .route("/live", get(routes::live))
        .route("/classified", get(routes::classified))
        .route("/metrics", get(routes::metrics))
        .with_state(state)
}

/// Serve the router on the given address until shutdown is signalled.
///
/// Connect info is attached so `/my-app` can report the peer address
/// when no `X-Forwarded-For` header is present.
#[instrument(skip(state, shutdown_rx))]
pub async fn serve(
    bind_address: String,
    state: AppState,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {bind_address}"))?;

    info!(address = %bind_address, "HTTP server started");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = shutdown_rx.recv().await;
    })
    .await?;

    Ok(())
}
