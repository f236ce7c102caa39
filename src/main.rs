//! K8s Demo Service — Entry Point
//!
//! Initializes configuration, logging, the metric registry, and the
//! HTTP server. Runs until SIGINT/SIGTERM.
//!
//! Wiring sequence:
//! 1. Load config from env (PORT, LOG_LEVEL) + validate
//! 2. Init tracing (JSON structured logging)
//! 3. Create the process-wide MetricsRegistry
//! 4. Spawn the HTTP server on :PORT (all routes incl. /metrics)
//! 5. Wait for SIGINT/SIGTERM → graceful shutdown

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use k8s_demo_service::config::ServiceConfig;
use k8s_demo_service::metrics::MetricsRegistry;
use k8s_demo_service::server::{self, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1. Load configuration from the environment ──────────
    let config = ServiceConfig::from_env().context("Failed to load configuration")?;

    // ── 2. Initialize structured JSON logging ───────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.port,
        "Starting k8s demo service"
    );

    // ── 3. Create the process-wide metric registry ──────────
    let metrics = Arc::new(MetricsRegistry::new().context("Failed to register metrics")?);
    let state = AppState {
        metrics: Arc::clone(&metrics),
    };

    // ── 4. Spawn the HTTP server ────────────────────────────
    let (shutdown_tx, _shutdown_rx) = broadcast::channel::<()>(1);
    let server_shutdown = shutdown_tx.subscribe();
    let bind_address = config.bind_address();
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server::serve(bind_address, state, server_shutdown).await {
            error!(error = %e, "HTTP server failed");
        }
    });

    // ── 5. Wait for SIGINT or SIGTERM ───────────────────────
    shutdown_signal().await;
    info!("Termination signal received, initiating graceful shutdown");

    let _ = shutdown_tx.send(());
    let _ = tokio::time::timeout(std::time::Duration::from_secs(10), server_handle).await;

    info!(
        root_accesses = metrics.root_access_count(),
        uptime_seconds = metrics.uptime().as_secs(),
        "Shutdown complete"
    );
    Ok(())
}

/// Resolve when either SIGINT (ctrl-c) or SIGTERM arrives.
///
/// Kubernetes sends SIGTERM on pod eviction, so handling ctrl-c alone
/// would turn every rollout into a hard kill.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sig) => sig,
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                let _ = signal::ctrl_c().await;
                return;
            }
        };

        tokio::select! {
            _ = signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
    }
}
