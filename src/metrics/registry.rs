//! Prometheus Metrics Registry — Scrape-time Exposition
//!
//! Registers the service's metric series and renders them in the text
//! exposition format on demand. There is no background sampling: every
//! gauge is refreshed synchronously inside [`MetricsRegistry::render`].

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use prometheus::{Encoder, Gauge, IntCounter, Opts, Registry, TextEncoder};

/// Process-wide metric registry.
///
/// Constructed once at startup and shared behind an `Arc`. Metric names
/// are unique within the registry; registering a duplicate name fails.
pub struct MetricsRegistry {
    /// Prometheus registry owning every series below.
    registry: Registry,
    /// Hits to the informational route. Monotonic, atomic, never reset
    /// except by process restart.
    root_access: IntCounter,
    /// Seconds since the service started, refreshed per scrape.
    uptime_seconds: Gauge,
    /// Startup instant backing the uptime gauge.
    started: Instant,
}

impl MetricsRegistry {
    /// Create and register all metric series.
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let root_access = IntCounter::with_opts(Opts::new(
            "root_access_total",
            "Total number of accesses to the root path",
        ))?;

        let uptime_seconds = Gauge::new(
            "process_uptime_seconds",
            "Seconds since the service process started",
        )?;

        registry.register(Box::new(root_access.clone()))?;
        registry.register(Box::new(uptime_seconds.clone()))?;

        // Default process metrics (resident memory, CPU, fds). The
        // collector samples /proc at gather time, so every scrape sees
        // fresh values.
        #[cfg(target_os = "linux")]
        registry.register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))?;

        Ok(Self {
            registry,
            root_access,
            uptime_seconds,
            started: Instant::now(),
        })
    }

    /// Record one hit to the informational route.
    ///
    /// Atomic: concurrent callers each add exactly 1.
    pub fn record_root_access(&self) {
        self.root_access.inc();
    }

    /// Current value of the root-access counter.
    pub fn root_access_count(&self) -> u64 {
        self.root_access.get()
    }

    /// Time elapsed since the registry (and the process) started.
    pub fn uptime(&self) -> Duration {
        self.started.elapsed()
    }

    /// Serialize every registered series in the text exposition format.
    ///
    /// Output is `# HELP` / `# TYPE` metadata lines followed by
    /// `<name> <value>` samples. Series ordering is not significant.
    ///
    /// # Errors
    /// Only on encoder failure, which does not happen for an in-memory
    /// gather; surfaced rather than unwrapped so the scrape handler can
    /// answer 500 instead of tearing down the worker.
    pub fn render(&self) -> Result<String> {
        self.uptime_seconds.set(self.started.elapsed().as_secs_f64());

        let families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&families, &mut buffer)
            .context("Failed to encode metric families")?;

        String::from_utf8(buffer).context("Metrics exposition was not valid UTF-8")
    }
}
