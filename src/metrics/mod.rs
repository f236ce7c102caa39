//! Metrics Module — Prometheus Registry and Exposition
//!
//! Owns the process-wide metric registry: one custom counter for hits
//! to the informational route, an uptime gauge, and the default Linux
//! process collectors (resident memory, CPU seconds, open fds).
//! Serialized in the Prometheus text exposition format on scrape.

pub mod process;
pub mod registry;

pub use registry::MetricsRegistry;
