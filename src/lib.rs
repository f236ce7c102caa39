//! K8s Demo Service — Library Root
//!
//! Re-exports all modules for integration tests and benchmarks.

pub mod config;
pub mod identity;
pub mod metrics;
pub mod server;
