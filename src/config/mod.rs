//! Configuration Module — Environment-driven Service Settings
//!
//! The service is configured entirely from environment variables so it
//! deploys with nothing but a pod spec. Pod identity labels (HOSTNAME,
//! POD_NAMESPACE, K8S_NODE_NAME) are deliberately not part of this
//! struct: the observable contract reads them per request, see
//! [`crate::identity`].

use anyhow::{Context, Result};

/// Port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 8080;

/// Tracing filter used when neither `RUST_LOG` nor `LOG_LEVEL` is set.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level service configuration.
///
/// Loaded from the environment at startup. Validated before the server
/// begins listening.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// HTTP bind port (`PORT`, default 8080).
    pub port: u16,
    /// Tracing filter directive (`LOG_LEVEL`, default `info`).
    /// `RUST_LOG` takes precedence at subscriber init.
    pub log_level: String,
}

impl ServiceConfig {
    /// Load and validate configuration from the process environment.
    ///
    /// # Errors
    /// Returns a detailed error if `PORT` is set but is not a valid
    /// port number.
    pub fn from_env() -> Result<Self> {
        let port = parse_port(std::env::var("PORT").ok())?;
        let log_level = std::env::var("LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string());

        Ok(Self { port, log_level })
    }

    /// Bind address for the HTTP listener.
    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// Parse the `PORT` value, falling back to [`DEFAULT_PORT`] when unset.
fn parse_port(raw: Option<String>) -> Result<u16> {
    match raw {
        Some(value) => value
            .parse::<u16>()
            .with_context(|| format!("PORT must be a number in 1-65535, got {value:?}")),
        None => Ok(DEFAULT_PORT),
    }
}
