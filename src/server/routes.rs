//! Route Handlers — Informational, Probe, and Scrape Endpoints
//!
//! Every defined route answers 200. The only side effect in the whole
//! surface is the root-access counter increment on `/my-app`.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

use crate::identity::{PodIdentity, UNKNOWN};
use crate::metrics::process;

use super::AppState;

/// JSON body returned by `/my-app`.
#[derive(Debug, Serialize)]
pub struct MyAppResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub request_id: String,
    pub system: SystemInfo,
    pub kubernetes: PodIdentity,
    pub client: ClientInfo,
}

/// Process-level facts about the serving pod.
#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub uptime_seconds: u64,
    pub memory_usage_mb: f64,
}

/// Who asked, as seen through the ingress.
#[derive(Debug, Serialize)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

/// Informational route. Increments `root_access_total` on every hit.
pub async fn my_app(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
) -> Json<MyAppResponse> {
    state.metrics.record_root_access();

    // Identity labels are read per request, not cached at startup.
    let identity = PodIdentity::from_env();

    let ip = header_str(&headers, "x-forwarded-for")
        .map_or_else(|| peer.ip().to_string(), str::to_string);
    let user_agent = header_str(&headers, header::USER_AGENT.as_str())
        .unwrap_or(UNKNOWN)
        .to_string();

    let memory_usage_mb = process::resident_memory_mb()
        .map_or(0.0, |mb| (mb * 10.0).round() / 10.0);

    Json(MyAppResponse {
        status: "ONLINE",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        request_id: short_request_id(),
        system: SystemInfo {
            hostname: identity.pod.clone(),
            uptime_seconds: state.metrics.uptime().as_secs(),
            memory_usage_mb,
        },
        kubernetes: identity,
        client: ClientInfo { ip, user_agent },
    })
}

/// Static description of the service.
pub async fn about() -> &'static str {
    "This is a sample Rust application for Kubernetes deployment testing."
}

/// Readiness probe.
pub async fn ready() -> &'static str {
    "Ready"
}

/// Liveness probe.
pub async fn live() -> &'static str {
    "Alive"
}

/// Static easter egg.
pub async fn classified() -> &'static str {
    "You should not be here!!!"
}

/// Prometheus scrape endpoint.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match state.metrics.render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to render metrics exposition");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// 8-char hex id, enough to correlate a demo request in logs.
fn short_request_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
