//! Pod Identity — Downward-API Labels for the Informational Route
//!
//! Kubernetes injects pod/namespace/node names through environment
//! variables (`HOSTNAME` plus downward-API fields). Outside a cluster
//! none of them exist, so every label falls back to the literal string
//! `unknown` rather than failing the request.

use serde::Serialize;

/// Placeholder rendered for any label the environment does not provide.
pub const UNKNOWN: &str = "unknown";

/// Identity of the serving pod, as reported by `/my-app`.
#[derive(Debug, Clone, Serialize)]
pub struct PodIdentity {
    /// Pod name (`HOSTNAME`).
    pub pod: String,
    /// Namespace (`POD_NAMESPACE`, downward API).
    pub namespace: String,
    /// Node the pod is scheduled on (`K8S_NODE_NAME`, downward API).
    pub node: String,
}

impl PodIdentity {
    /// Read identity labels from the process environment.
    ///
    /// Called per request rather than cached at startup: missing values
    /// must render as `unknown` at the moment they are observed.
    pub fn from_env() -> Self {
        Self::resolve(|name| std::env::var(name).ok())
    }

    fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let label = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string())
        };

        Self {
            pod: label("HOSTNAME"),
            namespace: label("POD_NAMESPACE"),
            node: label("K8S_NODE_NAME"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_labels_present() {
        let identity = PodIdentity::resolve(|name| match name {
            "HOSTNAME" => Some("web-7d4b9c-xkq2p".to_string()),
            "POD_NAMESPACE" => Some("staging".to_string()),
            "K8S_NODE_NAME" => Some("node-eu-1".to_string()),
            _ => None,
        });

        assert_eq!(identity.pod, "web-7d4b9c-xkq2p");
        assert_eq!(identity.namespace, "staging");
        assert_eq!(identity.node, "node-eu-1");
    }

    #[test]
    fn test_missing_labels_render_unknown() {
        let identity = PodIdentity::resolve(|_| None);

        assert_eq!(identity.pod, UNKNOWN);
        assert_eq!(identity.namespace, UNKNOWN);
        assert_eq!(identity.node, UNKNOWN);
    }

    #[test]
    fn test_empty_value_treated_as_missing() {
        let identity = PodIdentity::resolve(|name| {
            (name == "POD_NAMESPACE").then(String::new)
        });

        assert_eq!(identity.namespace, UNKNOWN);
    }

    #[test]
    fn test_serializes_with_expected_keys() {
        let identity = PodIdentity::resolve(|_| None);
        let json = serde_json::to_value(&identity).unwrap();

        assert_eq!(json["pod"], UNKNOWN);
        assert_eq!(json["namespace"], UNKNOWN);
        assert_eq!(json["node"], UNKNOWN);
    }
}
