//! Error types for the pod-to-log-link pipeline.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving a pod to a log link.
#[derive(Debug, Error)]
pub enum PodLogError {
    /// Required user input is missing or empty.
    #[error("Invalid input: {0}")]
    Input(String),

    /// The ambient kubeconfig (context, namespace, credentials) could not be determined.
    #[error("Could not resolve Kubernetes configuration: {0}")]
    ConfigResolution(String),

    /// A named object does not exist in the cluster.
    #[error("{kind} '{name}' not found in namespace '{namespace}'")]
    NotFound {
        kind: String,
        namespace: String,
        name: String,
    },

    /// The cluster API could not be reached or refused the request.
    #[error("Kubernetes API access failed: {0}")]
    Access(String),

    /// The shard configuration exists but does not carry a usable URL.
    #[error("Malformed shard configuration: {0}")]
    MalformedConfig(String),

    /// No shard host was found in any configured source.
    #[error("No shard host configured: set the {env_var} environment variable or '{config_key}' in the config file")]
    MissingConfig {
        env_var: &'static str,
        config_key: &'static str,
    },

    /// A config file was found but could not be read or parsed.
    #[error("Invalid config file {}: {message}", path.display())]
    InvalidConfigFile { path: PathBuf, message: String },

    /// The log query template failed to parse or render.
    #[error("Query template error: {0}")]
    Template(String),

    /// An invariant guaranteed by the cluster was violated.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PodLogError {
    /// Classify a kube-rs error raised while fetching a named object.
    ///
    /// A 404 status becomes [`PodLogError::NotFound`]; every other failure
    /// (other API statuses, transport, auth) becomes [`PodLogError::Access`].
    #[must_use]
    pub fn from_kube(err: kube::Error, kind: &str, namespace: &str, name: &str) -> Self {
        match err {
            kube::Error::Api(ae) if ae.code == 404 => Self::NotFound {
                kind: kind.to_string(),
                namespace: namespace.to_string(),
                name: name.to_string(),
            },
            kube::Error::Api(ae) => Self::Access(format!(
                "{kind} {namespace}/{name}: {} ({})",
                ae.message, ae.code
            )),
            other => Self::Access(format!("{kind} {namespace}/{name}: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(code: u16, reason: &str) -> kube::Error {
        kube::Error::Api(kube::error::ErrorResponse {
            status: "Failure".to_string(),
            message: format!("request failed: {reason}"),
            reason: reason.to_string(),
            code,
        })
    }

    #[test]
    fn test_from_kube_maps_404_to_not_found() {
        let err = PodLogError::from_kube(api_error(404, "NotFound"), "Pod", "web", "api-0");
        match err {
            PodLogError::NotFound {
                kind,
                namespace,
                name,
            } => {
                assert_eq!(kind, "Pod");
                assert_eq!(namespace, "web");
                assert_eq!(name, "api-0");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_from_kube_maps_forbidden_to_access() {
        let err = PodLogError::from_kube(api_error(403, "Forbidden"), "Pod", "web", "api-0");
        assert!(matches!(err, PodLogError::Access(_)));
        assert!(err.to_string().contains("403"));
    }

    #[test]
    fn test_missing_config_names_both_sources() {
        let err = PodLogError::MissingConfig {
            env_var: "PODTOLOG_HOST",
            config_key: "host",
        };
        let message = err.to_string();
        assert!(message.contains("PODTOLOG_HOST"));
        assert!(message.contains("'host'"));
    }
}
