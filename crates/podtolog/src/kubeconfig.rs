//! Kubeconfig discovery.
//!
//! Resolution order for the kubeconfig file:
//! - An explicit path (`--kubeconfig`)
//! - The `KUBECONFIG` environment variable
//! - `~/.kube/config`

use std::path::{Path, PathBuf};

use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::Config;
use tracing::debug;

use crate::error::PodLogError;

/// Get the default kubeconfig path (~/.kube/config).
#[must_use]
pub fn default_kubeconfig_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".kube").join("config"))
}

/// Load the kubeconfig, using an explicit path when given.
///
/// # Errors
///
/// Returns [`PodLogError::ConfigResolution`] if no kubeconfig can be found or read.
pub fn load_kubeconfig(path: Option<&Path>) -> Result<Kubeconfig, PodLogError> {
    if let Some(path) = path {
        debug!(path = %path.display(), "Reading kubeconfig");
        return Kubeconfig::read_from(path).map_err(|e| {
            PodLogError::ConfigResolution(format!(
                "failed to read kubeconfig {}: {e}",
                path.display()
            ))
        });
    }

    if std::env::var_os("KUBECONFIG").is_some() {
        debug!("Reading kubeconfig from KUBECONFIG");
        return Kubeconfig::read()
            .map_err(|e| PodLogError::ConfigResolution(format!("failed to read KUBECONFIG: {e}")));
    }

    let default_path = default_kubeconfig_path().ok_or_else(|| {
        PodLogError::ConfigResolution("could not determine home directory".to_string())
    })?;
    if !default_path.exists() {
        return Err(PodLogError::ConfigResolution(format!(
            "no kubeconfig found at {}",
            default_path.display()
        )));
    }

    load_kubeconfig(Some(&default_path))
}

/// Build a client configuration for the selected (or current) context.
///
/// The returned [`Config::default_namespace`] is the context's namespace,
/// or `default` when the context does not set one.
///
/// # Errors
///
/// Returns [`PodLogError::ConfigResolution`] if the kubeconfig or context is unusable.
pub async fn client_config(
    path: Option<&Path>,
    context: Option<&str>,
) -> Result<Config, PodLogError> {
    let kubeconfig = load_kubeconfig(path)?;
    let options = KubeConfigOptions {
        context: context.map(ToString::to_string),
        ..Default::default()
    };

    let config = Config::from_custom_kubeconfig(kubeconfig, &options)
        .await
        .map_err(|e| PodLogError::ConfigResolution(e.to_string()))?;

    debug!(
        cluster_url = %config.cluster_url,
        namespace = %config.default_namespace,
        "Resolved kubeconfig context"
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KUBECONFIG: &str = r"
apiVersion: v1
kind: Config
current-context: dev
clusters:
- name: dev
  cluster:
    server: https://127.0.0.1:6443
- name: prod
  cluster:
    server: https://10.0.0.1:6443
contexts:
- name: dev
  context:
    cluster: dev
    user: dev
    namespace: web
- name: prod
  context:
    cluster: prod
    user: dev
users:
- name: dev
  user:
    token: abc
";

    fn write_kubeconfig(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("config");
        std::fs::write(&path, KUBECONFIG).unwrap();
        path
    }

    #[test]
    fn test_default_kubeconfig_path() {
        let path = default_kubeconfig_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains(".kube"));
        assert!(path.to_string_lossy().ends_with("config"));
    }

    #[test]
    fn test_missing_explicit_path_is_config_resolution_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_kubeconfig(Some(&dir.path().join("absent")));
        assert!(matches!(result, Err(PodLogError::ConfigResolution(_))));
    }

    #[tokio::test]
    async fn test_current_context_namespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_kubeconfig(&dir);

        let config = client_config(Some(&path), None).await.unwrap();
        assert_eq!(config.default_namespace, "web");
    }

    #[tokio::test]
    async fn test_context_without_namespace_uses_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_kubeconfig(&dir);

        let config = client_config(Some(&path), Some("prod")).await.unwrap();
        assert_eq!(config.default_namespace, "default");
        assert!(config.cluster_url.to_string().contains("10.0.0.1"));
    }

    #[tokio::test]
    async fn test_unknown_context_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_kubeconfig(&dir);

        let result = client_config(Some(&path), Some("staging")).await;
        assert!(matches!(result, Err(PodLogError::ConfigResolution(_))));
    }
}
