//! Read-only access to cluster objects.

use std::path::Path;

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Pod;
use kube::api::{Api, DynamicObject};
use kube::discovery::ApiResource;
use kube::Client;
use tracing::debug;

use crate::error::PodLogError;
use crate::kubeconfig;

/// API resource for core `v1/Pod`.
#[must_use]
pub fn pod_resource() -> ApiResource {
    ApiResource::erase::<Pod>(&())
}

/// API resource for the Dynatrace operator's `DynaKube` custom resource.
#[must_use]
pub fn dynakube_resource() -> ApiResource {
    ApiResource {
        group: "dynatrace.com".to_string(),
        version: "v1alpha1".to_string(),
        api_version: "dynatrace.com/v1alpha1".to_string(),
        kind: "DynaKube".to_string(),
        plural: "dynakubes".to_string(),
    }
}

/// A generic, namespaced object store.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Namespace of the current context.
    fn default_namespace(&self) -> &str;

    /// Fetch one object by name.
    async fn get(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject, PodLogError>;
}

/// [`ObjectStore`] backed by the Kubernetes API.
pub struct KubeObjectStore {
    client: Client,
}

impl KubeObjectStore {
    /// Wrap an existing client.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect using the discovered kubeconfig and optional context override.
    ///
    /// # Errors
    ///
    /// Returns [`PodLogError::ConfigResolution`] if the kubeconfig is missing or unusable.
    pub async fn connect(
        kubeconfig_path: Option<&Path>,
        context: Option<&str>,
    ) -> Result<Self, PodLogError> {
        let config = kubeconfig::client_config(kubeconfig_path, context).await?;
        let client = Client::try_from(config).map_err(|e| {
            PodLogError::ConfigResolution(format!("failed to create Kubernetes client: {e}"))
        })?;

        Ok(Self::new(client))
    }
}

#[async_trait]
impl ObjectStore for KubeObjectStore {
    fn default_namespace(&self) -> &str {
        self.client.default_namespace()
    }

    async fn get(
        &self,
        resource: &ApiResource,
        namespace: &str,
        name: &str,
    ) -> Result<DynamicObject, PodLogError> {
        debug!(kind = %resource.kind, %namespace, %name, "Fetching object");
        let api: Api<DynamicObject> =
            Api::namespaced_with(self.client.clone(), namespace, resource);
        api.get(name)
            .await
            .map_err(|e| PodLogError::from_kube(e, &resource.kind, namespace, name))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pod_resource() {
        let api = pod_resource();
        assert_eq!(api.group, "");
        assert_eq!(api.version, "v1");
        assert_eq!(api.kind, "Pod");
        assert_eq!(api.plural, "pods");
    }

    #[test]
    fn test_dynakube_resource() {
        let api = dynakube_resource();
        assert_eq!(api.group, "dynatrace.com");
        assert_eq!(api.version, "v1alpha1");
        assert_eq!(api.kind, "DynaKube");
        assert_eq!(api.plural, "dynakubes");
    }
}
