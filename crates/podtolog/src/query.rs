//! The log query model threaded through the pipeline.

use serde::Serialize;

use crate::error::PodLogError;

/// Fields available to the log query template.
///
/// Built once from CLI input, enriched by a [`HostResolver`](crate::resolver::HostResolver)
/// (namespace default, pod UID, shard host) and then read by the renderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    /// Cluster-assigned pod UID. Empty until resolved.
    pub pod_uid: String,
    /// Name of the pod to look up.
    pub pod_name: String,
    /// Namespace of the pod. Empty means the current context's namespace.
    pub namespace: String,
    /// Hostname of the log service shard.
    pub shard: String,
}

impl Query {
    /// Create a query for a pod, optionally scoped to a namespace.
    ///
    /// # Errors
    ///
    /// Returns [`PodLogError::Input`] if the pod name is empty.
    pub fn new(
        pod_name: impl Into<String>,
        namespace: Option<String>,
    ) -> Result<Self, PodLogError> {
        let query = Self {
            pod_name: pod_name.into(),
            namespace: namespace.unwrap_or_default(),
            ..Default::default()
        };
        query.validate()?;
        Ok(query)
    }

    /// Check that the query names a pod.
    ///
    /// # Errors
    ///
    /// Returns [`PodLogError::Input`] if the pod name is empty or blank.
    pub fn validate(&self) -> Result<(), PodLogError> {
        if self.pod_name.trim().is_empty() {
            return Err(PodLogError::Input("pod name is required".to_string()));
        }
        Ok(())
    }
}
