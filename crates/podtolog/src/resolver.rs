//! Shard host resolution.
//!
//! Two strategies implement [`HostResolver`]:
//! - [`ClusterLookup`] reads the pod UID and the DynaKube API URL from the cluster
//! - [`StaticConfig`] reads the host from the environment or a config file

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};
use url::Url;

use crate::config::HostSources;
use crate::error::PodLogError;
use crate::query::Query;
use crate::store::{dynakube_resource, pod_resource, ObjectStore};

/// Namespace of the shard configuration object.
pub const DYNAKUBE_NAMESPACE: &str = "dynatrace";

/// Name of the shard configuration object.
pub const DYNAKUBE_NAME: &str = "request-serving";

/// Path of the API URL inside the shard configuration object.
pub const DYNAKUBE_API_URL_PATH: &[&str] = &["spec", "apiUrl"];

/// Resolves the shard host for a query.
#[async_trait]
pub trait HostResolver: Send + Sync {
    /// Return the query with its shard host (and whatever else the strategy
    /// knows, such as the pod UID) filled in.
    async fn resolve(&self, query: Query) -> Result<Query, PodLogError>;
}

/// Look up a string nested under `path` in an untyped object.
///
/// # Errors
///
/// Returns [`PodLogError::MalformedConfig`] if a segment is missing or the
/// value is not a string.
pub fn nested_str<'a>(value: &'a Value, path: &[&str]) -> Result<&'a str, PodLogError> {
    let dotted = path.join(".");
    let mut current = value;
    for segment in path {
        current = current
            .get(segment)
            .ok_or_else(|| PodLogError::MalformedConfig(format!("{dotted} is missing")))?;
    }

    current
        .as_str()
        .ok_or_else(|| PodLogError::MalformedConfig(format!("{dotted} is not a string")))
}

/// Parse a URL and return its hostname (without port).
///
/// # Errors
///
/// Returns [`PodLogError::MalformedConfig`] if the URL does not parse or has no host.
pub fn url_hostname(raw: &str) -> Result<String, PodLogError> {
    let url = Url::parse(raw)
        .map_err(|e| PodLogError::MalformedConfig(format!("'{raw}' is not a valid URL: {e}")))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(host.to_string()),
        _ => Err(PodLogError::MalformedConfig(format!("'{raw}' has no hostname"))),
    }
}

/// Turn a configured host value into a bare host.
///
/// Full URLs are reduced to their hostname. Bare values must not carry a
/// path, query or credentials.
///
/// # Errors
///
/// Returns [`PodLogError::MalformedConfig`] if the value is not a usable host.
pub fn normalize_host(raw: &str) -> Result<String, PodLogError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(PodLogError::MalformedConfig("host is empty".to_string()));
    }
    if raw.contains("://") {
        return url_hostname(raw);
    }

    let url = Url::parse(&format!("https://{raw}"))
        .map_err(|e| PodLogError::MalformedConfig(format!("invalid host '{raw}': {e}")))?;
    let bare = url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
        && url.username().is_empty()
        && url.password().is_none()
        && !raw.ends_with('/');
    if !bare {
        return Err(PodLogError::MalformedConfig(format!(
            "host '{raw}' must not contain a path, query or credentials"
        )));
    }

    Ok(raw.to_string())
}

/// Resolves the pod UID and shard host from the cluster.
pub struct ClusterLookup<S> {
    store: S,
}

impl<S: ObjectStore> ClusterLookup<S> {
    /// Create a resolver over an object store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying object store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch the pod and return its UID.
    async fn pod_uid(&self, namespace: &str, name: &str) -> Result<String, PodLogError> {
        let pod = self.store.get(&pod_resource(), namespace, name).await?;

        pod.metadata
            .uid
            .filter(|uid| !uid.is_empty())
            .ok_or_else(|| PodLogError::Internal(format!("pod {namespace}/{name} has no UID")))
    }

    /// Fetch the DynaKube and return the hostname of its API URL.
    async fn shard_host(&self) -> Result<String, PodLogError> {
        let dynakube = self
            .store
            .get(&dynakube_resource(), DYNAKUBE_NAMESPACE, DYNAKUBE_NAME)
            .await?;

        let api_url = nested_str(&dynakube.data, DYNAKUBE_API_URL_PATH)?;
        url_hostname(api_url)
    }
}

#[async_trait]
impl<S: ObjectStore> HostResolver for ClusterLookup<S> {
    async fn resolve(&self, mut query: Query) -> Result<Query, PodLogError> {
        query.validate()?;

        if query.namespace.is_empty() {
            query.namespace = self.store.default_namespace().to_string();
            debug!(namespace = %query.namespace, "Using current context namespace");
        }

        query.pod_uid = self.pod_uid(&query.namespace, &query.pod_name).await?;
        debug!(pod = %query.pod_name, uid = %query.pod_uid, "Resolved pod UID");

        query.shard = self.shard_host().await?;
        info!(shard = %query.shard, "Resolved shard host");

        Ok(query)
    }
}

/// Reads the shard host from static configuration; no cluster access.
///
/// The pod UID stays empty, so the rendered query matches an empty UID.
pub struct StaticConfig {
    sources: HostSources,
}

impl StaticConfig {
    /// Create a resolver over the given configuration sources.
    #[must_use]
    pub fn new(sources: HostSources) -> Self {
        Self { sources }
    }
}

#[async_trait]
impl HostResolver for StaticConfig {
    async fn resolve(&self, mut query: Query) -> Result<Query, PodLogError> {
        query.validate()?;

        query.shard = normalize_host(&self.sources.host()?)?;
        info!(shard = %query.shard, "Using configured shard host");

        Ok(query)
    }
}
