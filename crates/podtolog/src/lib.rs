//! Resolve a Kubernetes pod to a Dynatrace logs viewer link.
//!
//! The pipeline looks up the pod's UID, finds the log service shard the
//! cluster reports to, renders a DQL query for that pod and embeds it in
//! the viewer URL fragment.
//!
//! # Example
//!
//! ```ignore
//! use podtolog::{build_log_url, ClusterLookup, KubeObjectStore, Query, QueryTemplate};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = KubeObjectStore::connect(None, None).await?;
//!     let resolver = ClusterLookup::new(store);
//!     let template = QueryTemplate::new(podtolog::template::DEFAULT_TEMPLATE)?;
//!     let query = Query::new("api-0", Some("web".into()))?;
//!     print!("{}", build_log_url(&resolver, &template, query).await?);
//!     Ok(())
//! }
//! ```

// Allow product names without backticks in doc comments
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod error;
pub mod kubeconfig;
pub mod link;
pub mod pipeline;
pub mod query;
pub mod resolver;
pub mod store;
pub mod template;

// Re-export commonly used types at the crate root
pub use config::HostSources;
pub use error::PodLogError;
pub use pipeline::build_log_url;
pub use query::Query;
pub use resolver::{ClusterLookup, HostResolver, StaticConfig};
pub use store::{KubeObjectStore, ObjectStore};
pub use template::QueryTemplate;
