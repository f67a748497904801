//! End-to-end link construction.

use tracing::debug;

use crate::error::PodLogError;
use crate::link::assemble_url;
use crate::query::Query;
use crate::resolver::HostResolver;
use crate::template::QueryTemplate;

/// Resolve a pod and build its logs viewer link.
///
/// Steps run in order and the first failure aborts the run:
/// validate input, resolve host (and UID), render the query, assemble the URL.
/// The returned string ends with a single newline, ready to print.
///
/// # Errors
///
/// Returns the first [`PodLogError`] raised by any step.
pub async fn build_log_url(
    resolver: &dyn HostResolver,
    template: &QueryTemplate,
    query: Query,
) -> Result<String, PodLogError> {
    query.validate()?;

    let query = resolver.resolve(query).await?;
    if query.shard.is_empty() {
        return Err(PodLogError::Internal(
            "resolver returned an empty shard host".to_string(),
        ));
    }

    let query_text = template.render(&query)?;
    debug!(query = %query_text, "Rendered log query");

    let url = assemble_url(&query.shard, &query_text)?;
    Ok(format!("{url}\n"))
}
