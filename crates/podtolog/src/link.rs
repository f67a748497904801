//! Logs viewer URL assembly.
//!
//! The viewer reads the query from the URL fragment as base64 of the
//! path-escaped query text, so escaping always happens before encoding.

use base64::{engine::general_purpose, Engine as _};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::error::PodLogError;

/// Path of the logs viewer on a shard.
pub const LOG_QUERY_PATH: &str = "ui/logs-events";

/// UI state parameters, serialised in this order.
pub const UI_PARAMS: &[(&str, &str)] = &[
    ("gtf", "-2h"),
    ("gf", "all"),
    ("sortDirection", "desc"),
    ("visibleColumns", "timestamp"),
    ("visibleColumns", "status"),
    ("visibleColumns", "content"),
    ("advancedQueryMode", "true"),
    ("visualizationType", "table"),
    ("isDefaultQuery", "true"),
];

/// Bytes left literal inside a URL path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Percent-escape text so it can be placed in a URL path segment.
#[must_use]
pub fn escape_path_segment(text: &str) -> String {
    utf8_percent_encode(text, PATH_SEGMENT).to_string()
}

/// Escape the query text and encode it as unpadded standard base64.
#[must_use]
pub fn encode_fragment(query_text: &str) -> String {
    general_purpose::STANDARD_NO_PAD.encode(escape_path_segment(query_text))
}

/// Build the viewer URL without its fragment.
///
/// # Errors
///
/// Returns [`PodLogError::MalformedConfig`] if the host does not form a valid URL.
pub fn base_url(shard_host: &str) -> Result<Url, PodLogError> {
    let mut url = Url::parse(&format!("https://{shard_host}")).map_err(|e| {
        PodLogError::MalformedConfig(format!("invalid shard host '{shard_host}': {e}"))
    })?;

    url.set_path(LOG_QUERY_PATH);
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in UI_PARAMS {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

/// Build the full viewer URL for a rendered query.
///
/// # Errors
///
/// Returns [`PodLogError::MalformedConfig`] if the host does not form a valid URL.
pub fn assemble_url(shard_host: &str, query_text: &str) -> Result<String, PodLogError> {
    let url = base_url(shard_host)?;
    Ok(format!("{url}#{}", encode_fragment(query_text)))
}
