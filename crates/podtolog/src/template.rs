//! Log query rendering using Handlebars.

use handlebars::Handlebars;

use crate::error::PodLogError;
use crate::query::Query;

/// The DQL query opened in the logs viewer.
///
/// Scans logs, keeps the records of one pod by UID and shows the newest first.
pub const DEFAULT_TEMPLATE: &str = "fetch logs //, scanLimitGBytes: 500, samplingRatio: 1000
\t| filter matchesValue(k8s.pod.uid, \"{{pod_uid}}\")
\t| sort timestamp desc";

const TEMPLATE_NAME: &str = "default";

/// A compiled log query template.
pub struct QueryTemplate {
    handlebars: Handlebars<'static>,
}

impl QueryTemplate {
    /// Compile a template string.
    ///
    /// Values are inserted verbatim: no HTML escaping, and missing fields
    /// render as empty strings.
    ///
    /// # Errors
    ///
    /// Returns [`PodLogError::Template`] if the template does not parse.
    pub fn new(template: &str) -> Result<Self, PodLogError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(false);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars
            .register_template_string(TEMPLATE_NAME, template)
            .map_err(|e| PodLogError::Template(e.to_string()))?;

        Ok(Self { handlebars })
    }

    /// Render the query text for a pod.
    ///
    /// # Errors
    ///
    /// Returns [`PodLogError::Template`] if rendering fails.
    pub fn render(&self, query: &Query) -> Result<String, PodLogError> {
        self.handlebars
            .render(TEMPLATE_NAME, query)
            .map_err(|e| PodLogError::Template(e.to_string()))
    }
}
