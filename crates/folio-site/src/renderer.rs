//! Page rendering pipeline.
//!
//! [`RenderingPipeline`] turns one page source into HTML: locate the source
//! (Markdown first, then AsciiDoc), strip the front matter, substitute
//! variables, then convert with the converter for the source's format.

use std::sync::Arc;

use folio_meta::strip_front_matter;
use folio_renderer::{SourceFormat, TemplateEngine, Variable};
use folio_storage::ContentStore;

use crate::site::SiteError;

/// Result of rendering a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Rendered HTML fragment.
    pub html: String,
    /// Format of the source that was rendered.
    pub format: SourceFormat,
}

/// Renders pages from a content store.
///
/// Holds no per-call state, so one pipeline can render pages concurrently.
pub struct RenderingPipeline {
    store: Arc<dyn ContentStore>,
    engine: TemplateEngine,
}

impl RenderingPipeline {
    /// Create a pipeline using `engine` for variable substitution.
    pub fn new(store: Arc<dyn ContentStore>, engine: TemplateEngine) -> Self {
        Self { store, engine }
    }

    /// Substitution strategy in use.
    pub fn engine(&self) -> TemplateEngine {
        self.engine
    }

    /// Find the source format for `path`, in precedence order.
    pub fn locate(&self, path: &str) -> Option<SourceFormat> {
        SourceFormat::PRECEDENCE
            .into_iter()
            .find(|format| self.store.exists(path, format.extension()))
    }

    /// Render the page at `path`.
    ///
    /// Returns `Ok(None)` when the page has no source in any format.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Storage`] if the source cannot be read, or
    /// [`SiteError::Template`] if the template pass fails.
    pub fn render(
        &self,
        path: &str,
        variables: &[Variable],
    ) -> Result<Option<RenderedPage>, SiteError> {
        let Some(format) = self.locate(path) else {
            tracing::debug!(path, "No source found for page");
            return Ok(None);
        };

        let text = self.store.read(path, format.extension())?;
        let body = strip_front_matter(&text);
        let body = self.engine.substitute(body, variables)?;

        tracing::debug!(path, %format, engine = %self.engine, "Rendering page");
        let html = format.convert(&body);

        Ok(Some(RenderedPage { html, format }))
    }
}
