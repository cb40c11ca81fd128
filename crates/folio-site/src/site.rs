//! Site facade over resolution and rendering.

use std::sync::Arc;

use folio_meta::MetadataError;
use folio_renderer::{TemplateEngine, TemplateError, Variable};
use folio_storage::{ContentStore, StorageError};

use crate::page::{ManifestEntry, Page, PageIndex};
use crate::renderer::{RenderedPage, RenderingPipeline};
use crate::resolver::{PageResolver, Resolution};

/// Error returned by site operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Front matter of a page could not be parsed.
    #[error("Invalid front matter in '{path}': {source}")]
    Metadata {
        /// Page path.
        path: String,
        /// Parse error.
        source: MetadataError,
    },
    /// A page source could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// Variable substitution failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Configuration for [`Site`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    /// Page where discovery starts.
    pub default_page: String,
    /// Ordered page manifest. Discovery is used when empty.
    pub pages: Vec<ManifestEntry>,
    /// Variable substitution strategy.
    pub template_engine: TemplateEngine,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_page: "index".to_owned(),
            pages: Vec::new(),
            template_engine: TemplateEngine::default(),
        }
    }
}

/// Page sequence resolution and rendering over one content store.
pub struct Site {
    resolver: PageResolver,
    pipeline: RenderingPipeline,
}

impl Site {
    /// Create a site.
    #[must_use]
    pub fn new(store: Arc<dyn ContentStore>, config: &SiteConfig) -> Self {
        Self {
            resolver: PageResolver::new(Arc::clone(&store), config),
            pipeline: RenderingPipeline::new(store, config.template_engine),
        }
    }

    /// Resolve the ordered page sequence.
    pub fn resolve_pages(&self) -> Result<Vec<Page>, SiteError> {
        self.resolver.resolve()
    }

    /// Resolve the page sequence along with why resolution stopped.
    pub fn resolve_with_outcome(&self) -> Result<(Vec<Page>, Resolution), SiteError> {
        let (pages, outcome) = self.resolver.resolve_with_outcome()?;
        if let Resolution::Cycle { from, target } = &outcome {
            tracing::debug!(%from, to = %target, count = pages.len(), "Page sequence truncated at cycle");
        }
        Ok((pages, outcome))
    }

    /// Resolve the page sequence and index it by path.
    pub fn index(&self) -> Result<(Vec<Page>, PageIndex), SiteError> {
        let pages = self.resolve_pages()?;
        let index = PageIndex::build(&pages);
        Ok((pages, index))
    }

    /// Render one page. `Ok(None)` means the page has no source.
    pub fn render(
        &self,
        path: &str,
        variables: &[Variable],
    ) -> Result<Option<RenderedPage>, SiteError> {
        self.pipeline.render(path, variables)
    }

    /// Variable substitution strategy in use.
    pub fn template_engine(&self) -> TemplateEngine {
        self.pipeline.engine()
    }
}
