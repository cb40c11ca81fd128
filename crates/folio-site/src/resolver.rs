//! Page sequence resolution.
//!
//! [`PageResolver`] builds the ordered, doubly linked page sequence in one of
//! two modes:
//!
//! - **Manifest**: the configured page list, in order. Missing titles are
//!   derived from the path.
//! - **Discovery**: used when the manifest is empty. Starting at the default
//!   page, follow each page's `next_page` front matter field (relative to the
//!   page's directory) until a page has none, the target has no Markdown
//!   source, or the target was already visited.
//!
//! Discovery only reads `.md` sources.

use std::collections::HashSet;
use std::sync::Arc;

use folio_meta::{Metadata, extract_metadata, title_from_path};
use folio_renderer::SourceFormat;
use folio_storage::ContentStore;

use crate::page::{ManifestEntry, Page};
use crate::site::{SiteConfig, SiteError};
use crate::util::{join_relative, normalize_path};

/// Why resolution stopped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Sequence came from the configured manifest.
    Manifest,
    /// The last page has no `next_page` field.
    Ended,
    /// The last page points at a path with no Markdown source.
    MissingTarget {
        /// Page whose `next_page` could not be followed.
        from: String,
        /// Resolved target path.
        target: String,
    },
    /// The last page points back at a page already in the sequence.
    Cycle {
        /// Page whose `next_page` closes the cycle.
        from: String,
        /// Resolved target path, already visited.
        target: String,
    },
    /// No manifest and no default page source.
    Empty,
}

/// Builds the page sequence from a content store and configuration.
pub struct PageResolver {
    store: Arc<dyn ContentStore>,
    default_page: String,
    manifest: Vec<ManifestEntry>,
}

impl PageResolver {
    /// Create a resolver.
    pub fn new(store: Arc<dyn ContentStore>, config: &SiteConfig) -> Self {
        Self {
            store,
            default_page: config.default_page.clone(),
            manifest: config.pages.clone(),
        }
    }

    /// Resolve the page sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Metadata`] if a visited page has malformed front
    /// matter, or [`SiteError::Storage`] if a source cannot be read.
    pub fn resolve(&self) -> Result<Vec<Page>, SiteError> {
        self.resolve_with_outcome().map(|(pages, _)| pages)
    }

    /// Resolve the page sequence and report why resolution stopped.
    ///
    /// The sequence is identical to [`resolve`](Self::resolve).
    pub fn resolve_with_outcome(&self) -> Result<(Vec<Page>, Resolution), SiteError> {
        if self.manifest.is_empty() {
            self.discover()
        } else {
            Ok((self.resolve_manifest(), Resolution::Manifest))
        }
    }

    fn resolve_manifest(&self) -> Vec<Page> {
        let mut pages: Vec<Page> = Vec::with_capacity(self.manifest.len());

        for entry in &self.manifest {
            let title = entry
                .title
                .clone()
                .unwrap_or_else(|| title_from_path(&entry.path));
            let mut page = Page::new(entry.path.clone(), title);
            page.exit_sign = entry.exit_sign;
            page.exit_link.clone_from(&entry.exit_link);
            link(&mut pages, page);
        }

        tracing::debug!(count = pages.len(), "Resolved pages from manifest");
        pages
    }

    fn discover(&self) -> Result<(Vec<Page>, Resolution), SiteError> {
        let extension = SourceFormat::Markdown.extension();
        let mut path = normalize_path(&self.default_page);

        if path.is_empty() || !self.store.exists(&path, extension) {
            tracing::debug!(default_page = %path, "Default page has no Markdown source");
            return Ok((Vec::new(), Resolution::Empty));
        }

        let mut pages = Vec::new();
        let mut visited = HashSet::new();

        loop {
            let metadata = self.load_metadata(&path)?;
            let title = metadata
                .title()
                .map_or_else(|| title_from_path(&path), ToOwned::to_owned);
            let mut page = Page::new(path.clone(), title);
            page.exit_sign = metadata.exit_sign();
            page.exit_link = metadata.exit_link().map(ToOwned::to_owned);

            visited.insert(path.clone());
            link(&mut pages, page);

            let Some(next) = metadata.next_page() else {
                tracing::debug!(count = pages.len(), "Discovered pages");
                return Ok((pages, Resolution::Ended));
            };

            let target = join_relative(&path, next);

            if visited.contains(&target) {
                tracing::warn!(from = %path, to = %target, "Cycle in next_page links, stopping");
                return Ok((pages, Resolution::Cycle { from: path, target }));
            }

            if target.is_empty() || !self.store.exists(&target, extension) {
                tracing::warn!(from = %path, to = %target, "next_page target has no Markdown source");
                return Ok((pages, Resolution::MissingTarget { from: path, target }));
            }

            tracing::debug!(from = %path, to = %target, "Following next_page");
            path = target;
        }
    }

    fn load_metadata(&self, path: &str) -> Result<Metadata, SiteError> {
        let text = self.store.read(path, SourceFormat::Markdown.extension())?;
        extract_metadata(&text).map_err(|source| SiteError::Metadata {
            path: path.to_owned(),
            source,
        })
    }
}

/// Append `page`, linking it with the current last page.
fn link(pages: &mut Vec<Page>, mut page: Page) {
    if let Some(last) = pages.last_mut() {
        last.next_page = Some(page.path.clone());
        page.prev_page = Some(last.path.clone());
    }
    pages.push(page);
}
