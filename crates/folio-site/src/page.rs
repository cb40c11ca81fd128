//! Page records and the path index.

use std::collections::HashMap;

use serde::Serialize;

/// A page in the resolved sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Page {
    /// Content-relative path without extension (e.g., "lab/setup").
    pub path: String,
    /// Display title.
    pub title: String,
    /// Path of the previous page in the sequence.
    pub prev_page: Option<String>,
    /// Path of the next page in the sequence.
    pub next_page: Option<String>,
    /// Whether the page shows an exit control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_sign: Option<bool>,
    /// Target of the exit control.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_link: Option<String>,
}

impl Page {
    pub(crate) fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            prev_page: None,
            next_page: None,
            exit_sign: None,
            exit_link: None,
        }
    }
}

/// A page descriptor in a configured manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Page path.
    pub path: String,
    /// Explicit title. Derived from the path when `None`.
    pub title: Option<String>,
    /// Exit control flag passed through to the page.
    pub exit_sign: Option<bool>,
    /// Exit control target passed through to the page.
    pub exit_link: Option<String>,
}

impl ManifestEntry {
    /// Create an entry with only a path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Read-only lookup of pages by path.
#[derive(Clone, Debug, Default)]
pub struct PageIndex {
    pages: HashMap<String, Page>,
}

impl PageIndex {
    /// Build an index from a resolved sequence.
    ///
    /// A repeated path overwrites the earlier entry.
    pub fn build(pages: &[Page]) -> Self {
        let pages = pages
            .iter()
            .map(|page| (page.path.clone(), page.clone()))
            .collect();
        Self { pages }
    }

    /// Look up a page by path.
    pub fn get(&self, path: &str) -> Option<&Page> {
        self.pages.get(path)
    }

    /// Number of indexed pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

}

/// Build a [`PageIndex`] from a resolved sequence.
pub fn build_index(pages: &[Page]) -> PageIndex {
    PageIndex::build(pages)
}
