//! Mock content store for testing.
//!
//! Provides [`MockContentStore`] for unit testing without filesystem access.

use std::collections::HashMap;

use crate::store::{ContentStore, StorageError};

/// In-memory content store.
///
/// Files are keyed by their full name including extension
/// (`"workshop/setup.md"`).
///
/// # Example
///
/// ```ignore
/// use folio_storage::{ContentStore, MockContentStore};
///
/// let store = MockContentStore::new()
///     .with_file("intro.md", "---\nnext_page: setup\n---\n# Intro");
///
/// assert!(store.exists("intro", "md"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MockContentStore {
    files: HashMap<String, String>,
}

impl MockContentStore {
    /// Create a new empty mock store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (name includes the extension).
    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(name.into(), content.into());
        self
    }

    fn key(path: &str, extension: &str) -> String {
        format!("{path}.{extension}")
    }
}

impl ContentStore for MockContentStore {
    fn exists(&self, path: &str, extension: &str) -> bool {
        self.files.contains_key(&Self::key(path, extension))
    }

    fn read(&self, path: &str, extension: &str) -> Result<String, StorageError> {
        let key = Self::key(path, extension);
        self.files
            .get(&key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key).with_backend("Mock"))
    }
}
