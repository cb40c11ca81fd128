//! Filesystem content store.

use std::fs;
use std::path::PathBuf;

use crate::store::{ContentStore, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Content store rooted at a directory on disk.
///
/// Page `workshop/setup` with extension `md` maps to
/// `{content_dir}/workshop/setup.md`.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    content_dir: PathBuf,
}

impl FsContentStore {
    /// Create a store rooted at `content_dir`.
    #[must_use]
    pub fn new(content_dir: PathBuf) -> Self {
        Self { content_dir }
    }

    /// Validate that a page path stays inside the content directory.
    ///
    /// Rejects absolute paths and `..` segments.
    fn validate_path(path: &str) -> Result<(), StorageError> {
        if path.starts_with('/') || path.split('/').any(|segment| segment == "..") {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(path)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Map a page path and extension to a file path.
    ///
    /// The extension is appended rather than substituted so that dotted
    /// page names (`release-1.2`) keep their full stem.
    fn file_path(&self, path: &str, extension: &str) -> PathBuf {
        self.content_dir.join(format!("{path}.{extension}"))
    }
}

impl ContentStore for FsContentStore {
    fn exists(&self, path: &str, extension: &str) -> bool {
        Self::validate_path(path).is_ok() && self.file_path(path, extension).is_file()
    }

    fn read(&self, path: &str, extension: &str) -> Result<String, StorageError> {
        Self::validate_path(path)?;
        let file_path = self.file_path(path, extension);
        tracing::debug!(file = %file_path.display(), "Reading page source");
        fs::read_to_string(&file_path).map_err(|e| {
            StorageError::io(e, Some(PathBuf::from(format!("{path}.{extension}"))))
                .with_backend(BACKEND)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_store_is_send_sync() {
        assert_send_sync::<FsContentStore>();
    }

    fn create_test_dir() -> tempfile::TempDir {
        tempfile::tempdir().unwrap()
    }

    #[test]
    fn test_read_existing_file() {
        let temp_dir = create_test_dir();
        fs::write(
            temp_dir.path().join("intro.md"),
            "# Intro\n\nContent here.",
        )
        .unwrap();

        let store = FsContentStore::new(temp_dir.path().to_path_buf());
        let content = store.read("intro", "md").unwrap();

        assert_eq!(content, "# Intro\n\nContent here.");
    }

    #[test]
    fn test_read_nested_file() {
        let temp_dir = create_test_dir();
        let workshop = temp_dir.path().join("workshop");
        fs::create_dir(&workshop).unwrap();
        fs::write(workshop.join("setup.adoc"), "= Setup").unwrap();

        let store = FsContentStore::new(temp_dir.path().to_path_buf());

        assert_eq!(store.read("workshop/setup", "adoc").unwrap(), "= Setup");
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = create_test_dir();

        let store = FsContentStore::new(temp_dir.path().to_path_buf());
        let err = store.read("nonexistent", "md").unwrap_err();

        assert_eq!(err.kind(), StorageErrorKind::NotFound);
        assert_eq!(err.backend(), Some("Fs"));
    }

    #[test]
    fn test_exists_checks_extension() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("intro.adoc"), "= Intro").unwrap();

        let store = FsContentStore::new(temp_dir.path().to_path_buf());

        assert!(store.exists("intro", "adoc"));
        assert!(!store.exists("intro", "md"));
    }

    #[test]
    fn test_exists_ignores_directories() {
        let temp_dir = create_test_dir();
        fs::create_dir(temp_dir.path().join("intro.md")).unwrap();

        let store = FsContentStore::new(temp_dir.path().to_path_buf());

        assert!(!store.exists("intro", "md"));
    }

    #[test]
    fn test_dotted_page_name_keeps_stem() {
        let temp_dir = create_test_dir();
        fs::write(temp_dir.path().join("release-1.2.md"), "notes").unwrap();

        let store = FsContentStore::new(temp_dir.path().to_path_buf());

        assert!(store.exists("release-1.2", "md"));
    }

    #[test]
    fn test_rejects_parent_traversal() {
        let temp_dir = create_test_dir();

        let store = FsContentStore::new(temp_dir.path().join("content"));

        assert!(!store.exists("../secret", "md"));
        let err = store.read("../secret", "md").unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_rejects_absolute_path() {
        let store = FsContentStore::new(PathBuf::from("/nonexistent"));

        let err = store.read("/etc/passwd", "md").unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::InvalidPath);
    }
}
