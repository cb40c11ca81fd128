//! Content store abstraction for Folio.
//!
//! Page sources live in a content store addressed by page path plus file
//! extension. The core only ever asks two questions of a store: does
//! `path.ext` exist, and what is its text. Everything else (directory
//! scanning, watching, caching) is out of scope.
//!
//! The crate provides:
//! - [`ContentStore`] trait with `exists()` and `read()` methods
//! - [`FsContentStore`] implementation rooted at a content directory
//! - [`MockContentStore`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_storage::{ContentStore, FsContentStore};
//!
//! let store = FsContentStore::new(PathBuf::from("content"));
//! if store.exists("intro", "md") {
//!     let text = store.read("intro", "md")?;
//! }
//! ```

mod fs;
#[cfg(feature = "mock")]
mod mock;
mod store;

pub use fs::FsContentStore;
#[cfg(feature = "mock")]
pub use mock::MockContentStore;
pub use store::{ContentStore, StorageError, StorageErrorKind};
