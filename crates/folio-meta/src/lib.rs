//! Front matter extraction for Folio pages.
//!
//! A page may start with a YAML block fenced by `---` lines (optionally
//! preceded by a byte-order mark):
//!
//! ```text
//! ---
//! title: Setting Up
//! next_page: ../lab/exercise-1
//! exit_sign: true
//! ---
//! # Body starts here
//! ```
//!
//! [`extract_metadata`] parses the block into [`Metadata`], a flat map of
//! normalized field names to trimmed string values. [`strip_front_matter`]
//! returns the body without the block. [`title_from_path`] derives a
//! display title from a page path when no explicit title is set.

mod case;
mod fields;
mod frontmatter;

pub use case::title_from_path;
pub use fields::{FieldStyle, Metadata, normalize_field_name};
pub use frontmatter::{
    MetadataError, extract_metadata, extract_metadata_with_style, split_front_matter,
    strip_front_matter,
};
