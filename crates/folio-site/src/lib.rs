//! Page sequence resolution and page rendering for Folio.
//!
//! This crate provides:
//! - [`PageResolver`]: builds the ordered, linked [`Page`] sequence from a
//!   manifest or by following `next_page` front matter links
//! - [`PageIndex`]: lookup of resolved pages by path
//! - [`RenderingPipeline`]: front matter stripping, variable substitution and
//!   markup conversion for a single page
//! - [`Site`]: both of the above over one content store
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use std::sync::Arc;
//! use folio_renderer::Variable;
//! use folio_site::{Site, SiteConfig, build_index};
//! use folio_storage::FsContentStore;
//!
//! let store = Arc::new(FsContentStore::new(PathBuf::from("content")));
//! let site = Site::new(store, &SiteConfig::default());
//!
//! let pages = site.resolve_pages()?;
//! let index = build_index(&pages);
//!
//! let vars = [Variable::new("user", "ana")];
//! if let Some(page) = site.render("index", &vars)? {
//!     println!("{}", page.html);
//! }
//! # Ok(())
//! # }
//! ```

mod page;
mod renderer;
mod resolver;
mod site;
mod util;

pub use page::{ManifestEntry, Page, PageIndex, build_index};
pub use renderer::{RenderedPage, RenderingPipeline};
pub use resolver::{PageResolver, Resolution};
pub use site::{Site, SiteConfig, SiteError};
