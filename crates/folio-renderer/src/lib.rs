//! Markup converters and variable substitution for Folio.
//!
//! Rendering a page body happens in two steps:
//!
//! 1. [`TemplateEngine::substitute`] injects per-request [`Variable`]s into
//!    the body, either by plain `%name%` replacement or through a
//!    `MiniJinja` template pass.
//! 2. The [`SourceFormat`] of the page's source file selects a
//!    [`MarkupConverter`] that turns the body into HTML.
//!
//! # Example
//!
//! ```
//! use folio_renderer::{SourceFormat, TemplateEngine, Variable};
//!
//! let vars = [Variable::new("name", "World")];
//! let body = TemplateEngine::Naive.substitute("Hello **%name%**", &vars).unwrap();
//! let html = SourceFormat::Markdown.convert(&body);
//! assert_eq!(html, "<p>Hello <strong>World</strong></p>\n");
//! ```

mod asciidoc;
mod converter;
mod markdown;
mod template;
mod util;

pub use asciidoc::AsciiDocConverter;
pub use converter::{MarkupConverter, SourceFormat};
pub use markdown::MarkdownConverter;
pub use template::{TemplateEngine, TemplateError, UnknownTemplateEngine, Variable};
pub use util::escape_html;
