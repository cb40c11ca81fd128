//! Markdown to HTML conversion.

use pulldown_cmark::{Options, Parser, html};

use crate::converter::MarkupConverter;

/// `CommonMark` converter backed by `pulldown-cmark`.
///
/// Raw HTML in the source is passed through untouched and typographic
/// replacement (smart quotes, dashes) is off, so the output follows the
/// source text literally.
#[derive(Clone, Copy, Debug)]
pub struct MarkdownConverter {
    gfm: bool,
}

impl MarkdownConverter {
    /// Create a converter with GitHub Flavored Markdown enabled.
    #[must_use]
    pub const fn new() -> Self {
        Self { gfm: true }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// GFM is enabled by default. When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub const fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Get parser options based on GFM configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        if self.gfm {
            Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
        } else {
            Options::empty()
        }
    }
}

impl Default for MarkdownConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkupConverter for MarkdownConverter {
    fn convert(&self, source: &str) -> String {
        let parser = Parser::new_ext(source, self.parser_options());
        let mut output = String::with_capacity(source.len() * 3 / 2);
        html::push_html(&mut output, parser);
        output
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn convert(source: &str) -> String {
        MarkdownConverter::new().convert(source)
    }

    #[test]
    fn test_paragraph_and_heading() {
        assert_eq!(
            convert("# Title\n\nHello World"),
            "<h1>Title</h1>\n<p>Hello World</p>\n"
        );
    }

    #[test]
    fn test_tables_enabled() {
        let html = convert("| a | b |\n|---|---|\n| 1 | 2 |");

        assert!(html.contains("<table>"));
        assert!(html.contains("<td>1</td>"));
    }

    #[test]
    fn test_tables_disabled_without_gfm() {
        let html = MarkdownConverter::new()
            .with_gfm(false)
            .convert("| a | b |\n|---|---|\n| 1 | 2 |");

        assert!(!html.contains("<table>"));
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(convert("~~gone~~"), "<p><del>gone</del></p>\n");
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = convert("<div class=\"note\">Keep me</div>\n\ntext <span>inline</span>");

        assert!(html.contains("<div class=\"note\">Keep me</div>"));
        assert!(html.contains("<span>inline</span>"));
    }

    #[test]
    fn test_no_smart_punctuation() {
        assert_eq!(convert("a -- b..."), "<p>a -- b...</p>\n");
    }

    #[test]
    fn test_fenced_code_block() {
        let html = convert("```rust\nfn main() {}\n```");

        assert_eq!(
            html,
            "<pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n"
        );
    }
}
