//! Converter trait and extension-based dispatch.

use crate::asciidoc::AsciiDocConverter;
use crate::markdown::MarkdownConverter;

/// Converts a page body in some markup language to HTML.
///
/// Converters are stateless between calls so one instance can serve
/// concurrent renders.
pub trait MarkupConverter: Send + Sync {
    /// Convert `source` to an HTML fragment.
    fn convert(&self, source: &str) -> String;
}

/// Markup language of a page source, identified by file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// `.md` sources.
    Markdown,
    /// `.adoc` sources.
    AsciiDoc,
}

impl SourceFormat {
    /// All formats in lookup order: Markdown wins when both sources exist.
    pub const PRECEDENCE: [Self; 2] = [Self::Markdown, Self::AsciiDoc];

    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::AsciiDoc => "adoc",
        }
    }

    /// Converter for this format.
    #[must_use]
    pub fn converter(self) -> &'static dyn MarkupConverter {
        static MARKDOWN: MarkdownConverter = MarkdownConverter::new();
        static ASCIIDOC: AsciiDocConverter = AsciiDocConverter::new();
        match self {
            Self::Markdown => &MARKDOWN,
            Self::AsciiDoc => &ASCIIDOC,
        }
    }

    /// Convert `source` with this format's converter.
    #[must_use]
    pub fn convert(self, source: &str) -> String {
        self.converter().convert(source)
    }
}

impl std::fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Markdown => f.write_str("Markdown"),
            Self::AsciiDoc => f.write_str("AsciiDoc"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_precedes_asciidoc() {
        assert_eq!(
            SourceFormat::PRECEDENCE,
            [SourceFormat::Markdown, SourceFormat::AsciiDoc]
        );
    }

    #[test]
    fn test_dispatch_by_format() {
        let source = "= Title\n\n*bold*";

        let markdown = SourceFormat::Markdown.convert(source);
        let asciidoc = SourceFormat::AsciiDoc.convert(source);

        assert!(markdown.contains("<em>bold</em>"));
        assert!(asciidoc.contains("<strong>bold</strong>"));
    }
}
