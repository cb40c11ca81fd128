//! Front matter detection and parsing.

use std::sync::LazyLock;

use regex::Regex;
use serde_yaml::Value;

use crate::fields::{FieldStyle, Metadata};

/// Leading `---` fenced block, each fence on its own line.
///
/// Group 1 is the block content. The first closing fence ends the block.
static FRONT_MATTER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A\x{FEFF}?---[ \t]*\r?\n(.*?)^---[ \t]*\r?$").unwrap()
});

/// Error type for front matter parsing.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The fenced block is not valid YAML.
    #[error("Invalid YAML in front matter: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Split raw page text into the front matter block (if any) and the rest.
///
/// The returned body is not trimmed. Text without a leading fenced block is
/// returned unchanged as the body.
pub fn split_front_matter(text: &str) -> (Option<&str>, &str) {
    match FRONT_MATTER_RE.captures(text) {
        Some(caps) => {
            let block = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (Some(block), &text[end..])
        }
        None => (None, text),
    }
}

/// Return the page body without its front matter, trimmed.
pub fn strip_front_matter(text: &str) -> &str {
    split_front_matter(text).1.trim()
}

/// Extract front matter fields with underscore-joined names.
///
/// # Errors
///
/// Returns [`MetadataError::Parse`] if the fenced block is malformed YAML.
pub fn extract_metadata(text: &str) -> Result<Metadata, MetadataError> {
    extract_metadata_with_style(text, FieldStyle::Underscore)
}

/// Extract front matter fields, normalizing names in the given style.
///
/// Text without a fenced block yields empty metadata. A block whose YAML
/// document is not a mapping (empty, a bare scalar or a list) also yields
/// empty metadata.
///
/// # Errors
///
/// Returns [`MetadataError::Parse`] if the fenced block is malformed YAML.
pub fn extract_metadata_with_style(
    text: &str,
    style: FieldStyle,
) -> Result<Metadata, MetadataError> {
    let mut metadata = Metadata::new(style);

    let Some(block) = split_front_matter(text).0 else {
        return Ok(metadata);
    };
    let block = block.trim();
    if block.is_empty() {
        return Ok(metadata);
    }

    let Value::Mapping(mapping) = serde_yaml::from_str::<Value>(block)? else {
        return Ok(metadata);
    };

    for (key, value) in &mapping {
        let name = value_to_string(key)?;
        let value = value_to_string(value)?;
        metadata.insert(&name, &value);
    }

    Ok(metadata)
}

/// Coerce a YAML value into its string form.
///
/// Scalars use their plain representation, `null` becomes empty, sequences
/// join their items with `,` and mappings are rendered back as YAML text.
fn value_to_string(value: &Value) -> Result<String, MetadataError> {
    Ok(match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Sequence(items) => items
            .iter()
            .map(value_to_string)
            .collect::<Result<Vec<_>, _>>()?
            .join(","),
        Value::Mapping(_) => serde_yaml::to_string(value)?.trim().to_owned(),
        Value::Tagged(tagged) => value_to_string(&tagged.value)?,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_split_without_front_matter() {
        let text = "# Title\n\nBody";

        assert_eq!(split_front_matter(text), (None, text));
    }

    #[test]
    fn test_split_with_front_matter() {
        let text = "---\ntitle: Foo\n---\nHello";
        let (block, body) = split_front_matter(text);

        assert_eq!(block, Some("title: Foo\n"));
        assert_eq!(body, "\nHello");
    }

    #[test]
    fn test_split_with_bom() {
        let text = "\u{FEFF}---\ntitle: Foo\n---\nHello";

        assert_eq!(split_front_matter(text).0, Some("title: Foo\n"));
    }

    #[test]
    fn test_split_crlf() {
        let text = "---\r\ntitle: Foo\r\n---\r\nHello";
        let (block, body) = split_front_matter(text);

        assert_eq!(block.map(str::trim), Some("title: Foo"));
        assert_eq!(body.trim(), "Hello");
    }

    #[test]
    fn test_split_empty_block() {
        let text = "---\n---\nHello";

        assert_eq!(split_front_matter(text), (Some(""), "\nHello"));
    }

    #[test]
    fn test_split_requires_fence_at_start() {
        let text = "Intro\n---\ntitle: Foo\n---\n";

        assert!(split_front_matter(text).0.is_none());
    }

    #[test]
    fn test_split_unclosed_fence() {
        let text = "---\ntitle: Foo\nHello";

        assert_eq!(split_front_matter(text), (None, text));
    }

    #[test]
    fn test_split_dashes_inside_line_do_not_close() {
        let text = "---\ntitle: a---b\n---\nBody";
        let (block, body) = split_front_matter(text);

        assert_eq!(block, Some("title: a---b\n"));
        assert_eq!(body, "\nBody");
    }

    #[test]
    fn test_strip_front_matter_trims_body() {
        let text = "---\ntitle: Foo\n---\n\n  Hello %name%  \n\n";

        assert_eq!(strip_front_matter(text), "Hello %name%");
    }

    #[test]
    fn test_strip_without_front_matter_trims() {
        assert_eq!(strip_front_matter("\n\n# Title\n"), "# Title");
    }

    #[test]
    fn test_extract_reserved_fields() {
        let text = "---\ntitle: Setting Up\nnext-page: ../lab/one\nexit_sign: true\nexit-link: /end\n---\nBody";
        let meta = extract_metadata(text).unwrap();

        assert_eq!(meta.title(), Some("Setting Up"));
        assert_eq!(meta.next_page(), Some("../lab/one"));
        assert_eq!(meta.exit_sign(), Some(true));
        assert_eq!(meta.exit_link(), Some("/end"));
    }

    #[test]
    fn test_extract_without_block_is_empty() {
        let meta = extract_metadata("# Just a body").unwrap();

        assert!(meta.is_empty());
    }

    #[test]
    fn test_extract_coerces_values() {
        let text = "---\ncount: 3\nratio: 1.5\ndraft: false\nowner:\ntags:\n  - a\n  - b\n---\n";
        let meta = extract_metadata(text).unwrap();

        assert_eq!(meta.get("count"), Some("3"));
        assert_eq!(meta.get("ratio"), Some("1.5"));
        assert_eq!(meta.get("draft"), Some("false"));
        assert_eq!(meta.get("owner"), Some(""));
        assert_eq!(meta.get("tags"), Some("a,b"));
    }

    #[test]
    fn test_extract_nested_mapping_as_yaml() {
        let text = "---\nauthor:\n  name: Ana\n---\n";
        let meta = extract_metadata(text).unwrap();

        assert_eq!(meta.get("author"), Some("name: Ana"));
    }

    #[test]
    fn test_extract_trims_values() {
        let text = "---\ntitle: \"  Padded  \"\n---\n";
        let meta = extract_metadata(text).unwrap();

        assert_eq!(meta.title(), Some("Padded"));
    }

    #[test]
    fn test_extract_normalizes_keys() {
        let text = "---\nNext Page: two\nlab/owner: Ana\n---\n";
        let meta = extract_metadata(text).unwrap();

        let keys: Vec<_> = meta.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["lab_owner", "next_page"]);
    }

    #[test]
    fn test_extract_dash_style() {
        let text = "---\nnext_page: two\n---\n";
        let meta = extract_metadata_with_style(text, FieldStyle::Dash).unwrap();

        assert_eq!(meta.iter().collect::<Vec<_>>(), vec![("next-page", "two")]);
    }

    #[test]
    fn test_extract_scalar_document_is_empty() {
        let meta = extract_metadata("---\njust text\n---\nBody").unwrap();

        assert!(meta.is_empty());
    }

    #[test]
    fn test_extract_malformed_yaml_is_error() {
        let result = extract_metadata("---\ntitle: [unclosed\n---\nBody");

        assert!(matches!(result, Err(MetadataError::Parse(_))));
        assert!(
            result
                .unwrap_err()
                .to_string()
                .starts_with("Invalid YAML in front matter")
        );
    }
}
