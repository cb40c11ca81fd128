//! Word-case conversions for field names and page titles.

use std::sync::LazyLock;

use regex::Regex;

/// Lowercase/digit followed by an uppercase run (`camelCase`, `page2Title`).
static CAMEL_BOUNDARY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z\d])([A-Z]+)").unwrap());

static DASH_OR_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

static UPPERCASE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([A-Z])").unwrap());

static SEPARATOR_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-_\s]+").unwrap());

/// Convert to `snake_case`: split camel-case humps, join words with `_`, lowercase.
///
/// Existing underscores are kept.
pub(crate) fn underscored(value: &str) -> String {
    let split = CAMEL_BOUNDARY_RE.replace_all(value.trim(), "${1}_${2}");
    DASH_OR_SPACE_RE.replace_all(&split, "_").to_lowercase()
}

/// Convert to `kebab-case`: every uppercase letter starts a new word.
///
/// Leading and trailing dashes are removed.
pub(crate) fn dasherized(value: &str) -> String {
    let split = UPPERCASE_RE.replace_all(value.trim(), "-${1}");
    SEPARATOR_RUN_RE
        .replace_all(&split, "-")
        .to_lowercase()
        .trim_matches('-')
        .to_owned()
}

/// Turn an identifier into lowercase words separated by single spaces.
///
/// A trailing `_id` is dropped (`owner_id` reads as "owner").
fn humanized_words(value: &str) -> String {
    let snake = underscored(value);
    let snake = snake.strip_suffix("_id").unwrap_or(&snake);
    snake
        .split('_')
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Capitalize the first character of every word, appending to `buf`.
///
/// Words are delimited by spaces; the rest of each word is left as-is.
fn titleize_into(words: &str, buf: &mut String) {
    for (i, word) in words.split(' ').enumerate() {
        if i > 0 {
            buf.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            buf.extend(first.to_uppercase());
            buf.push_str(chars.as_str());
        }
    }
}

/// Derive a display title from a page path.
///
/// Only the final path segment is used. Separators (`-`, `_`, whitespace) and
/// camel-case humps become word breaks and each word is capitalized.
///
/// # Examples
///
/// ```
/// use folio_meta::title_from_path;
///
/// assert_eq!(title_from_path("workshop/getting-started"), "Getting Started");
/// assert_eq!(title_from_path("apiReference"), "Api Reference");
/// ```
pub fn title_from_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    let segment = trimmed.rsplit_once('/').map_or(trimmed, |(_, last)| last);
    let words = humanized_words(segment);
    let mut title = String::with_capacity(words.len());
    titleize_into(&words, &mut title);
    title
}
