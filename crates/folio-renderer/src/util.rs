//! Shared utility functions for HTML output.

/// Escape text for use in HTML element content or quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape only `&`, `<` and `>`.
///
/// Used for inline text that later goes through quote substitution, where
/// numeric entities would introduce stray `#` markers.
pub(crate) fn escape_special(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape quotes in text already passed through [`escape_special`].
///
/// Makes the text safe inside a double-quoted HTML attribute without
/// escaping `&` a second time.
pub(crate) fn escape_attribute(s: &str) -> String {
    s.replace('"', "&quot;").replace('\'', "&#x27;")
}
