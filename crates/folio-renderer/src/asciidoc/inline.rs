//! Inline substitutions for AsciiDoc text.
//!
//! Applied in order: special characters, quotes, attribute references,
//! replacements, macros.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::util::{escape_attribute, escape_special};

static ATTRIBUTE_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z0-9_][A-Za-z0-9_-]*)\}").unwrap());

static MACRO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?P<kind>link|image):(?P<target>[^\s\[\]]+)\[(?P<text>[^\]]*)\]",
        r#"|(?P<url>(?:https?|ftp|irc)://[^\s\[\]<>"]+)(?:\[(?P<utext>[^\]]*)\])?"#,
        r"|&lt;&lt;(?P<xref>[A-Za-z0-9_-]+)(?:,\s*(?P<xtext>.+?))?&gt;&gt;",
    ))
    .unwrap()
});

/// Quote markers, unconstrained (doubled) forms first.
const QUOTES: [(&str, bool, &str); 8] = [
    ("**", false, "strong"),
    ("__", false, "em"),
    ("``", false, "code"),
    ("##", false, "mark"),
    ("*", true, "strong"),
    ("_", true, "em"),
    ("`", true, "code"),
    ("#", true, "mark"),
];

/// Typographic replacements applied after escaping.
const REPLACEMENTS: [(&str, &str); 9] = [
    ("(C)", "&#169;"),
    ("(R)", "&#174;"),
    ("(TM)", "&#8482;"),
    (" -- ", "&#8201;&#8212;&#8201;"),
    ("...", "&#8230;&#8203;"),
    ("-&gt;", "&#8594;"),
    ("=&gt;", "&#8658;"),
    ("&lt;-", "&#8592;"),
    ("&lt;=", "&#8656;"),
];

/// Built-in attributes available in every document.
fn intrinsic_attribute(name: &str) -> Option<&'static str> {
    Some(match name {
        "empty" => "",
        "sp" => " ",
        "nbsp" => "&#160;",
        "zwsp" => "&#8203;",
        "amp" => "&amp;",
        "lt" => "&lt;",
        "gt" => "&gt;",
        "vbar" => "|",
        "startsb" => "[",
        "endsb" => "]",
        _ => return None,
    })
}

/// Run all inline substitutions over a run of text.
pub(super) fn substitute(text: &str, attributes: &HashMap<String, String>) -> String {
    let mut output = escape_special(text);
    for (marker, constrained, tag) in QUOTES {
        output = replace_pairs(&output, marker, constrained, tag);
    }
    output = substitute_attributes(&output, attributes);
    for (from, to) in REPLACEMENTS {
        output = output.replace(from, to);
    }
    substitute_macros(&output)
}

/// Replace attribute references. Unknown references are left as written.
pub(super) fn substitute_attributes(text: &str, attributes: &HashMap<String, String>) -> String {
    if !text.contains('{') {
        return text.to_owned();
    }
    ATTRIBUTE_REF_RE
        .replace_all(text, |caps: &Captures| {
            let name = &caps[1];
            if let Some(value) = attributes.get(name) {
                escape_special(value)
            } else if let Some(value) = intrinsic_attribute(name) {
                value.to_owned()
            } else {
                caps[0].to_owned()
            }
        })
        .into_owned()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Wrap text between matching `marker` pairs in `<tag>`.
///
/// Constrained markers only open after a non-word character and only close
/// before one, so `snake_case_name` keeps its underscores.
fn replace_pairs(text: &str, marker: &str, constrained: bool, tag: &str) -> String {
    if !text.contains(marker) {
        return text.to_owned();
    }

    let mut output = String::with_capacity(text.len() + 16);
    let mut rest = text;
    let mut prev: Option<char> = None;

    while let Some(start) = rest.find(marker) {
        let before = rest[..start].chars().next_back().or(prev);
        let inner_start = start + marker.len();
        let after_open = &rest[inner_start..];

        let opens = after_open
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace())
            && (!constrained || before.is_none_or(|c| !is_word_char(c)));

        if opens && let Some(end) = find_closing(after_open, marker, constrained) {
            output.push_str(&rest[..start]);
            output.push('<');
            output.push_str(tag);
            output.push('>');
            output.push_str(&after_open[..end]);
            output.push_str("</");
            output.push_str(tag);
            output.push('>');
            prev = marker.chars().next_back();
            rest = &after_open[end + marker.len()..];
            continue;
        }

        output.push_str(&rest[..inner_start]);
        prev = marker.chars().next_back();
        rest = after_open;
    }

    output.push_str(rest);
    output
}

/// Find the byte offset of the marker closing a quoted span.
fn find_closing(text: &str, marker: &str, constrained: bool) -> Option<usize> {
    let mut offset = 0;
    while let Some(pos) = text[offset..].find(marker) {
        let idx = offset + pos;
        let before = text[..idx].chars().next_back();
        let after = text[idx + marker.len()..].chars().next();
        let closes = before.is_some_and(|c| !c.is_whitespace())
            && (!constrained || after.is_none_or(|c| !is_word_char(c)));
        if closes {
            return Some(idx);
        }
        offset = idx + marker.len();
    }
    None
}

/// Split trailing sentence punctuation off a bare URL.
fn split_trailing_punctuation(url: &str) -> (&str, &str) {
    let trimmed = url.trim_end_matches(['.', ',', ';', ':', '!', '?', ')']);
    url.split_at(trimmed.len())
}

/// Replace link, image, URL and cross-reference macros.
fn substitute_macros(text: &str) -> String {
    MACRO_RE
        .replace_all(text, |caps: &Captures| {
            if let Some(kind) = caps.name("kind") {
                let target = &caps["target"];
                let label = &caps["text"];
                return match kind.as_str() {
                    "image" => {
                        let alt = if label.is_empty() {
                            image_alt(target)
                        } else {
                            label.to_owned()
                        };
                        format!(
                            r#"<span class="image"><img src="{}" alt="{}"></span>"#,
                            escape_attribute(target),
                            escape_attribute(&alt)
                        )
                    }
                    _ => anchor(target, label),
                };
            }
            if let Some(url) = caps.name("url") {
                if let Some(label) = caps.name("utext") {
                    return anchor(url.as_str(), label.as_str());
                }
                let (url, trailing) = split_trailing_punctuation(url.as_str());
                return format!("{}{trailing}", anchor(url, ""));
            }
            let id = &caps["xref"];
            let label = caps
                .name("xtext")
                .map_or_else(|| format!("[{id}]"), |m| m.as_str().to_owned());
            format!(r##"<a href="#{id}">{label}</a>"##)
        })
        .into_owned()
}

fn anchor(target: &str, label: &str) -> String {
    let href = escape_attribute(target);
    if label.is_empty() {
        format!(r#"<a href="{href}" class="bare">{target}</a>"#)
    } else {
        format!(r#"<a href="{href}">{label}</a>"#)
    }
}

/// Default alt text for an image: file stem with separators as spaces.
pub(super) fn image_alt(target: &str) -> String {
    let name = target.rsplit('/').next().unwrap_or(target);
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    stem.replace(['-', '_'], " ")
}
