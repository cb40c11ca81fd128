//! Normalized front matter fields.

use std::collections::BTreeMap;

use crate::case::{dasherized, underscored};

/// Word-joining style for normalized field names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldStyle {
    /// `next_page`, `exit_sign`.
    #[default]
    Underscore,
    /// `next-page`, `exit-sign`.
    Dash,
}

/// Normalize a raw field name.
///
/// `/` is treated as a word separator, surrounding whitespace is trimmed and
/// the words are joined in the requested style. Camel-case humps start new
/// words, so `nextPage`, `Next Page`, `next-page` and `next_page` all
/// normalize to the same key.
pub fn normalize_field_name(name: &str, style: FieldStyle) -> String {
    let spaced = name.replace('/', " ");
    match style {
        FieldStyle::Underscore => underscored(spaced.trim()),
        FieldStyle::Dash => dasherized(spaced.trim()),
    }
}

/// Front matter fields of a single page.
///
/// Keys are normalized with the [`FieldStyle`] the metadata was extracted
/// with; lookups through [`get`](Self::get) normalize the query the same way.
/// Values are trimmed strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Metadata {
    style: FieldStyle,
    fields: BTreeMap<String, String>,
}

impl Metadata {
    /// Create empty metadata using the given key style.
    #[must_use]
    pub fn new(style: FieldStyle) -> Self {
        Self {
            style,
            fields: BTreeMap::new(),
        }
    }

    /// Insert a field, normalizing the name and trimming the value.
    ///
    /// A later field that normalizes to an existing key replaces it.
    pub fn insert(&mut self, name: &str, value: &str) {
        let key = normalize_field_name(name, self.style);
        self.fields.insert(key, value.trim().to_owned());
    }

    /// Look up a field by any spelling of its name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .get(&normalize_field_name(name, self.style))
            .map(String::as_str)
    }

    /// Look up a field, treating empty values as absent.
    fn get_non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    /// Explicit page title.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.get_non_empty("title")
    }

    /// Path of the following page, relative to this page's directory.
    #[must_use]
    pub fn next_page(&self) -> Option<&str> {
        self.get_non_empty("next_page")
    }

    /// Whether the page shows an exit sign.
    ///
    /// `false`, `no`, `off`, `0` and empty values are off; any other value is on.
    #[must_use]
    pub fn exit_sign(&self) -> Option<bool> {
        let value = self.get("exit_sign")?;
        let off = value.is_empty()
            || ["false", "no", "off", "0"]
                .iter()
                .any(|falsy| value.eq_ignore_ascii_case(falsy));
        Some(!off)
    }

    /// Target of the exit sign.
    #[must_use]
    pub fn exit_link(&self) -> Option<&str> {
        self.get_non_empty("exit_link")
    }

    /// Iterate over `(normalized name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if no fields were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
