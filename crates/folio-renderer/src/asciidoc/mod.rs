//! AsciiDoc to HTML conversion.
//!
//! Converts the commonly used subset of AsciiDoc to embeddable HTML using
//! Asciidoctor's class names: sections, paragraphs, lists, admonitions,
//! delimited blocks, block images and inline formatting.
//!
//! The converter always runs in server-safe mode. It never touches the
//! filesystem or the environment: `include::` directives are replaced by a
//! link to their target, and only attributes defined by the document itself
//! (plus a handful of built-in character attributes) are resolved.

mod inline;

use std::collections::HashMap;
use std::fmt::Write;

use crate::converter::MarkupConverter;
use crate::util::escape_html;

/// AsciiDoc converter.
///
/// The document title (`= Title` on the first line) is not rendered unless
/// the document sets the `showtitle` attribute, matching embedded output.
#[derive(Clone, Copy, Debug, Default)]
pub struct AsciiDocConverter;

impl AsciiDocConverter {
    /// Create a new converter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl MarkupConverter for AsciiDocConverter {
    fn convert(&self, source: &str) -> String {
        let lines: Vec<&str> = source.lines().collect();
        let mut state = DocumentState::default();
        let mut output = String::with_capacity(source.len() * 2);
        render_blocks(&lines, &mut state, &mut output);
        output
    }
}

/// Document-wide state carried across blocks.
#[derive(Default)]
struct DocumentState {
    attributes: HashMap<String, String>,
    /// Whether any block has been seen (the title is only recognized first).
    started: bool,
    example_count: usize,
}

/// Block attribute line (`[source,rust]`) and block title (`.Title`) waiting
/// for the next block.
#[derive(Default)]
struct PendingMeta {
    attrs: Option<String>,
    title: Option<String>,
}

impl PendingMeta {
    /// First positional attribute (the block style), if any.
    fn style(&self) -> Option<&str> {
        let attrs = self.attrs.as_deref()?;
        let style = attrs.split(',').next()?.trim();
        (!style.is_empty()).then_some(style)
    }

    /// Positional attribute at `index` (0 is the style).
    fn positional(&self, index: usize) -> Option<&str> {
        let attrs = self.attrs.as_deref()?;
        let value = attrs.split(',').nth(index)?.trim();
        (!value.is_empty()).then_some(value)
    }

    fn render_title(&self, state: &DocumentState, output: &mut String) {
        if let Some(title) = &self.title {
            let _ = writeln!(
                output,
                "<div class=\"title\">{}</div>",
                inline::substitute(title, &state.attributes)
            );
        }
    }
}

/// Delimited block kinds, keyed by their fence character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delimiter {
    Listing,
    Literal,
    Example,
    Quote,
    Sidebar,
    Passthrough,
    Open,
}

impl Delimiter {
    fn parse(line: &str) -> Option<Self> {
        if line == "--" {
            return Some(Self::Open);
        }
        let first = line.chars().next()?;
        if line.len() < 4 || !line.chars().all(|c| c == first) {
            return None;
        }
        Some(match first {
            '-' => Self::Listing,
            '.' => Self::Literal,
            '=' => Self::Example,
            '_' => Self::Quote,
            '*' => Self::Sidebar,
            '+' => Self::Passthrough,
            _ => return None,
        })
    }
}

/// Admonition labels recognized as `LABEL: text` or `[LABEL]`.
const ADMONITIONS: [&str; 5] = ["NOTE", "TIP", "IMPORTANT", "WARNING", "CAUTION"];

fn is_admonition(label: &str) -> bool {
    ADMONITIONS.contains(&label)
}

/// Parse `:name: value` or `:name!:` into `(name, Some(value) | None)`.
fn parse_attribute_entry(line: &str) -> Option<(&str, Option<&str>)> {
    let rest = line.strip_prefix(':')?;
    let (name, value) = rest.split_once(':')?;
    if let Some(name) = name.strip_suffix('!') {
        return is_attribute_name(name).then_some((name, None));
    }
    if !is_attribute_name(name) || !(value.is_empty() || value.starts_with(' ')) {
        return None;
    }
    Some((name, Some(value.trim())))
}

fn is_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// Parse `== Title` into `(level, title)`; level 0 is the document title.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '=').count();
    if level == 0 || level > 6 {
        return None;
    }
    let title = line[level..].strip_prefix(' ')?.trim();
    (!title.is_empty()).then_some((level - 1, title))
}

/// List item kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListKind {
    Unordered,
    Ordered,
}

/// A single list item: kind, nesting depth (marker length) and text.
struct ListItem {
    kind: ListKind,
    depth: usize,
    text: String,
}

fn parse_list_item(line: &str) -> Option<ListItem> {
    let trimmed = line.trim_start();
    if let Some(text) = trimmed.strip_prefix("- ") {
        return Some(ListItem {
            kind: ListKind::Unordered,
            depth: 1,
            text: text.trim().to_owned(),
        });
    }
    let marker = trimmed.chars().next()?;
    let kind = match marker {
        '*' => ListKind::Unordered,
        '.' => ListKind::Ordered,
        _ => return None,
    };
    let depth = trimmed.chars().take_while(|&c| c == marker).count();
    let text = trimmed[depth..].strip_prefix(' ')?.trim();
    if depth > 5 || text.is_empty() {
        return None;
    }
    Some(ListItem {
        kind,
        depth,
        text: text.to_owned(),
    })
}

/// Parse `term:: definition` into `(term, definition)`.
fn parse_dlist_item(line: &str) -> Option<(&str, &str)> {
    let (term, definition) = line.split_once("::")?;
    let term = term.trim();
    if term.is_empty()
        || term.contains("://")
        || !(definition.is_empty() || definition.starts_with(' '))
    {
        return None;
    }
    Some((term, definition.trim()))
}

/// Parse a block macro `name::target[attrs]` into `(target, attrs)`.
fn parse_block_macro<'a>(line: &'a str, name: &str) -> Option<(&'a str, &'a str)> {
    let rest = line.strip_prefix(name)?.strip_prefix("::")?;
    let (target, attrs) = rest.split_once('[')?;
    let attrs = attrs.strip_suffix(']')?;
    (!target.is_empty()).then_some((target, attrs))
}

/// Asciidoctor-style automatic section id: `_` + lowercase words joined by `_`.
fn section_id(title: &str) -> String {
    let mut id = String::from("_");
    let mut pending_sep = false;
    for c in title.chars() {
        if c.is_alphanumeric() {
            if pending_sep && id.len() > 1 {
                id.push('_');
            }
            pending_sep = false;
            id.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    id
}

/// Whether `line` starts a new block and so ends a running paragraph.
fn interrupts_paragraph(line: &str) -> bool {
    Delimiter::parse(line).is_some() || (line.starts_with('[') && line.ends_with(']'))
}

/// Find the closing fence for a delimited block opened at `start`.
fn find_closing_fence(lines: &[&str], start: usize, fence: &str) -> usize {
    lines[start + 1..]
        .iter()
        .position(|line| line.trim_end() == fence)
        .map_or(lines.len(), |offset| start + 1 + offset)
}

#[allow(clippy::too_many_lines)]
fn render_blocks(lines: &[&str], state: &mut DocumentState, output: &mut String) {
    let mut pending = PendingMeta::default();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i].trim_end();

        if line.is_empty() {
            i += 1;
            continue;
        }

        // Comment block
        if line == "////" {
            i = find_closing_fence(lines, i, "////") + 1;
            continue;
        }

        // Line comment
        if line.starts_with("//") && !line.starts_with("///") {
            i += 1;
            continue;
        }

        if let Some((name, value)) = parse_attribute_entry(line) {
            match value {
                Some(value) => {
                    let value = inline::substitute_attributes(value, &state.attributes);
                    state.attributes.insert(name.to_owned(), value);
                }
                None => {
                    state.attributes.remove(name);
                }
            }
            i += 1;
            continue;
        }

        // Block anchors are not rendered
        if line.starts_with("[[") && line.ends_with("]]") {
            i += 1;
            continue;
        }

        if line.len() > 2 && line.starts_with('[') && line.ends_with(']') {
            pending.attrs = Some(line[1..line.len() - 1].to_owned());
            i += 1;
            continue;
        }

        if line.len() > 1
            && line.starts_with('.')
            && !line.starts_with("..")
            && !line[1..].starts_with(char::is_whitespace)
        {
            pending.title = Some(line[1..].to_owned());
            i += 1;
            continue;
        }

        let first_block = !state.started;
        state.started = true;

        if let Some(delimiter) = Delimiter::parse(line) {
            let end = find_closing_fence(lines, i, line);
            let inner = &lines[i + 1..end];
            render_delimited(delimiter, inner, &pending, state, output);
            pending = PendingMeta::default();
            i = end + 1;
            continue;
        }

        if let Some((level, title)) = parse_heading(line) {
            let html_title = inline::substitute(title, &state.attributes);
            if level == 0 && first_block {
                state
                    .attributes
                    .insert("doctitle".to_owned(), title.to_owned());
                if state.attributes.contains_key("showtitle") {
                    let _ = writeln!(output, "<h1>{html_title}</h1>");
                }
            } else {
                let _ = writeln!(
                    output,
                    "<h{n} id=\"{id}\">{html_title}</h{n}>",
                    n = level + 1,
                    id = section_id(title)
                );
            }
            pending = PendingMeta::default();
            i += 1;
            continue;
        }

        if let Some((target, _)) = parse_block_macro(line, "include") {
            tracing::debug!(include = %target, "Replacing include directive with link");
            let target = escape_html(target);
            let _ = writeln!(
                output,
                "<div class=\"paragraph\">\n<p><a href=\"{target}\" class=\"bare\">{target}</a></p>\n</div>"
            );
            pending = PendingMeta::default();
            i += 1;
            continue;
        }

        if let Some((target, attrs)) = parse_block_macro(line, "image") {
            let alt = attrs.split(',').next().map(str::trim).unwrap_or_default();
            let alt = if alt.is_empty() {
                inline::image_alt(target)
            } else {
                alt.to_owned()
            };
            output.push_str("<div class=\"imageblock\">\n<div class=\"content\">\n");
            let _ = writeln!(
                output,
                "<img src=\"{}\" alt=\"{}\">",
                escape_html(target),
                escape_html(&alt)
            );
            output.push_str("</div>\n");
            pending.render_title(state, output);
            output.push_str("</div>\n");
            pending = PendingMeta::default();
            i += 1;
            continue;
        }

        if line == "'''" {
            output.push_str("<hr>\n");
            i += 1;
            continue;
        }

        if line == "<<<" {
            output.push_str("<div style=\"page-break-after: always;\"></div>\n");
            i += 1;
            continue;
        }

        if parse_list_item(line).is_some() {
            let mut items: Vec<ListItem> = Vec::new();
            while i < lines.len() {
                let current = lines[i].trim_end();
                if current.is_empty() || interrupts_paragraph(current) {
                    break;
                }
                if let Some(item) = parse_list_item(current) {
                    items.push(item);
                } else if let Some(last) = items.last_mut() {
                    last.text.push('\n');
                    last.text.push_str(current.trim());
                }
                i += 1;
            }
            render_list(&items, &pending, state, output);
            pending = PendingMeta::default();
            continue;
        }

        if parse_dlist_item(line).is_some() {
            output.push_str("<div class=\"dlist\">\n");
            pending.render_title(state, output);
            output.push_str("<dl>\n");
            while i < lines.len() {
                let current = lines[i].trim_end();
                let Some((term, definition)) = parse_dlist_item(current) else {
                    break;
                };
                let _ = writeln!(
                    output,
                    "<dt class=\"hdlist1\">{}</dt>",
                    inline::substitute(term, &state.attributes)
                );
                if !definition.is_empty() {
                    let _ = writeln!(
                        output,
                        "<dd>\n<p>{}</p>\n</dd>",
                        inline::substitute(definition, &state.attributes)
                    );
                }
                i += 1;
            }
            output.push_str("</dl>\n</div>\n");
            pending = PendingMeta::default();
            continue;
        }

        // Paragraph: runs until a blank line or the start of a delimited block
        let start = i;
        while i < lines.len() {
            let current = lines[i].trim_end();
            if current.is_empty() || (i > start && interrupts_paragraph(current)) {
                break;
            }
            i += 1;
        }
        render_paragraph(&lines[start..i], &pending, state, output);
        pending = PendingMeta::default();
    }
}

fn render_paragraph(
    lines: &[&str],
    pending: &PendingMeta,
    state: &DocumentState,
    output: &mut String,
) {
    // Indented first line makes a literal paragraph
    if lines
        .first()
        .is_some_and(|line| line.starts_with([' ', '\t']))
    {
        let indent = lines
            .iter()
            .map(|line| line.len() - line.trim_start().len())
            .min()
            .unwrap_or(0);
        let text: Vec<&str> = lines
            .iter()
            .map(|line| line.get(indent..).unwrap_or_default().trim_end())
            .collect();
        output.push_str("<div class=\"literalblock\">\n");
        pending.render_title(state, output);
        let _ = writeln!(
            output,
            "<div class=\"content\">\n<pre>{}</pre>\n</div>\n</div>",
            escape_html(&text.join("\n"))
        );
        return;
    }

    let text = lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    let labeled = text
        .split_once(": ")
        .filter(|(label, _)| is_admonition(label));
    let styled = pending.style().filter(|style| is_admonition(style));

    if let Some((label, body)) = labeled.or_else(|| styled.map(|style| (style, text.as_str()))) {
        render_admonition_open(label, pending, state, output);
        output.push_str(&inline::substitute(body, &state.attributes));
        output.push_str("\n</td>\n</tr>\n</table>\n</div>\n");
        return;
    }

    output.push_str("<div class=\"paragraph\">\n");
    pending.render_title(state, output);
    let _ = writeln!(
        output,
        "<p>{}</p>\n</div>",
        inline::substitute(&text, &state.attributes)
    );
}

fn render_admonition_open(
    label: &str,
    pending: &PendingMeta,
    state: &DocumentState,
    output: &mut String,
) {
    let mut caption = label.to_lowercase();
    if let Some(first) = caption.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    let _ = write!(
        output,
        "<div class=\"admonitionblock {}\">\n<table>\n<tr>\n<td class=\"icon\">\n<div class=\"title\">{caption}</div>\n</td>\n<td class=\"content\">\n",
        label.to_lowercase()
    );
    pending.render_title(state, output);
}

fn render_delimited(
    delimiter: Delimiter,
    inner: &[&str],
    pending: &PendingMeta,
    state: &mut DocumentState,
    output: &mut String,
) {
    match delimiter {
        Delimiter::Listing => {
            let code = escape_html(&inner.join("\n"));
            output.push_str("<div class=\"listingblock\">\n");
            pending.render_title(state, output);
            output.push_str("<div class=\"content\">\n");
            match pending.style() {
                Some("source") => {
                    let lang = pending.positional(1).map(escape_html);
                    match lang {
                        Some(lang) => {
                            let _ = writeln!(
                                output,
                                "<pre class=\"highlight\"><code class=\"language-{lang}\" data-lang=\"{lang}\">{code}</code></pre>"
                            );
                        }
                        None => {
                            let _ = writeln!(
                                output,
                                "<pre class=\"highlight\"><code>{code}</code></pre>"
                            );
                        }
                    }
                }
                _ => {
                    let _ = writeln!(output, "<pre>{code}</pre>");
                }
            }
            output.push_str("</div>\n</div>\n");
        }
        Delimiter::Literal => {
            output.push_str("<div class=\"literalblock\">\n");
            pending.render_title(state, output);
            let _ = writeln!(
                output,
                "<div class=\"content\">\n<pre>{}</pre>\n</div>\n</div>",
                escape_html(&inner.join("\n"))
            );
        }
        Delimiter::Passthrough => {
            output.push_str(&inner.join("\n"));
            output.push('\n');
        }
        Delimiter::Example => {
            if let Some(label) = pending.style().filter(|style| is_admonition(style)) {
                render_admonition_open(label, pending, state, output);
                render_blocks(inner, state, output);
                output.push_str("</td>\n</tr>\n</table>\n</div>\n");
                return;
            }
            output.push_str("<div class=\"exampleblock\">\n");
            if let Some(title) = &pending.title {
                state.example_count += 1;
                let _ = writeln!(
                    output,
                    "<div class=\"title\">Example {}. {}</div>",
                    state.example_count,
                    inline::substitute(title, &state.attributes)
                );
            }
            output.push_str("<div class=\"content\">\n");
            render_blocks(inner, state, output);
            output.push_str("</div>\n</div>\n");
        }
        Delimiter::Quote => {
            output.push_str("<div class=\"quoteblock\">\n");
            pending.render_title(state, output);
            output.push_str("<blockquote>\n");
            render_blocks(inner, state, output);
            output.push_str("</blockquote>\n");
            if pending.style() == Some("quote")
                && let Some(author) = pending.positional(1)
            {
                let _ = writeln!(
                    output,
                    "<div class=\"attribution\">\n&#8212; {}\n</div>",
                    inline::substitute(author, &state.attributes)
                );
            }
            output.push_str("</div>\n");
        }
        Delimiter::Sidebar => {
            output.push_str("<div class=\"sidebarblock\">\n<div class=\"content\">\n");
            pending.render_title(state, output);
            render_blocks(inner, state, output);
            output.push_str("</div>\n</div>\n");
        }
        Delimiter::Open => {
            output.push_str("<div class=\"openblock\">\n");
            pending.render_title(state, output);
            output.push_str("<div class=\"content\">\n");
            render_blocks(inner, state, output);
            output.push_str("</div>\n</div>\n");
        }
    }
}

fn render_list(
    items: &[ListItem],
    pending: &PendingMeta,
    state: &DocumentState,
    output: &mut String,
) {
    let mut open: Vec<(ListKind, usize)> = Vec::new();

    for (index, item) in items.iter().enumerate() {
        while let Some(&(kind, depth)) = open.last() {
            if depth > item.depth || (depth == item.depth && kind != item.kind) {
                close_list(kind, output);
                open.pop();
            } else {
                break;
            }
        }

        match open.last() {
            Some(&(_, depth)) if depth == item.depth => output.push_str("</li>\n"),
            _ => {
                let (class, tag) = list_tags(item.kind);
                let _ = writeln!(output, "<div class=\"{class}\">");
                if index == 0 {
                    pending.render_title(state, output);
                }
                let _ = writeln!(output, "<{tag}>");
                open.push((item.kind, item.depth));
            }
        }

        let _ = write!(
            output,
            "<li>\n<p>{}</p>\n",
            inline::substitute(&item.text, &state.attributes)
        );
    }

    while let Some((kind, _)) = open.pop() {
        close_list(kind, output);
    }
}

fn list_tags(kind: ListKind) -> (&'static str, &'static str) {
    match kind {
        ListKind::Unordered => ("ulist", "ul"),
        ListKind::Ordered => ("olist", "ol"),
    }
}

fn close_list(kind: ListKind, output: &mut String) {
    let (_, tag) = list_tags(kind);
    let _ = writeln!(output, "</li>\n</{tag}>\n</div>");
}
