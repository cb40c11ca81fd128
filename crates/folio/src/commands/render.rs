//! `folio render` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_renderer::{TemplateEngine, Variable};
use folio_site::PageIndex;

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Page path relative to the content directory, without extension.
    page: String,

    #[command(flatten)]
    site: SiteArgs,

    /// Variable to substitute, as `name=value` (repeatable).
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_variable)]
    vars: Vec<Variable>,

    /// Substitution strategy: `naive` or `template` (overrides config).
    #[arg(long)]
    template_engine: Option<TemplateEngine>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the page has no source,
    /// or rendering fails.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let (_, site) = self.site.open(self.template_engine)?;
        tracing::debug!(page = %self.page, engine = %site.template_engine(), vars = self.vars.len(), "Rendering");

        let rendered = site
            .render(&self.page, &self.vars)?
            .ok_or_else(|| CliError::PageNotFound(self.page.clone()))?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered.html)?;
                output.success(&format!(
                    "Rendered {} ({}) to {}",
                    self.page,
                    rendered.format,
                    path.display()
                ));
            }
            None => output.print(rendered.html.trim_end()),
        }

        match site.index() {
            Ok((_, index)) => {
                if let Some(warning) = sequence_warning(&index, &self.page) {
                    output.warning(&warning);
                }
            }
            Err(err) => tracing::debug!(%err, "Page sequence unavailable"),
        }

        Ok(())
    }
}

/// Warning for a rendered page that the page sequence never reaches.
fn sequence_warning(index: &PageIndex, page: &str) -> Option<String> {
    match index.get(page) {
        Some(found) => {
            tracing::debug!(
                page,
                prev = ?found.prev_page,
                next = ?found.next_page,
                "Page position"
            );
            None
        }
        None if index.is_empty() => None,
        None => Some(format!("{page} is not part of the page sequence")),
    }
}

/// Parse a `name=value` pair. The value may itself contain `=`.
fn parse_variable(s: &str) -> Result<Variable, String> {
    let (name, content) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;
    if name.is_empty() {
        return Err(format!("variable name cannot be empty in '{s}'"));
    }
    Ok(Variable::new(name, content))
}

#[cfg(test)]
mod tests {
    use folio_site::{Page, build_index};
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(path: &str, next_page: Option<&str>) -> Page {
        Page {
            path: path.to_owned(),
            title: path.to_owned(),
            prev_page: None,
            next_page: next_page.map(ToOwned::to_owned),
            exit_sign: None,
            exit_link: None,
        }
    }

    #[test]
    fn test_sequence_warning_for_unlinked_page() {
        let index = build_index(&[page("index", Some("setup")), page("setup", None)]);

        assert_eq!(sequence_warning(&index, "setup"), None);
        assert_eq!(
            sequence_warning(&index, "appendix").as_deref(),
            Some("appendix is not part of the page sequence")
        );
    }

    #[test]
    fn test_sequence_warning_without_sequence() {
        assert_eq!(sequence_warning(&build_index(&[]), "appendix"), None);
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(
            parse_variable("user=ana").unwrap(),
            Variable::new("user", "ana")
        );
    }

    #[test]
    fn test_parse_variable_value_with_equals() {
        assert_eq!(
            parse_variable("query=a=b").unwrap(),
            Variable::new("query", "a=b")
        );
    }

    #[test]
    fn test_parse_variable_empty_value() {
        assert_eq!(
            parse_variable("blank=").unwrap(),
            Variable::new("blank", "")
        );
    }

    #[test]
    fn test_parse_variable_errors() {
        assert_eq!(
            parse_variable("novalue").unwrap_err(),
            "expected NAME=VALUE, got 'novalue'"
        );
        assert!(parse_variable("=x").is_err());
    }
}
