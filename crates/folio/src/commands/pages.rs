//! `folio pages` command implementation.

use clap::Args;
use folio_site::{Page, Resolution};

use super::SiteArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the pages command.
#[derive(Args)]
pub(crate) struct PagesArgs {
    #[command(flatten)]
    site: SiteArgs,

    /// Print the sequence as JSON.
    #[arg(long)]
    json: bool,
}

impl PagesArgs {
    /// Execute the pages command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a page cannot be read.
    pub(crate) fn execute(self, output: &Output) -> Result<(), CliError> {
        let json = self.json;
        let (config, site) = self.site.open(None)?;
        let (pages, outcome) = site.resolve_with_outcome()?;

        if json {
            output.print(&serde_json::to_string_pretty(&pages)?);
        } else {
            for (i, page) in pages.iter().enumerate() {
                output.print(&format_page(i + 1, page, output));
            }
        }

        match outcome {
            Resolution::Empty => output.warning(&format!(
                "No pages found: '{}' has no Markdown source in {}",
                config.content_resolved.default_page,
                config.content_resolved.content_dir.display()
            )),
            Resolution::Cycle { from, target } => {
                output.warning(&format!("Stopped at cycle: {from} -> {target}"));
            }
            Resolution::MissingTarget { from, target } => {
                output.warning(&format!("Stopped at missing page: {from} -> {target}"));
            }
            Resolution::Manifest | Resolution::Ended => {
                output.info(&format!("{} page(s)", pages.len()));
            }
        }

        Ok(())
    }
}

/// Format one line of the text listing.
fn format_page(position: usize, page: &Page, output: &Output) -> String {
    let mut line = format!("{position:>3}. {}  {}", page.path, page.title);
    if let Some(prev) = &page.prev_page {
        line.push_str(&output.dimmed(&format!("  prev={prev}")));
    }
    if let Some(next) = &page.next_page {
        line.push_str(&output.dimmed(&format!("  next={next}")));
    }
    if page.exit_sign == Some(true) {
        let target = page.exit_link.as_deref().unwrap_or("-");
        line.push_str(&output.dimmed(&format!("  exit={target}")));
    }
    line
}
