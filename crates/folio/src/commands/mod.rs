//! CLI command implementations.

pub(crate) mod pages;
pub(crate) mod render;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folio_config::{CliSettings, Config, PageEntry};
use folio_renderer::TemplateEngine;
use folio_site::{ManifestEntry, Site, SiteConfig};
use folio_storage::FsContentStore;

use crate::error::CliError;

pub(crate) use pages::PagesArgs;
pub(crate) use render::RenderArgs;

/// Arguments shared by commands that open a site.
#[derive(Args)]
pub(crate) struct SiteArgs {
    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Content directory (overrides config).
    #[arg(long)]
    content_dir: Option<PathBuf>,

    /// Page where discovery starts (overrides config).
    #[arg(long)]
    default_page: Option<String>,
}

impl SiteArgs {
    /// Load configuration and open the site it describes.
    pub(crate) fn open(
        self,
        template_engine: Option<TemplateEngine>,
    ) -> Result<(Config, Site), CliError> {
        let cli_settings = CliSettings {
            content_dir: self.content_dir,
            default_page: self.default_page,
            template_engine,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let store = Arc::new(FsContentStore::new(
            config.content_resolved.content_dir.clone(),
        ));
        let site = Site::new(store, &site_config(&config));

        Ok((config, site))
    }
}

/// Map loaded configuration onto site configuration.
fn site_config(config: &Config) -> SiteConfig {
    SiteConfig {
        default_page: config.content_resolved.default_page.clone(),
        pages: config.pages.iter().map(manifest_entry).collect(),
        template_engine: config.content_resolved.template_engine,
    }
}

fn manifest_entry(entry: &PageEntry) -> ManifestEntry {
    ManifestEntry {
        path: entry.path.clone(),
        title: entry.title.clone(),
        exit_sign: entry.exit_sign,
        exit_link: entry.exit_link.clone(),
    }
}
