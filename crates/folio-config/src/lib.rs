//! Configuration management for Folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.content_dir`
//! - `content.default_page`
//! - `pages[].exit_link`

mod expand;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use folio_renderer::TemplateEngine;
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content directory.
    pub content_dir: Option<PathBuf>,
    /// Override default page.
    pub default_page: Option<String>,
    /// Override template engine.
    pub template_engine: Option<TemplateEngine>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content configuration (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Ordered page manifest. Empty means pages are discovered.
    pub pages: Vec<PageEntry>,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    content_dir: Option<String>,
    default_page: Option<String>,
    template_engine: Option<TemplateEngine>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Root directory of page sources.
    pub content_dir: PathBuf,
    /// Page where discovery starts.
    pub default_page: String,
    /// Variable substitution strategy.
    pub template_engine: TemplateEngine,
}

/// Page entry in the `[[pages]]` manifest.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PageEntry {
    /// Page path relative to the content directory, without extension.
    pub path: String,
    /// Explicit title.
    #[serde(default)]
    pub title: Option<String>,
    /// Whether the page shows an exit control.
    #[serde(default)]
    pub exit_sign: Option<bool>,
    /// Exit control target.
    #[serde(default)]
    pub exit_link: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.content_dir`").
        field: String,
        /// Error message (e.g., "${`CONTENT_ROOT`} not set").
        message: String,
    },
}

const DEFAULT_CONTENT_DIR: &str = "content";
const DEFAULT_PAGE: &str = "index";

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(content_dir) = &settings.content_dir {
            self.content_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(default_page) = &settings.default_page {
            self.content_resolved.default_page.clone_from(default_page);
        }
        if let Some(template_engine) = settings.template_engine {
            self.content_resolved.template_engine = template_engine;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            content: ContentConfigRaw::default(),
            pages: Vec::new(),
            content_resolved: ContentConfig {
                content_dir: base.join(DEFAULT_CONTENT_DIR),
                default_page: DEFAULT_PAGE.to_owned(),
                template_engine: TemplateEngine::default(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_content()?;
        self.validate_pages()?;
        Ok(())
    }

    fn validate_content(&self) -> Result<(), ConfigError> {
        let default_page = &self.content_resolved.default_page;
        if default_page.trim().is_empty() {
            return Err(ConfigError::Validation(
                "content.default_page cannot be empty".to_owned(),
            ));
        }
        if default_page.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "content.default_page must be relative to the content directory, got '{default_page}'"
            )));
        }
        Ok(())
    }

    fn validate_pages(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for (i, page) in self.pages.iter().enumerate() {
            if page.path.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "pages[{i}].path cannot be empty"
                )));
            }
            if !seen.insert(page.path.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "pages[{i}].path '{}' is listed more than once",
                    page.path
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.content_dir {
            self.content.content_dir = Some(expand::expand_env(dir, "content.content_dir")?);
        }
        if let Some(ref page) = self.content.default_page {
            self.content.default_page = Some(expand::expand_env(page, "content.default_page")?);
        }
        for (i, page) in self.pages.iter_mut().enumerate() {
            if let Some(ref link) = page.exit_link {
                page.exit_link = Some(expand::expand_env(link, &format!("pages[{i}].exit_link"))?);
            }
        }
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.content_resolved = ContentConfig {
            content_dir: config_dir.join(
                self.content
                    .content_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_CONTENT_DIR),
            ),
            default_page: self
                .content
                .default_page
                .clone()
                .unwrap_or_else(|| DEFAULT_PAGE.to_owned()),
            template_engine: self.content.template_engine.unwrap_or_default(),
        };
    }
}
