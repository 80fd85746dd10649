//! Configuration management for Quill.
//!
//! Parses `quill.toml` files with serde and discovers them in the current
//! directory or its parents. CLI settings can be applied during load via
//! [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `links.posts_prefix`
//! - `links.pages_prefix`
//! - `api.base_url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quill.toml";

/// Largest page size an archive may request.
const MAX_ARCHIVE_LIMIT: u32 = 100;

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override `excerpt.default_words`.
    pub words: Option<usize>,
    /// Override `links.posts_prefix`.
    pub posts_prefix: Option<String>,
    /// Override `api.base_url`.
    pub api_base_url: Option<String>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub excerpt: ExcerptConfig,
    pub links: LinksConfig,
    pub archive: ArchiveConfig,
    pub api: ApiConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Word budgets for plain-text excerpts.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ExcerptConfig {
    /// Post cards.
    pub card_words: usize,
    /// Search-result descriptions.
    pub search_words: usize,
    /// Everything else, including the `excerpt` command.
    pub default_words: usize,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            card_words: 25,
            search_words: 30,
            default_words: 50,
        }
    }
}

/// URL prefixes for reference links.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub posts_prefix: String,
    pub pages_prefix: String,
    /// URL for links that cannot be resolved.
    pub fallback: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            posts_prefix: "/blog".to_owned(),
            pages_prefix: String::new(),
            fallback: "#".to_owned(),
        }
    }
}

/// Archive block defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Page size when a block sets none.
    pub default_limit: u32,
    pub sort: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            default_limit: 6,
            sort: "-publishedAt".to_owned(),
        }
    }
}

/// CMS API location, used to build archive query URLs.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api".to_owned(),
        }
    }
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
        /// Config field path (e.g., "`api.base_url`").
        field: String,
        /// Error message (e.g., "${`CMS_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a count to be greater than zero.
fn require_positive(value: usize, field: &str) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `quill.toml` in the current directory and parents, falling back to
    /// defaults when none exists.
    ///
    /// CLI settings are applied after loading and take precedence over file
    /// values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if reading,
    /// parsing, expansion or validation fails.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(words) = settings.words {
            self.excerpt.default_words = words;
        }
        if let Some(posts_prefix) = &settings.posts_prefix {
            self.links.posts_prefix.clone_from(posts_prefix);
        }
        if let Some(api_base_url) = &settings.api_base_url {
            self.api.base_url.clone_from(api_base_url);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::discover_from(&current)
    }

    /// Search for config file in `start` and its ancestors.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file and after CLI overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_excerpt()?;
        self.validate_archive()?;
        require_non_empty(&self.links.fallback, "links.fallback")?;
        require_http_url(&self.api.base_url, "api.base_url")?;
        Ok(())
    }

    fn validate_excerpt(&self) -> Result<(), ConfigError> {
        require_positive(self.excerpt.card_words, "excerpt.card_words")?;
        require_positive(self.excerpt.search_words, "excerpt.search_words")?;
        require_positive(self.excerpt.default_words, "excerpt.default_words")?;
        Ok(())
    }

    fn validate_archive(&self) -> Result<(), ConfigError> {
        let limit = self.archive.default_limit;
        if limit == 0 || limit > MAX_ARCHIVE_LIMIT {
            return Err(ConfigError::Validation(format!(
                "archive.default_limit must be between 1 and {MAX_ARCHIVE_LIMIT}"
            )));
        }
        require_non_empty(&self.archive.sort, "archive.sort")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.links.posts_prefix = expand::expand_env(&self.links.posts_prefix, "links.posts_prefix")?;
        self.links.pages_prefix = expand::expand_env(&self.links.pages_prefix, "links.pages_prefix")?;
        self.api.base_url = expand::expand_env(&self.api.base_url, "api.base_url")?;
        Ok(())
    }
}
