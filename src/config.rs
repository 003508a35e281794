// src/config.rs
// =============================================================================
// Settings for talking to the GitHub API.
//
// Where settings come from (later wins):
// 1. Built-in defaults (see the `default_*` functions)
// 2. A TOML config file: `--config <path>`, or if that flag is missing,
//    `<config dir>/github-lookup/config.toml` when it exists
// 3. Command-line overrides (`--api-url`, `--concurrency`)
//
// Example config.toml:
//   api_url = "https://api.github.com"
//   timeout_secs = 10
//   language_concurrency = 5
//   max_pages = 1000
// =============================================================================

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the GitHub REST API
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// User-Agent header (GitHub rejects requests without one)
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How many language lookups may run at once
    #[serde(default = "default_language_concurrency")]
    pub language_concurrency: usize,

    /// Hard cap on repository pages fetched for one user
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            language_concurrency: default_language_concurrency(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_language_concurrency() -> usize {
    5
}

fn default_max_pages() -> usize {
    1000
}

impl Config {
    /// Loads the config from `path`, or from the default location if `path`
    /// is None. A missing default file is not an error; a missing explicit
    /// file is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => {
                    tracing::debug!("Using config file: {}", path.display());
                    Self::from_file(&path)?
                }
                _ => Self::default(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(mut self, api_url: Option<String>, concurrency: Option<usize>) -> Result<Self> {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(concurrency) = concurrency {
            self.language_concurrency = concurrency;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.api_url)
            .with_context(|| format!("api_url is not a valid URL: {}", self.api_url))?;

        if self.timeout_secs == 0 {
            bail!("timeout_secs must be at least 1");
        }
        if self.language_concurrency == 0 {
            bail!("language_concurrency must be at least 1");
        }
        if self.max_pages == 0 {
            bail!("max_pages must be at least 1");
        }
        Ok(())
    }
}

/// `<config dir>/github-lookup/config.toml`, e.g. `~/.config/github-lookup/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("github-lookup").join("config.toml"))
}
