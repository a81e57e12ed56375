//! Application configuration structures.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Remote API connection settings
    #[serde(default)]
    pub notion: NotionConfig,

    /// Traversal behavior
    #[serde(default)]
    pub crawl: CrawlConfig,

    /// Pages to leave out of a crawl
    #[serde(default)]
    pub exclusions: ExclusionConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("{} not found, using default configuration", path.display());
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|e| {
            log::warn!("Config load failed from {:?}: {}. Using defaults.", path, e);
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.notion.page_size) {
            return Err(AppError::validation("notion.page_size must be in 1..=100"));
        }
        if self.notion.timeout_secs == 0 {
            return Err(AppError::validation("notion.timeout_secs must be > 0"));
        }
        if self.notion.token_env.trim().is_empty() {
            return Err(AppError::validation("notion.token_env is empty"));
        }
        if self.notion.user_agent.trim().is_empty() {
            return Err(AppError::validation("notion.user_agent is empty"));
        }
        Url::parse(&self.notion.api_base).map_err(|e| {
            AppError::validation(format!(
                "notion.api_base '{}' is not a URL: {e}",
                self.notion.api_base
            ))
        })?;
        if self.crawl.lookback_days <= 0 {
            return Err(AppError::validation("crawl.lookback_days must be > 0"));
        }
        if self.crawl.block_separator.is_empty() {
            return Err(AppError::validation("crawl.block_separator is empty"));
        }
        for pattern in &self.exclusions.page_patterns {
            Regex::new(pattern).map_err(|e| {
                AppError::validation(format!("invalid exclusion pattern '{pattern}': {e}"))
            })?;
        }
        Ok(())
    }
}

/// Remote API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Base URL of the API; endpoint paths are joined onto it
    #[serde(default = "defaults::api_base")]
    pub api_base: String,

    /// Value of the `Notion-Version` header
    #[serde(default = "defaults::api_version")]
    pub api_version: String,

    /// Environment variable holding the integration token
    #[serde(default = "defaults::token_env")]
    pub token_env: String,

    /// Records requested per listing page (the API caps this at 100)
    #[serde(default = "defaults::page_size")]
    pub page_size: u32,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            api_base: defaults::api_base(),
            api_version: defaults::api_version(),
            token_env: defaults::token_env(),
            page_size: defaults::page_size(),
            timeout_secs: defaults::timeout(),
            user_agent: defaults::user_agent(),
        }
    }
}

/// Traversal behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// How far back the CLI looks when no cutoff is given
    #[serde(default = "defaults::lookback_days")]
    pub lookback_days: i64,

    /// Wall-clock budget for finding one document's edit roots
    #[serde(default = "defaults::scan_budget")]
    pub scan_budget_secs: u64,

    /// Share visited sets across all documents of one crawl
    #[serde(default = "defaults::share_visited")]
    pub share_visited: bool,

    /// Block-level separator used when rendering a forest
    #[serde(default = "defaults::block_separator")]
    pub block_separator: String,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            lookback_days: defaults::lookback_days(),
            scan_budget_secs: defaults::scan_budget(),
            share_visited: defaults::share_visited(),
            block_separator: defaults::block_separator(),
        }
    }
}

/// Pages to leave out of a crawl.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExclusionConfig {
    /// Regex patterns matched against page titles and URLs
    #[serde(default)]
    pub page_patterns: Vec<String>,
}

impl ExclusionConfig {
    /// Compile the patterns. Invalid ones are skipped with a warning.
    pub fn compile(&self) -> PageFilter {
        let patterns = self
            .page_patterns
            .iter()
            .filter_map(|pattern| match Regex::new(pattern) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    log::warn!("Invalid regex pattern '{}': {}", pattern, e);
                    None
                }
            })
            .collect();
        PageFilter { patterns }
    }
}

/// Compiled page exclusion rules.
#[derive(Debug, Clone, Default)]
pub struct PageFilter {
    patterns: Vec<Regex>,
}

impl PageFilter {
    /// True when no usable pattern is configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True when any pattern matches the page title or URL.
    pub fn is_excluded(&self, title: &str, url: &str) -> bool {
        match self
            .patterns
            .iter()
            .find(|regex| regex.is_match(title) || regex.is_match(url))
        {
            Some(regex) => {
                log::debug!(
                    "Page excluded by pattern '{}': title='{}', url='{}'",
                    regex.as_str(),
                    title,
                    url
                );
                true
            }
            None => false,
        }
    }
}

mod defaults {
    // Notion defaults
    pub fn api_base() -> String {
        "https://api.notion.com/".into()
    }
    pub fn api_version() -> String {
        "2022-06-28".into()
    }
    pub fn token_env() -> String {
        "NOTION_TOKEN".into()
    }
    pub fn page_size() -> u32 {
        100
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn user_agent() -> String {
        concat!("navi/", env!("CARGO_PKG_VERSION")).into()
    }

    // Crawl defaults
    pub fn lookback_days() -> i64 {
        7
    }
    pub fn scan_budget() -> u64 {
        30
    }
    pub fn share_visited() -> bool {
        true
    }
    pub fn block_separator() -> String {
        "<br>".into()
    }
}
