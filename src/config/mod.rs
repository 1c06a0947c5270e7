//! Configuration management for the piaofang harvester
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Browser user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/115.0.0.0 Safari/537.36";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Crawler configuration
    pub crawler: CrawlerConfig,

    /// Record storage configuration
    pub storage: StorageConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Crawler-specific configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Site root, prepended to discovered movie paths
    pub base_url: String,

    /// Path of the rankings page, relative to `base_url`
    pub rankings_path: String,

    /// User agent string
    pub user_agent: String,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,
}

/// Record storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory receiving one JSON document per movie
    pub output_dir: PathBuf,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://piaofang.maoyan.com"),
            rankings_path: String::from("/rankings/year"),
            user_agent: String::from(DEFAULT_USER_AGENT),
            request_timeout_secs: 30,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output/movie_data"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let base_url =
            std::env::var("PIAOFANG_BASE_URL").unwrap_or(defaults.crawler.base_url);

        let rankings_path =
            std::env::var("PIAOFANG_RANKINGS_PATH").unwrap_or(defaults.crawler.rankings_path);

        let user_agent =
            std::env::var("PIAOFANG_USER_AGENT").unwrap_or(defaults.crawler.user_agent);

        let request_timeout_secs = match std::env::var("PIAOFANG_REQUEST_TIMEOUT") {
            Ok(v) => v
                .parse::<u64>()
                .with_context(|| format!("PIAOFANG_REQUEST_TIMEOUT is not a number: {v}"))?,
            Err(_) => defaults.crawler.request_timeout_secs,
        };

        let output_dir = std::env::var("PIAOFANG_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.storage.output_dir);

        let level = std::env::var("PIAOFANG_LOG_LEVEL").unwrap_or(defaults.logging.level);
        let format = std::env::var("PIAOFANG_LOG_FORMAT").unwrap_or(defaults.logging.format);

        Ok(Self {
            crawler: CrawlerConfig {
                base_url,
                rankings_path,
                user_agent,
                request_timeout_secs,
            },
            storage: StorageConfig { output_dir },
            logging: LoggingConfig { level, format },
        })
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.crawler.base_url.trim().is_empty() {
            anyhow::bail!("base_url must not be empty");
        }

        url::Url::parse(&self.crawler.base_url)
            .with_context(|| format!("base_url is not a valid URL: {}", self.crawler.base_url))?;

        if self.crawler.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.storage.output_dir.as_os_str().is_empty() {
            anyhow::bail!("output_dir must not be empty");
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("unknown log format: {}", self.logging.format);
        }

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.crawler.request_timeout_secs)
    }

    /// Fully-qualified address of the rankings page
    #[must_use]
    pub fn rankings_url(&self) -> String {
        format!(
            "{}{}",
            self.crawler.base_url.trim_end_matches('/'),
            self.crawler.rankings_path
        )
    }
}
