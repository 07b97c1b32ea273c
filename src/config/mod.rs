//! Configuration management for newsdigest
//!
//! Configuration is loaded from environment variables or a TOML file and
//! validated before use. Every section has defaults, so a TOML file only needs
//! the keys it overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::Error;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Upstream chat API configuration
    pub upstream: UpstreamConfig,

    /// Extraction pipeline tuning
    pub extraction: ExtractionConfig,

    /// Feed selection settings
    pub feed: FeedConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Upstream chat API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// API base URL, without the endpoint path
    pub base_url: String,

    /// Bearer API key; live requests are refused without one
    pub api_key: Option<String>,

    /// End-user identifier sent with each request
    pub user: String,

    /// Query text sent with each request
    pub query: String,

    /// Value of the `inputs.trigger_type` request field
    pub trigger_type: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum retry attempts for transient failures
    pub max_retries: u32,

    /// Base delay for exponential backoff in milliseconds
    pub retry_delay_ms: u64,

    /// Requests per second across all categories
    pub requests_per_second: u32,
}

/// Extraction pipeline tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Max characters between a title and a section URL for proximity matching
    pub section_radius: usize,

    /// Max characters between a title keyword and a section URL
    pub keyword_radius: usize,

    /// Characters kept for synthesized summaries
    pub summary_preview_chars: usize,

    /// Characters scanned before a URL when synthesizing a title
    pub scan_window_chars: usize,

    /// Link used when the whole document contains no URL
    pub placeholder_url: String,

    /// Value of the `source` field on extracted items
    pub source_label: String,
}

/// Feed selection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Items returned per category
    pub item_limit: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("https://api.dify.ai/v1"),
            api_key: None,
            user: String::from("newsdigest"),
            query: String::from("ニュースを取得してください"),
            trigger_type: String::from("全カテゴリニュース取得 (all_news)"),
            timeout_secs: 120,
            max_retries: 3,
            retry_delay_ms: 1000,
            requests_per_second: 2,
        }
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            section_radius: 5000,
            keyword_radius: 1000,
            summary_preview_chars: 200,
            scan_window_chars: 200,
            placeholder_url: String::from("https://example.com/fallback-news"),
            source_label: String::from("Dify AI"),
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { item_limit: 5 }
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

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let upstream = UpstreamConfig {
            base_url: env_or("NEWSDIGEST_API_BASE_URL", defaults.upstream.base_url),
            api_key: std::env::var("NEWSDIGEST_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            user: env_or("NEWSDIGEST_USER", defaults.upstream.user),
            query: env_or("NEWSDIGEST_QUERY", defaults.upstream.query),
            trigger_type: env_or("NEWSDIGEST_TRIGGER_TYPE", defaults.upstream.trigger_type),
            timeout_secs: env_or("NEWSDIGEST_TIMEOUT", defaults.upstream.timeout_secs),
            max_retries: env_or("NEWSDIGEST_MAX_RETRIES", defaults.upstream.max_retries),
            retry_delay_ms: env_or("NEWSDIGEST_RETRY_DELAY_MS", defaults.upstream.retry_delay_ms),
            requests_per_second: env_or(
                "NEWSDIGEST_RATE_LIMIT",
                defaults.upstream.requests_per_second,
            ),
        };

        let extraction = ExtractionConfig {
            section_radius: env_or("NEWSDIGEST_SECTION_RADIUS", defaults.extraction.section_radius),
            keyword_radius: env_or("NEWSDIGEST_KEYWORD_RADIUS", defaults.extraction.keyword_radius),
            summary_preview_chars: env_or(
                "NEWSDIGEST_SUMMARY_CHARS",
                defaults.extraction.summary_preview_chars,
            ),
            ..defaults.extraction
        };

        let feed = FeedConfig {
            item_limit: env_or("NEWSDIGEST_ITEM_LIMIT", defaults.feed.item_limit),
        };

        let logging = LoggingConfig {
            level: env_or("NEWSDIGEST_LOG_LEVEL", defaults.logging.level),
            format: env_or("NEWSDIGEST_LOG_FORMAT", defaults.logging.format),
        };

        let config = Self {
            upstream,
            extraction,
            feed,
            logging,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.upstream.requests_per_second == 0 {
            return Err(Error::config("requests_per_second must be greater than 0"));
        }
        if self.upstream.timeout_secs == 0 {
            return Err(Error::config("timeout_secs must be greater than 0"));
        }
        if self.extraction.section_radius == 0 || self.extraction.keyword_radius == 0 {
            return Err(Error::config("proximity radii must be greater than 0"));
        }
        if self.extraction.summary_preview_chars == 0 {
            return Err(Error::config("summary_preview_chars must be greater than 0"));
        }
        if self.extraction.scan_window_chars == 0 {
            return Err(Error::config("scan_window_chars must be greater than 0"));
        }
        if self.feed.item_limit == 0 {
            return Err(Error::config("item_limit must be greater than 0"));
        }

        Ok(())
    }
}
