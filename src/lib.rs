//! newsdigest - structured news from generated digests
//!
//! Recovers discrete news items (category, title, summary, insight, link) from
//! a free-form digest document written by a generative model, tolerating
//! inconsistent section markers, bullet styles and misplaced links.
//!
//! # Architecture
//!
//! - [`extract`] - The extraction pipeline (normalize, segment, extract, resolve links)
//! - [`models`] - News items and the category label table
//! - [`llm`] - Upstream chat API client
//! - [`feed`] - Per-category fan-out with catalog fallback
//! - [`catalog`] - Static placeholder items
//! - [`config`] - Configuration management and settings
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use newsdigest::config::Config;
//! use newsdigest::extract::NewsExtractor;
//! use newsdigest::NewsCategory;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let extractor = NewsExtractor::new(config.extraction);
//!     let extraction = extractor.extract("【経済】\n◾️ 日銀が金利据え置き\nhttps://example.com/boj");
//!     for item in extraction.select(NewsCategory::Business, 5) {
//!         println!("{} {}", item.title, item.url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod feed;
pub mod llm;
pub mod models;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::extract::{Extraction, ExtractionReport, LinkTier, NewsExtractor};
    pub use crate::feed::{CategoryFeed, FeedOrigin, NewsFeed};
    pub use crate::llm::{ChatClient, DocumentSource};
    pub use crate::models::{NewsCategory, NewsItem};
}

// Direct re-exports for convenience
pub use models::{NewsCategory, NewsItem};
