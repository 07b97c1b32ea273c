//! Per-category news feeds
//!
//! Fetches a document per category, runs the extractor and selects that
//! category's items. Every failure path ends in the static catalog, so a feed
//! is never empty for a non-zero limit.

use futures::future::join_all;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;

use crate::catalog;
use crate::extract::NewsExtractor;
use crate::llm::DocumentSource;
use crate::models::{NewsCategory, NewsItem};

/// Where a feed's items came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum FeedOrigin {
    /// Extracted from the upstream document
    Extracted,
    /// Served from the static catalog, with the reason
    Catalog(String),
}

/// Items for one category
#[derive(Debug, Clone, Serialize)]
pub struct CategoryFeed {
    pub category: NewsCategory,
    pub items: Vec<NewsItem>,
    pub origin: FeedOrigin,
}

impl CategoryFeed {
    fn from_catalog(category: NewsCategory, limit: usize, reason: String) -> Self {
        tracing::warn!(category = %category, reason = %reason, "Serving catalog items");
        Self {
            category,
            items: catalog::fallback_news(category, limit),
            origin: FeedOrigin::Catalog(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.origin, FeedOrigin::Catalog(_))
    }
}

/// Feed orchestration over a document source
pub struct NewsFeed<S: DocumentSource> {
    source: S,
    extractor: NewsExtractor,
}

impl<S: DocumentSource> NewsFeed<S> {
    pub fn new(source: S, extractor: NewsExtractor) -> Self {
        Self { source, extractor }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch one category's items, at most `limit`
    pub async fn fetch_category(&self, category: NewsCategory, limit: usize) -> CategoryFeed {
        let started = Instant::now();

        let envelope = match self.source.fetch_document(category).await {
            Ok(envelope) => envelope,
            Err(e) => return CategoryFeed::from_catalog(category, limit, e.to_string()),
        };

        let extraction = match self.extractor.extract_envelope(&envelope) {
            Ok(extraction) => extraction,
            Err(e) => return CategoryFeed::from_catalog(category, limit, e.to_string()),
        };

        let items = extraction.select(category, limit);
        if items.is_empty() {
            return CategoryFeed::from_catalog(
                category,
                limit,
                format!("no {category} items in upstream document"),
            );
        }

        tracing::info!(
            category = %category,
            source = self.source.name(),
            items = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Category feed ready"
        );

        CategoryFeed {
            category,
            items,
            origin: FeedOrigin::Extracted,
        }
    }

    /// Fetch every category concurrently
    pub async fn fetch_all(&self, limit: usize) -> BTreeMap<NewsCategory, CategoryFeed> {
        let feeds = join_all(
            NewsCategory::all()
                .into_iter()
                .map(|category| self.fetch_category(category, limit)),
        )
        .await;

        feeds.into_iter().map(|feed| (feed.category, feed)).collect()
    }
}
