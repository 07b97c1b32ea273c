//! Common test utilities

#![allow(dead_code)]

use newsdigest::config::{ExtractionConfig, UpstreamConfig};
use newsdigest::extract::{Extraction, NewsExtractor};
use newsdigest::models::NewsItem;
use newsdigest::NewsCategory;

/// Extractor with default tuning
pub fn extractor() -> NewsExtractor {
    NewsExtractor::new(ExtractionConfig::default())
}

/// Run the default extractor over a document
pub fn extract(document: &str) -> Extraction {
    extractor().extract(document)
}

/// Upstream config pointing at a mock server, with fast retries
pub fn upstream_config(base_url: &str) -> UpstreamConfig {
    UpstreamConfig {
        base_url: base_url.to_string(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
        max_retries: 1,
        retry_delay_ms: 10,
        requests_per_second: 100,
        ..UpstreamConfig::default()
    }
}

/// Titles of one category's items, in order
pub fn titles(extraction: &Extraction, category: NewsCategory) -> Vec<String> {
    extraction
        .select(category, usize::MAX)
        .into_iter()
        .map(|item| item.title)
        .collect()
}

/// Assert the invariants every extracted item must hold
pub fn assert_item_invariants(item: &NewsItem) {
    assert!(!item.title.is_empty(), "empty title: {item:?}");
    assert!(!item.summary.is_empty(), "empty summary: {item:?}");
    assert!(!item.business_insight.is_empty(), "empty insight: {item:?}");
    assert!(!item.id.is_empty());
}
