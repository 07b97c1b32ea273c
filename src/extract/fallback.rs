//! Fallback synthesis
//!
//! Two degraded paths: a catch-all item for a recognized section that yielded
//! nothing, and a scan that builds one item per URL when the document has no
//! recognizable sections at all.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::LazyLock;

use super::fields::SUMMARY_PLACEHOLDER;
use super::markers;
use super::sections::CategorySection;
use crate::config::ExtractionConfig;
use crate::models::{NewsCategory, NewsItem};
use crate::utils::{extract_host, floor_chars_back, truncate_chars};

/// Title candidates, from strictest to loosest
static TITLE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"[^\n]{10,100}", r"[A-Za-z][^\n]{10,100}", r"[^。\n]{10,100}"]
        .into_iter()
        .map(|pattern| Regex::new(pattern).unwrap())
        .collect()
});

static SUMMARY_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\n]{20,200}").unwrap());

static LEADING_BULLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[◾■◆•]\x{FE0F}?|[-－]|\d{1,3}[.)．）])?[ \t*_#]*").unwrap()
});

static TRAILING_URL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:【(?:URL|リンク|出典)】|(?i:url|source)[ \t*_]*[:：]|(?:リンク|出典)[ \t*_]*[:：])[ \t*_(（<]*$")
        .unwrap()
});

const TECHNOLOGY_HOST_HINTS: &[&str] = &["tech", "ai", "apple", "scitech"];
const POLITICS_HOST_HINTS: &[&str] = &["politics", "government", "bloomberg"];

/// Category guessed from a link, and whether the guess is only the default
pub fn guess_category(url: &str) -> (NewsCategory, bool) {
    let host = extract_host(url).unwrap_or_else(|| url.to_lowercase());

    if TECHNOLOGY_HOST_HINTS.iter().any(|hint| host.contains(hint)) {
        (NewsCategory::Technology, false)
    } else if POLITICS_HOST_HINTS.iter().any(|hint| host.contains(hint)) {
        (NewsCategory::Politics, false)
    } else {
        (NewsCategory::Business, true)
    }
}

/// Catch-all item for a recognized section that produced no items
pub fn section_item(
    section: &CategorySection<'_>,
    config: &ExtractionConfig,
    timestamp: DateTime<Utc>,
) -> NewsItem {
    let summary = if section.text.is_empty() {
        SUMMARY_PLACEHOLDER.to_string()
    } else {
        truncate_chars(section.text, config.summary_preview_chars)
    };

    tracing::warn!(category = %section.category, "Section produced no items, synthesizing one");

    NewsItem {
        id: NewsItem::generate_id(section.category.as_str()),
        title: format!("{}ニュース", section.category.display_name()),
        summary,
        business_insight: format!("{}が生成したニュース", config.source_label),
        url: String::new(),
        timestamp,
        category: section.category,
        source: config.source_label.clone(),
    }
}

/// Build one item per URL occurrence in a document without sections
pub fn scan_document(
    document: &str,
    config: &ExtractionConfig,
    timestamp: DateTime<Utc>,
) -> Vec<NewsItem> {
    let urls = markers::find_urls(document);
    tracing::warn!(urls = urls.len(), "No category sections, scanning document for links");

    urls.iter()
        .enumerate()
        .map(|(index, found)| {
            let window_start = floor_chars_back(document, found.start, config.scan_window_chars);
            let window = &document[window_start..found.start];

            let title = scan_title(window).unwrap_or_else(|| format!("ニュース記事 {}", index + 1));
            let summary = scan_summary(window)
                .unwrap_or_else(|| format!("{}が生成したニュース記事です。", config.source_label));

            let (category, arbitrary) = guess_category(found.url);
            if arbitrary {
                tracing::debug!(url = found.url, "No host hint, defaulting to business");
            }

            NewsItem {
                id: NewsItem::generate_id("fallback"),
                title,
                summary,
                business_insight: format!("{}が生成したビジネス洞察です。", config.source_label),
                url: found.url.to_string(),
                timestamp,
                category,
                source: format!("{} (Fallback)", config.source_label),
            }
        })
        .collect()
}

/// Strip bullets, emphasis and a dangling URL tag from a candidate line
fn clean_candidate(candidate: &str) -> String {
    let trimmed = candidate.trim();
    let without_bullet = LEADING_BULLET.replace(trimmed, "");
    let without_tag = TRAILING_URL_TAG.replace(&without_bullet, "");
    without_tag
        .trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '_')
        .to_string()
}

fn scan_title(window: &str) -> Option<String> {
    TITLE_PATTERNS.iter().find_map(|pattern| {
        let candidates: Vec<&str> = pattern.find_iter(window).map(|m| m.as_str()).collect();
        candidates.into_iter().rev().find_map(|candidate| {
            if candidate.contains("://") {
                return None;
            }
            let title = clean_candidate(candidate);
            let length = title.chars().count();
            (length > 10 && length < 100).then_some(title)
        })
    })
}

fn scan_summary(window: &str) -> Option<String> {
    let candidates: Vec<&str> = SUMMARY_PATTERN.find_iter(window).map(|m| m.as_str()).collect();
    candidates
        .into_iter()
        .rev()
        .filter(|candidate| !candidate.contains("://"))
        .map(clean_candidate)
        .find(|summary| !summary.is_empty())
}
