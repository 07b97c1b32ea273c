//! Field extraction from item blocks

use regex::Regex;
use std::sync::LazyLock;

use super::blocks::{BlockKind, ItemBlock};
use super::markers;
use crate::models::NewsCategory;
use crate::utils::truncate_chars;

pub const TITLE_PLACEHOLDER: &str = "タイトルを生成中...";
pub const SUMMARY_PLACEHOLDER: &str = "概要を生成中...";
pub const INSIGHT_PLACEHOLDER: &str = "ビジネス示唆を生成中...";

static STRUCTURED_FIELD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?mi)^[ \t]*{}[*_]*(TITLE|SUMMARY|INSIGHT)[*_]*[ \t]*[:：](.*)$",
        markers::LIST_PREFIX
    ))
    .unwrap()
});

static LEGACY_SUMMARY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:◎[ \t]*)?(?:概要|要約|(?i:summary))[ \t]*[*_]*[：:][*_]*[ \t]*([^◎【]*)").unwrap()
});

static LEGACY_INSIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:◎[ \t]*)?(?:ビジネス的示唆|ビジネス示唆|示唆|(?i:insight))[ \t]*[*_]*[：:][*_]*[ \t]*([^【]*)")
        .unwrap()
});

/// Title, summary and insight of one block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub title: String,
    pub summary: String,
    pub insight: String,
    /// Fields that were replaced by a placeholder
    pub missing: Vec<&'static str>,
}

impl ExtractedFields {
    fn assemble(
        title: Option<String>,
        summary: Option<String>,
        insight: Option<String>,
    ) -> Self {
        let mut missing = Vec::new();
        let mut or_placeholder = |value: Option<String>, field: &'static str, placeholder: &str| {
            value.filter(|v| !v.is_empty()).unwrap_or_else(|| {
                missing.push(field);
                placeholder.to_string()
            })
        };

        let title = or_placeholder(title, "title", TITLE_PLACEHOLDER);
        let summary = or_placeholder(summary, "summary", SUMMARY_PLACEHOLDER);
        let insight = or_placeholder(insight, "insight", INSIGHT_PLACEHOLDER);

        Self {
            title,
            summary,
            insight,
            missing,
        }
    }

    /// Whether the title came from the block rather than a placeholder
    pub fn has_title(&self) -> bool {
        !self.missing.contains(&"title")
    }
}

fn clean(value: &str) -> String {
    value
        .trim_matches(|c: char| c.is_whitespace() || c == '*' || c == '_')
        .to_string()
}

/// Extract the fields of a block according to its kind
pub fn extract(block: &ItemBlock<'_>, category: NewsCategory, preview_chars: usize) -> ExtractedFields {
    match block.kind {
        BlockKind::Structured => structured(block.text),
        BlockKind::LegacyBulleted => legacy(block),
        BlockKind::Singleton => ExtractedFields::assemble(
            Some(format!("{}ニュース", category.display_name())),
            Some(truncate_chars(block.text, preview_chars)),
            None,
        ),
    }
}

fn structured(text: &str) -> ExtractedFields {
    let mut title = None;
    let mut summary = None;
    let mut insight = None;

    for caps in STRUCTURED_FIELD_REGEX.captures_iter(text) {
        let value = clean(&caps[2]);
        if value.is_empty() {
            continue;
        }
        let slot = match caps[1].to_ascii_uppercase().as_str() {
            "TITLE" => &mut title,
            "SUMMARY" => &mut summary,
            _ => &mut insight,
        };
        slot.get_or_insert(value);
    }

    ExtractedFields::assemble(title, summary, insight)
}

fn legacy(block: &ItemBlock<'_>) -> ExtractedFields {
    let title = block.heading.map(clean);
    let summary = labeled_value(&LEGACY_SUMMARY_REGEX, block.text);
    let insight = labeled_value(&LEGACY_INSIGHT_REGEX, block.text);

    ExtractedFields::assemble(title, summary, insight)
}

/// Captured value of a labeled legacy field, cut at the first URL or field line
fn labeled_value(pattern: &Regex, text: &str) -> Option<String> {
    let captured = pattern.captures(text)?.get(1)?.as_str();

    let mut kept = Vec::new();
    for (i, line) in captured.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("http") || (i > 0 && markers::starts_with_field_label(trimmed)) {
            break;
        }
        kept.push(line);
    }

    Some(clean(&kept.join("\n")))
}
