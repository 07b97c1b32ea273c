//! Shared marker and URL recognition
//!
//! Bracket markers (`【…】`) play two roles in generated digests: category
//! headings and per-item field tags. Only the former end a section or block.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

use crate::models::NewsCategory;

/// Optional list glyph or number in front of a tagged line (`1. TITLE:`, `- URL:`)
pub const LIST_PREFIX: &str = r"(?:(?:[◾■◆•]\x{FE0F}?|[-－]|\d{1,3}[.)．）])[ \t]*)?";

static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s<>"'()（）\[\]【】「」『』、。]+"#).unwrap()
});

static BRACKET_MARKER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"【([^】\n]{1,40})】").unwrap());

static FIELD_LABEL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[◎*_\s]*(?:【(?:URL|リンク|出典|概要|要約|ビジネス的示唆|示唆)】|(?:概要|要約|ビジネス的示唆|ビジネス示唆|示唆|リンク|出典|(?i:url|summary|insight|source))[*_\s]*[:：])",
    )
    .unwrap()
});

/// Bracketed tags that label a field inside an item rather than a section
const FIELD_TAGS: &[&str] = &[
    "URL",
    "リンク",
    "出典",
    "SOURCE",
    "概要",
    "要約",
    "ビジネス的示唆",
    "ビジネス示唆",
    "示唆",
    "TITLE",
    "タイトル",
    "SUMMARY",
    "INSIGHT",
];

/// An absolute URL found in a text, with its byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlMatch<'a> {
    pub start: usize,
    pub url: &'a str,
}

/// Find every absolute URL in `text`, in order of appearance
pub fn find_urls(text: &str) -> Vec<UrlMatch<'_>> {
    URL_REGEX
        .find_iter(text)
        .filter_map(|m| {
            let url = trim_url(m.as_str());
            (url.len() > "https://".len()).then_some(UrlMatch {
                start: m.start(),
                url,
            })
        })
        .collect()
}

/// First absolute URL in `text`
pub fn first_url(text: &str) -> Option<UrlMatch<'_>> {
    find_urls(text).into_iter().next()
}

/// Strip sentence punctuation and markdown emphasis glued to the end of a URL
fn trim_url(raw: &str) -> &str {
    raw.trim_end_matches(['.', ',', ';', ':', '!', '?', '*', '_', '`'])
}

/// Whether a bracketed marker's inner text is a field tag
pub fn is_field_tag(inner: &str) -> bool {
    let inner = inner.trim();
    FIELD_TAGS
        .iter()
        .any(|tag| inner.eq_ignore_ascii_case(tag))
}

/// Whether a bracketed marker's inner text names a known category
pub fn is_category_label(inner: &str) -> bool {
    NewsCategory::from_label(inner.trim()).is_some()
}

/// Byte offset and inner text of the next non-field bracket marker at or after `from`
pub fn next_section_marker(text: &str, from: usize) -> Option<(usize, &str)> {
    let haystack = text.get(from..)?;
    BRACKET_MARKER_REGEX
        .captures_iter(haystack)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?.as_str();
            (!is_field_tag(inner)).then_some((from + whole.start(), inner))
        })
        .next()
}

/// True when `text` holds nothing but whitespace and bracket markers
pub fn is_hollow(text: &str) -> bool {
    BRACKET_MARKER_REGEX.replace_all(text, "").trim().is_empty()
}

/// Whether a line opens with a field label such as `概要:` or `【URL】`
pub fn starts_with_field_label(line: &str) -> bool {
    FIELD_LABEL_REGEX.is_match(line)
}

/// Narrow `range` of `text` to exclude leading and trailing whitespace
pub fn trim_span(text: &str, range: Range<usize>) -> Range<usize> {
    let slice = &text[range.clone()];
    let leading = slice.len() - slice.trim_start().len();
    let start = range.start + leading;
    start..start + slice.trim().len()
}
