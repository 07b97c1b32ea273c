//! Category segmentation
//!
//! Splits a document into one section per recognized category. Each known
//! label is tried against a fixed list of marker conventions; the first
//! convention that matches wins for that label.

use regex::Regex;
use serde::Serialize;
use std::ops::Range;
use std::sync::LazyLock;

use super::markers;
use crate::models::{NewsCategory, CATEGORY_LABELS};

/// Leading decoration allowed before a line-anchored label
const LINE_LEAD: &str = r"(?m)^[ \t]*(?:#{1,6}[ \t]*)?[*_]*";

static DELIMITER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"={3,}").unwrap());

static LABEL_PATTERNS: LazyLock<Vec<LabelPatterns>> = LazyLock::new(|| {
    CATEGORY_LABELS
        .iter()
        .map(|(label, category)| LabelPatterns::new(label, *category))
        .collect()
});

/// Section marker conventions, strongest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionConvention {
    /// `【LABEL】`
    Bracketed,
    /// `LABEL:` at line start
    Colon,
    /// `LABEL` alone at line start
    Bare,
    /// `=== LABEL ===`
    Delimited,
    /// `LABEL NEWS`
    NewsHeading,
}

/// The part of a document attributed to one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySection<'a> {
    pub category: NewsCategory,
    /// Label spelling that matched
    pub label: &'static str,
    pub convention: SectionConvention,
    /// Byte range of the marker itself
    pub marker: Range<usize>,
    /// Trimmed section content
    pub text: &'a str,
    /// Byte range of `text` within the document
    pub span: Range<usize>,
}

struct LabelPatterns {
    label: &'static str,
    category: NewsCategory,
    bracketed: String,
    colon: Regex,
    bare: Regex,
    delimited: Regex,
    news: Regex,
}

impl LabelPatterns {
    fn new(label: &'static str, category: NewsCategory) -> Self {
        let escaped = regex::escape(label);
        Self {
            label,
            category,
            bracketed: format!("【{label}】"),
            colon: Regex::new(&format!(r"{LINE_LEAD}{escaped}[*_]*[ \t]*[:：][*_]*")).unwrap(),
            bare: Regex::new(&format!(r"{LINE_LEAD}{escaped}[*_]*(?:[ \t]+|\r?$)")).unwrap(),
            delimited: Regex::new(&format!(r"={{3,}}[ \t]*{escaped}[ \t]*={{3,}}")).unwrap(),
            news: Regex::new(&format!(r"{escaped}[ \t]*(?i:NEWS)")).unwrap(),
        }
    }
}

/// A marker hit: the marker range and where its content stops
struct MarkerMatch {
    marker: Range<usize>,
    content_end: usize,
}

type Convention = fn(&str, &LabelPatterns) -> Option<MarkerMatch>;

const CONVENTIONS: &[(SectionConvention, Convention)] = &[
    (SectionConvention::Bracketed, bracketed),
    (SectionConvention::Colon, colon),
    (SectionConvention::Bare, bare),
    (SectionConvention::Delimited, delimited),
    (SectionConvention::NewsHeading, news_heading),
];

fn until_section_marker(document: &str, from: usize) -> usize {
    markers::next_section_marker(document, from)
        .map(|(pos, _)| pos)
        .unwrap_or(document.len())
}

fn bracketed(document: &str, patterns: &LabelPatterns) -> Option<MarkerMatch> {
    let start = document.find(&patterns.bracketed)?;
    let end = start + patterns.bracketed.len();
    Some(MarkerMatch {
        marker: start..end,
        content_end: until_section_marker(document, end),
    })
}

fn colon(document: &str, patterns: &LabelPatterns) -> Option<MarkerMatch> {
    let m = patterns.colon.find(document)?;
    Some(MarkerMatch {
        marker: m.range(),
        content_end: until_section_marker(document, m.end()),
    })
}

fn bare(document: &str, patterns: &LabelPatterns) -> Option<MarkerMatch> {
    // "LABEL NEWS" belongs to the news-heading convention
    let m = patterns.bare.find_iter(document).find(|m| {
        !document[m.end()..]
            .get(..4)
            .is_some_and(|word| word.eq_ignore_ascii_case("news"))
    })?;
    Some(MarkerMatch {
        marker: m.range(),
        content_end: until_section_marker(document, m.end()),
    })
}

fn delimited(document: &str, patterns: &LabelPatterns) -> Option<MarkerMatch> {
    let m = patterns.delimited.find(document)?;
    let content_end = DELIMITER_REGEX
        .find_at(document, m.end())
        .map(|close| close.start())
        .unwrap_or(document.len());
    Some(MarkerMatch {
        marker: m.range(),
        content_end,
    })
}

fn news_heading(document: &str, patterns: &LabelPatterns) -> Option<MarkerMatch> {
    let m = patterns.news.find(document)?;
    let content_end = patterns
        .news
        .find_at(document, m.end())
        .map(|next| next.start())
        .unwrap_or(document.len());
    Some(MarkerMatch {
        marker: m.range(),
        content_end,
    })
}

struct Candidate {
    category: NewsCategory,
    label: &'static str,
    convention: SectionConvention,
    hit: MarkerMatch,
}

/// Split a document into category sections, in order of appearance.
///
/// At most one section is produced per category. When several spellings of
/// the same category match, the one found with the strongest convention wins,
/// then the earliest label in [`CATEGORY_LABELS`]. A section never extends
/// past the marker of another recognized section.
pub fn segment(document: &str) -> Vec<CategorySection<'_>> {
    let mut found: Vec<Candidate> = Vec::new();

    for patterns in LABEL_PATTERNS.iter() {
        let Some((convention, hit)) = CONVENTIONS
            .iter()
            .find_map(|(convention, strategy)| strategy(document, patterns).map(|m| (*convention, m)))
        else {
            continue;
        };

        tracing::debug!(
            label = patterns.label,
            convention = ?convention,
            offset = hit.marker.start,
            "Matched category marker"
        );

        let candidate = Candidate {
            category: patterns.category,
            label: patterns.label,
            convention,
            hit,
        };
        match found.iter().position(|c| c.category == patterns.category) {
            Some(i) if found[i].convention <= convention => {}
            Some(i) => found[i] = candidate,
            None => found.push(candidate),
        }
    }

    let marker_starts: Vec<usize> = found.iter().map(|c| c.hit.marker.start).collect();

    let mut sections: Vec<CategorySection<'_>> = found
        .into_iter()
        .map(|c| {
            let content_start = c.hit.marker.end;
            let content_end = marker_starts
                .iter()
                .copied()
                .filter(|&start| start >= content_start)
                .fold(c.hit.content_end, usize::min)
                .max(content_start);
            let span = markers::trim_span(document, content_start..content_end);

            CategorySection {
                category: c.category,
                label: c.label,
                convention: c.convention,
                marker: c.hit.marker,
                text: &document[span.clone()],
                span,
            }
        })
        .collect();

    sections.sort_by_key(|s| s.marker.start);
    sections
}
