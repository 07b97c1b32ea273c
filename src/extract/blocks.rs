//! Item segmentation
//!
//! Splits one category section into per-article blocks. Structured
//! `TITLE:`-tagged output is preferred; bulleted legacy output comes next, and
//! a non-empty section that matches neither becomes a single block.

use regex::{Match, Regex};
use serde::Serialize;
use std::ops::Range;
use std::sync::LazyLock;

use super::markers;
use super::sections::CategorySection;

static TITLE_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?mi)^[ \t]*{}[*_]*TITLE[*_]*[ \t]*[:：]", markers::LIST_PREFIX)).unwrap()
});

/// Legacy bullet conventions, in priority order
static BULLETS: LazyLock<Vec<(&str, Regex)>> = LazyLock::new(|| {
    [
        ("decorative", r"(?m)^[ \t]*[◾■◆]\x{FE0F}?"),
        ("plain", r"(?m)^[ \t]*•"),
        ("hyphen", r"(?m)^[ \t]*[-－][ \t]+"),
        ("numbered", r"(?m)^[ \t]*\d{1,3}(?:[.)][ \t]+|[．）][ \t]*)"),
    ]
    .into_iter()
    .map(|(name, pattern)| (name, Regex::new(pattern).unwrap()))
    .collect()
});

/// Block format that produced an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Structured,
    LegacyBulleted,
    Singleton,
}

/// Text of one article within a section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemBlock<'a> {
    pub kind: BlockKind,
    pub text: &'a str,
    /// Byte range of `text` within the document
    pub span: Range<usize>,
    /// Bullet line with the glyph removed, for legacy blocks
    pub heading: Option<&'a str>,
}

/// Blocks of one section plus the structured blocks dropped for a blank title
#[derive(Debug, Clone, Default)]
pub struct Segmentation<'a> {
    pub blocks: Vec<ItemBlock<'a>>,
    pub discarded: usize,
}

fn line_end(text: &str, from: usize) -> usize {
    text[from..].find('\n').map(|i| from + i).unwrap_or(text.len())
}

/// Split a section into item blocks.
///
/// Spans are absolute offsets into the document the section was cut from.
pub fn segment<'a>(section: &CategorySection<'a>) -> Segmentation<'a> {
    let text = section.text;
    let offset = section.span.start;

    let structured = structured_blocks(text, offset);
    if !structured.blocks.is_empty() {
        return structured;
    }

    let legacy = legacy_blocks(text, offset);
    if !legacy.is_empty() {
        return Segmentation {
            blocks: legacy,
            discarded: structured.discarded,
        };
    }

    let blocks = if text.is_empty() {
        Vec::new()
    } else {
        vec![ItemBlock {
            kind: BlockKind::Singleton,
            text,
            span: section.span.clone(),
            heading: None,
        }]
    };

    Segmentation {
        blocks,
        discarded: structured.discarded,
    }
}

fn block<'a>(
    text: &'a str,
    offset: usize,
    range: Range<usize>,
    kind: BlockKind,
    heading: Option<&'a str>,
) -> ItemBlock<'a> {
    let range = markers::trim_span(text, range);
    ItemBlock {
        kind,
        text: &text[range.clone()],
        span: offset + range.start..offset + range.end,
        heading,
    }
}

fn structured_blocks(text: &str, offset: usize) -> Segmentation<'_> {
    let tags: Vec<Match<'_>> = TITLE_TAG_REGEX.find_iter(text).collect();
    let mut segmentation = Segmentation::default();

    for (i, tag) in tags.iter().enumerate() {
        let end = tags.get(i + 1).map(|next| next.start()).unwrap_or(text.len());
        let title = text[tag.end()..line_end(text, tag.end())].trim_matches(|c: char| {
            c.is_whitespace() || c == '*' || c == '_'
        });

        if title.is_empty() {
            tracing::debug!(offset = offset + tag.start(), "Discarding structured block with blank title");
            segmentation.discarded += 1;
            continue;
        }

        segmentation
            .blocks
            .push(block(text, offset, tag.start()..end, BlockKind::Structured, None));
    }

    segmentation
}

fn legacy_blocks(text: &str, offset: usize) -> Vec<ItemBlock<'_>> {
    for (name, bullet) in BULLETS.iter() {
        let boundaries: Vec<Match<'_>> = bullet
            .find_iter(text)
            .filter(|m| !markers::starts_with_field_label(&text[m.end()..line_end(text, m.end())]))
            .collect();
        if boundaries.is_empty() {
            continue;
        }

        tracing::debug!(convention = *name, count = boundaries.len(), "Using legacy bullets");
        return boundaries
            .iter()
            .enumerate()
            .map(|(i, boundary)| {
                let natural_end = boundaries
                    .get(i + 1)
                    .map(|next| next.start())
                    .unwrap_or(text.len());
                let heading_end = line_end(text, boundary.end());
                let end = legacy_end(text, heading_end, natural_end);
                let heading = text[boundary.end()..heading_end].trim();
                block(
                    text,
                    offset,
                    boundary.start()..end,
                    BlockKind::LegacyBulleted,
                    Some(heading),
                )
            })
            .collect();
    }

    Vec::new()
}

/// End of a legacy block whose bullet line ends at `heading_end`
fn legacy_end(text: &str, heading_end: usize, natural_end: usize) -> usize {
    let Some((marker, inner)) = markers::next_section_marker(text, heading_end) else {
        return natural_end;
    };
    if marker >= natural_end {
        return natural_end;
    }

    // A stray heading marker right under the bullet would leave the item
    // without a body; read on to the next bullet instead.
    if markers::is_hollow(&text[heading_end..marker]) && !markers::is_category_label(inner) {
        tracing::debug!(marker = inner, "Re-extending hollow legacy block");
        return natural_end;
    }

    marker
}
