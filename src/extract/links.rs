//! Link resolution
//!
//! The model often separates a link from the item it belongs to, or drops it.
//! Resolution walks a cascade of searches, each more permissive than the last,
//! and stops at the first that yields a URL.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use super::markers::{self, UrlMatch};
use crate::utils::char_distance;

static URL_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:【(?:URL|リンク|出典)】|(?i:\burl\b|\bsource\b)[ \t*_]*[:：]|(?:リンク|出典)[ \t*_]*[:：])[\s*_(（<]*",
    )
    .unwrap()
});

/// Cascade tier that produced a link
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkTier {
    Tagged,
    InBlock,
    SectionProximity,
    TitleKeywordProximity,
    DocumentProximity,
    FirstInDocument,
    Placeholder,
}

impl LinkTier {
    /// Links from these tiers are guesses and probably belong to another item
    pub fn is_low_confidence(&self) -> bool {
        matches!(self, Self::FirstInDocument | Self::Placeholder)
    }
}

/// A resolved link and the tier that found it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedLink {
    pub url: String,
    pub tier: LinkTier,
}

/// Everything the cascade may search
#[derive(Debug, Clone, Copy)]
pub struct LinkContext<'a> {
    pub document: &'a str,
    pub section: &'a str,
    pub block: &'a str,
    /// Empty when the item has no real title
    pub title: &'a str,
    pub section_radius: usize,
    pub keyword_radius: usize,
    pub placeholder_url: &'a str,
}

type Strategy = for<'a> fn(&LinkContext<'a>) -> Option<&'a str>;

const CASCADE: &[(LinkTier, Strategy)] = &[
    (LinkTier::Tagged, tagged),
    (LinkTier::InBlock, in_block),
    (LinkTier::SectionProximity, section_proximity),
    (LinkTier::TitleKeywordProximity, title_keyword_proximity),
    (LinkTier::DocumentProximity, document_proximity),
    (LinkTier::FirstInDocument, first_in_document),
    (LinkTier::Placeholder, placeholder),
];

/// Resolve the link for one item
pub fn resolve(ctx: &LinkContext<'_>) -> ResolvedLink {
    for (tier, strategy) in CASCADE {
        if let Some(url) = strategy(ctx) {
            if tier.is_low_confidence() {
                tracing::warn!(tier = ?tier, url, title = ctx.title, "Low-confidence link");
            } else {
                tracing::debug!(tier = ?tier, url, "Resolved link");
            }
            return ResolvedLink {
                url: url.to_string(),
                tier: *tier,
            };
        }
    }

    // The placeholder tier always succeeds
    ResolvedLink {
        url: ctx.placeholder_url.to_string(),
        tier: LinkTier::Placeholder,
    }
}

fn tagged<'a>(ctx: &LinkContext<'a>) -> Option<&'a str> {
    URL_TAG_REGEX.find_iter(ctx.block).find_map(|tag| {
        markers::first_url(&ctx.block[tag.end()..])
            .filter(|m| m.start == 0)
            .map(|m| m.url)
    })
}

fn in_block<'a>(ctx: &LinkContext<'a>) -> Option<&'a str> {
    markers::first_url(ctx.block).map(|m| m.url)
}

/// URL in `text` closest to `anchor`, with its distance in characters
fn nearest<'a>(text: &'a str, anchor: usize) -> Option<(UrlMatch<'a>, usize)> {
    markers::find_urls(text)
        .into_iter()
        .map(|m| (m, char_distance(text, anchor, m.start)))
        .min_by_key(|(_, distance)| *distance)
}

fn nearest_within<'a>(text: &'a str, needle: &str, radius: usize) -> Option<&'a str> {
    if needle.is_empty() {
        return None;
    }
    let anchor = text.find(needle)?;
    nearest(text, anchor)
        .filter(|(_, distance)| *distance < radius)
        .map(|(m, _)| m.url)
}

fn section_proximity<'a>(ctx: &LinkContext<'a>) -> Option<&'a str> {
    nearest_within(ctx.section, ctx.title, ctx.section_radius)
}

/// Nearest URL to any mention of the title's leading words.
///
/// Reached when the title's first occurrence has no URL within the section
/// radius, typically because links were collected in a reference list that
/// repeats a shortened title.
fn title_keyword_proximity<'a>(ctx: &LinkContext<'a>) -> Option<&'a str> {
    let keyword = title_keyword(ctx.title);
    if keyword.chars().count() < 2 {
        return None;
    }

    let urls = markers::find_urls(ctx.section);
    let nearest = ctx
        .section
        .match_indices(keyword)
        .flat_map(|(anchor, _)| {
            urls.iter()
                .map(move |m| (m.url, char_distance(ctx.section, anchor, m.start)))
        })
        .filter(|(_, distance)| *distance < ctx.keyword_radius)
        .min_by_key(|(_, distance)| *distance);
    nearest.map(|(url, _)| url)
}

fn document_proximity<'a>(ctx: &LinkContext<'a>) -> Option<&'a str> {
    nearest_within(ctx.document, ctx.title, usize::MAX)
}

fn first_in_document<'a>(ctx: &LinkContext<'a>) -> Option<&'a str> {
    markers::first_url(ctx.document).map(|m| m.url)
}

fn placeholder<'a>(ctx: &LinkContext<'a>) -> Option<&'a str> {
    Some(ctx.placeholder_url)
}

/// Leading words of a title used as a looser anchor.
///
/// Titles of three or more words keep their first two, two-word titles their
/// first; unspaced titles keep their first eight characters.
fn title_keyword(title: &str) -> &str {
    let title = title.trim();
    let mut spaces = title.match_indices(char::is_whitespace).map(|(i, _)| i);
    if let Some(first) = spaces.next() {
        return match spaces.find(|&i| i > first + 1) {
            Some(second) => &title[..second],
            None => &title[..first],
        };
    }

    match title.char_indices().nth(8) {
        Some((cut, _)) => &title[..cut],
        None => title,
    }
}
