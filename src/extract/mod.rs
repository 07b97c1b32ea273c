//! News extraction pipeline
//!
//! Turns one free-form digest document into structured [`NewsItem`]s:
//!
//! 1. [`normalize`] pulls the text out of the upstream envelope
//! 2. [`sections`] splits the text into category sections
//! 3. [`blocks`] splits each section into item blocks
//! 4. [`fields`] and [`links`] fill in each item
//! 5. [`fallback`] covers sections and documents that yield nothing
//!
//! The pipeline never fails on a non-empty document. Degraded outcomes are
//! listed in the [`ExtractionReport`].

pub mod blocks;
pub mod fallback;
pub mod fields;
pub mod links;
pub mod markers;
pub mod normalize;
pub mod sections;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::models::{NewsCategory, NewsItem};

pub use blocks::{BlockKind, ItemBlock};
pub use links::{LinkTier, ResolvedLink};
pub use sections::{CategorySection, SectionConvention};

/// Per-section outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub category: NewsCategory,
    pub convention: SectionConvention,
    pub item_count: usize,
}

/// Diagnostics for one extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionReport {
    /// Recognized sections in source order
    pub sections: Vec<SectionSummary>,
    /// Tier of every resolved link, in item order
    pub link_tiers: Vec<LinkTier>,
    /// Non-fatal issues
    pub issues: Vec<ExtractError>,
    /// Whether items came from the whole-document URL scan
    pub document_scan: bool,
}

impl ExtractionReport {
    /// Number of links that were only guessed
    pub fn low_confidence_links(&self) -> usize {
        self.link_tiers
            .iter()
            .filter(|tier| tier.is_low_confidence())
            .count()
    }
}

/// Items recovered from one document
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub items: Vec<NewsItem>,
    pub report: ExtractionReport,
}

impl Extraction {
    /// Items of one category in source order, at most `limit`
    pub fn select(&self, category: NewsCategory, limit: usize) -> Vec<NewsItem> {
        self.items
            .iter()
            .filter(|item| item.category == category)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Items grouped by category, each group in source order
    pub fn by_category(&self) -> BTreeMap<NewsCategory, Vec<&NewsItem>> {
        let mut groups: BTreeMap<NewsCategory, Vec<&NewsItem>> = BTreeMap::new();
        for item in &self.items {
            groups.entry(item.category).or_default().push(item);
        }
        groups
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Extraction pipeline
#[derive(Debug, Clone, Default)]
pub struct NewsExtractor {
    config: ExtractionConfig,
}

impl NewsExtractor {
    pub fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Extract items from an upstream envelope
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::NoContent`] when the envelope carries no text.
    pub fn extract_envelope(&self, envelope: &Value) -> Result<Extraction, ExtractError> {
        let document = normalize::normalize(envelope)?;
        Ok(self.extract(document))
    }

    /// Parse a raw JSON envelope and extract items from it
    pub fn extract_envelope_str(&self, raw: &str) -> crate::error::Result<Extraction> {
        let envelope: Value = serde_json::from_str(raw)?;
        Ok(self.extract_envelope(&envelope)?)
    }

    /// Extract items from a normalized document
    pub fn extract(&self, document: &str) -> Extraction {
        if document.trim().is_empty() {
            debug!("Empty document, nothing to extract");
            return Extraction::default();
        }

        let timestamp = Utc::now();
        let sections = sections::segment(document);
        let mut extraction = Extraction::default();

        if sections.is_empty() {
            extraction.report.issues.push(ExtractError::NoSectionsRecognized);
            extraction.report.document_scan = true;
            extraction.items = fallback::scan_document(document, &self.config, timestamp);
        } else {
            for section in &sections {
                self.extract_section(document, section, timestamp, &mut extraction);
            }
        }

        info!(
            items = extraction.items.len(),
            sections = extraction.report.sections.len(),
            issues = extraction.report.issues.len(),
            low_confidence_links = extraction.report.low_confidence_links(),
            "Extraction complete"
        );
        extraction
    }

    fn extract_section(
        &self,
        document: &str,
        section: &CategorySection<'_>,
        timestamp: DateTime<Utc>,
        extraction: &mut Extraction,
    ) {
        let category = section.category;
        let segmentation = blocks::segment(section);
        let report = &mut extraction.report;

        for _ in 0..segmentation.discarded {
            report.issues.push(ExtractError::MalformedBlock {
                category,
                field: "title",
            });
        }

        debug!(
            category = %category,
            convention = ?section.convention,
            blocks = segmentation.blocks.len(),
            "Segmented section"
        );

        if segmentation.blocks.is_empty() {
            report.issues.push(ExtractError::EmptySection { category });
            report.sections.push(SectionSummary {
                category,
                convention: section.convention,
                item_count: 1,
            });
            extraction
                .items
                .push(fallback::section_item(section, &self.config, timestamp));
            return;
        }

        for block in &segmentation.blocks {
            let fields = fields::extract(block, category, self.config.summary_preview_chars);
            for &field in &fields.missing {
                report.issues.push(ExtractError::MalformedBlock { category, field });
            }

            let title = if block.kind != BlockKind::Singleton && fields.has_title() {
                fields.title.as_str()
            } else {
                ""
            };
            let link = links::resolve(&links::LinkContext {
                document,
                section: section.text,
                block: block.text,
                title,
                section_radius: self.config.section_radius,
                keyword_radius: self.config.keyword_radius,
                placeholder_url: &self.config.placeholder_url,
            });
            if link.tier == LinkTier::Placeholder {
                warn!(category = %category, "Document has no links, using placeholder");
            }
            report.link_tiers.push(link.tier);

            extraction.items.push(NewsItem {
                id: NewsItem::generate_id(category.as_str()),
                title: fields.title,
                summary: fields.summary,
                business_insight: fields.insight,
                url: link.url,
                timestamp,
                category,
                source: self.config.source_label.clone(),
            });
        }

        report.sections.push(SectionSummary {
            category,
            convention: section.convention,
            item_count: segmentation.blocks.len(),
        });
    }
}
