use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

use newsdigest::config::Config;
use newsdigest::extract::{Extraction, NewsExtractor};
use newsdigest::models::NewsItem;
use newsdigest::NewsCategory;

use super::{parse_category, print_items};
use crate::OutputFormat;

/// Arguments of the `parse` command
pub struct ParseParams {
    pub input: Option<PathBuf>,
    pub envelope: bool,
    pub category: Option<String>,
    pub limit: Option<usize>,
    pub report: bool,
    pub format: OutputFormat,
}

async fn read_input(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file: {}", path.display())),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

pub async fn parse(config: &Config, params: ParseParams) -> Result<()> {
    let category = parse_category(params.category.as_deref())?;
    let limit = params.limit.unwrap_or(config.feed.item_limit);
    let raw = read_input(params.input.as_ref()).await?;

    let extractor = NewsExtractor::new(config.extraction.clone());
    let extraction = if params.envelope {
        extractor
            .extract_envelope_str(&raw)
            .context("Failed to extract items from envelope")?
    } else {
        extractor.extract(&raw)
    };

    let categories = match category {
        Some(category) => vec![category],
        None => NewsCategory::all(),
    };

    match params.format {
        OutputFormat::Json => print_json(&extraction, &categories, limit, params.report)?,
        OutputFormat::Text => {
            for category in &categories {
                let items = extraction.select(*category, limit);
                print_items(category.display_name(), &items, OutputFormat::Text)?;
            }
            if params.report {
                print_report(&extraction);
            }
        }
    }

    Ok(())
}

fn print_json(
    extraction: &Extraction,
    categories: &[NewsCategory],
    limit: usize,
    with_report: bool,
) -> Result<()> {
    let items: Vec<NewsItem> = categories
        .iter()
        .flat_map(|category| extraction.select(*category, limit))
        .collect();

    let json = if with_report {
        serde_json::to_string_pretty(&serde_json::json!({
            "items": items,
            "report": extraction.report,
        }))
    } else {
        serde_json::to_string_pretty(&items)
    }
    .context("Failed to serialize extraction")?;

    println!("{json}");
    Ok(())
}

fn print_report(extraction: &Extraction) {
    let report = &extraction.report;

    println!("Extraction report");
    println!("================================");
    println!("  Items: {}", extraction.len());
    if report.document_scan {
        println!("  No category sections; items synthesized from links");
    }
    for section in &report.sections {
        println!(
            "  {} ({:?}): {} items",
            section.category.display_name(),
            section.convention,
            section.item_count
        );
    }
    println!("  Low-confidence links: {}", report.low_confidence_links());
    for issue in &report.issues {
        println!("  - {issue}");
    }
}
