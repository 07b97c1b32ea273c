mod catalog;
mod fetch;
mod health;
mod parse;

use anyhow::{Context, Result};
use newsdigest::models::NewsItem;
use newsdigest::NewsCategory;

use crate::OutputFormat;

// Re-export command functions for convenience
pub use catalog::catalog;
pub use fetch::fetch;
pub use health::health;
pub use parse::{parse, ParseParams};

/// Resolve an optional `--category` argument
fn parse_category(category: Option<&str>) -> Result<Option<NewsCategory>> {
    category
        .map(|name| {
            NewsCategory::parse(name).with_context(|| {
                format!("Unknown category '{name}' (expected business, technology or politics)")
            })
        })
        .transpose()
}

/// Print a titled group of items in the requested format
fn print_items(heading: &str, items: &[NewsItem], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).context("Failed to serialize items")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            println!("{heading}");
            println!("================================");
            if items.is_empty() {
                println!("(no items)\n");
                return Ok(());
            }
            for (i, item) in items.iter().enumerate() {
                println!("{}. {}", i + 1, item.title);
                println!("   Category: {} | Source: {}", item.category, item.source);
                println!("   > {}", newsdigest::utils::truncate_chars(&item.summary, 150));
                println!("   Insight: {}", item.business_insight);
                let url = if item.url.is_empty() { "(none)" } else { item.url.as_str() };
                println!("   URL: {url}");
                println!();
            }
        }
    }
    Ok(())
}
