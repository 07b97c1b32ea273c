use anyhow::{Context, Result};

use newsdigest::catalog::fallback_news;
use newsdigest::config::Config;
use newsdigest::models::NewsItem;
use newsdigest::NewsCategory;

use super::{parse_category, print_items};
use crate::OutputFormat;

pub fn catalog(config: &Config, category: Option<String>, format: OutputFormat) -> Result<()> {
    let categories = match parse_category(category.as_deref())? {
        Some(category) => vec![category],
        None => NewsCategory::all(),
    };
    let limit = config.feed.item_limit;

    match format {
        OutputFormat::Json => {
            let items: Vec<NewsItem> = categories
                .into_iter()
                .flat_map(|category| fallback_news(category, limit))
                .collect();
            let json = serde_json::to_string_pretty(&items).context("Failed to serialize catalog")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for category in categories {
                print_items(category.display_name(), &fallback_news(category, limit), format)?;
            }
        }
    }

    Ok(())
}
