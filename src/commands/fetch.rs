use anyhow::{Context, Result};

use newsdigest::config::Config;
use newsdigest::extract::NewsExtractor;
use newsdigest::feed::{CategoryFeed, FeedOrigin, NewsFeed};
use newsdigest::llm::ChatClient;

use super::{parse_category, print_items};
use crate::OutputFormat;

pub async fn fetch(
    config: &Config,
    category: Option<String>,
    limit: Option<usize>,
    format: OutputFormat,
) -> Result<()> {
    let category = parse_category(category.as_deref())?;
    let limit = limit.unwrap_or(config.feed.item_limit);

    if config.upstream.api_key.is_none() {
        tracing::warn!("NEWSDIGEST_API_KEY is not set; every category will fall back to the catalog");
    }

    let client = ChatClient::new(config.upstream.clone()).context("Failed to create chat client")?;
    let feed = NewsFeed::new(client, NewsExtractor::new(config.extraction.clone()));

    let feeds: Vec<CategoryFeed> = match category {
        Some(category) => vec![feed.fetch_category(category, limit).await],
        None => feed.fetch_all(limit).await.into_values().collect(),
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&feeds).context("Failed to serialize feeds")?;
            println!("{json}");
        }
        OutputFormat::Text => {
            for feed in &feeds {
                let heading = match &feed.origin {
                    FeedOrigin::Extracted => feed.category.display_name().to_string(),
                    FeedOrigin::Catalog(reason) => {
                        format!("{} (catalog: {reason})", feed.category.display_name())
                    }
                };
                print_items(&heading, &feed.items, format)?;
            }
        }
    }

    Ok(())
}
