use anyhow::{Context, Result};

use newsdigest::config::Config;
use newsdigest::llm::{ChatClient, DocumentSource};

pub async fn health(config: &Config) -> Result<()> {
    let client = ChatClient::new(config.upstream.clone()).context("Failed to create chat client")?;

    println!("Checking {}", client.endpoint());
    if client.health_check().await {
        println!("Upstream is healthy");
        Ok(())
    } else {
        anyhow::bail!("Upstream health check failed")
    }
}
