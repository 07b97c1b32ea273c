//! Upstream chat API client
//!
//! Requests a digest document per category from a Dify-style chat endpoint.
//! Requests are rate limited with governor and retried with exponential
//! backoff when the failure is transient.

use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::num::NonZeroU32;
use std::time::Duration;

use crate::config::UpstreamConfig;
use crate::extract::normalize::normalize;
use crate::models::NewsCategory;
use crate::utils::error::UpstreamError;
use crate::utils::retry::{with_retry_if, RetryConfig};

/// Query sent by [`ChatClient::health_check`]
const HEALTH_QUERY: &str = "接続確認";

/// Anything that can produce a raw response envelope for a category
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &str;

    /// Fetch the raw envelope for one category
    async fn fetch_document(&self, category: NewsCategory) -> Result<Value, UpstreamError>;

    /// Whether the source currently answers with usable text
    async fn health_check(&self) -> bool {
        true
    }
}

#[derive(Debug, Serialize)]
struct ChatInputs<'a> {
    trigger_type: &'a str,
    category: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    inputs: ChatInputs<'a>,
    query: &'a str,
    response_mode: &'static str,
    conversation_id: &'static str,
    user: &'a str,
    files: Vec<Value>,
    auto_generate_name: bool,
}

/// Blocking-mode chat client
pub struct ChatClient {
    client: Client,
    rate_limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    retry: RetryConfig,
    config: UpstreamConfig,
}

impl ChatClient {
    /// Create a client from upstream configuration
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Http` if the HTTP client cannot be built.
    pub fn new(config: UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .gzip(true)
            .build()?;

        let rate = NonZeroU32::new(config.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = RateLimiter::direct(Quota::per_second(rate));
        let retry = RetryConfig::with_delays(
            config.max_retries,
            config.retry_delay_ms,
            config.retry_delay_ms.saturating_mul(30),
        );

        Ok(Self {
            client,
            rate_limiter,
            retry,
            config,
        })
    }

    /// Full chat endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}/chat-messages", self.config.base_url.trim_end_matches('/'))
    }

    fn request<'a>(&'a self, category: NewsCategory, query: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            inputs: ChatInputs {
                trigger_type: &self.config.trigger_type,
                category: category.request_label(),
            },
            query,
            response_mode: "blocking",
            conversation_id: "",
            user: &self.config.user,
            files: Vec::new(),
            auto_generate_name: false,
        }
    }

    async fn post(&self, request: &ChatRequest<'_>) -> Result<Value, UpstreamError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| UpstreamError::NotConfigured("api_key".to_string()))?;

        with_retry_if(
            &self.retry,
            || self.post_once(api_key, request),
            UpstreamError::is_recoverable,
        )
        .await
    }

    async fn post_once(&self, api_key: &str, request: &ChatRequest<'_>) -> Result<Value, UpstreamError> {
        self.rate_limiter.until_ready().await;

        let url = self.endpoint();
        tracing::debug!(url = %url, category = request.inputs.category, "Posting chat request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            return Err(UpstreamError::from_status(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> UpstreamError {
    if e.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Http(e)
    }
}

#[async_trait]
impl DocumentSource for ChatClient {
    fn name(&self) -> &str {
        "chat"
    }

    async fn fetch_document(&self, category: NewsCategory) -> Result<Value, UpstreamError> {
        let request = self.request(category, &self.config.query);
        let envelope = self.post(&request).await?;
        tracing::info!(category = %category, "Received upstream document");
        Ok(envelope)
    }

    async fn health_check(&self) -> bool {
        let request = self.request(NewsCategory::Business, HEALTH_QUERY);
        match self.post(&request).await {
            Ok(envelope) => normalize(&envelope).is_ok(),
            Err(e) => {
                tracing::warn!(error = %e, "Upstream health check failed");
                false
            }
        }
    }
}
