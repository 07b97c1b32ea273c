//! Error types for newsdigest
//!
//! This module defines the domain error types used throughout the application.

use serde::Serialize;
use thiserror::Error;

use crate::models::NewsCategory;

/// Errors that can occur while talking to the upstream chat API
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request or gateway timeout
    #[error("Request timeout")]
    Timeout,

    /// Too many requests
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Token or request quota exhausted
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Prompt plus document exceeded the model context window
    #[error("Context length exceeded: {0}")]
    ContextLength(String),

    /// Server error with status code
    #[error("Server error: {0}")]
    Server(u16),

    /// Any other non-success status
    #[error("Unexpected status {0}: {1}")]
    Status(u16, String),

    /// Response body could not be decoded
    #[error("Decoding error: {0}")]
    Decode(String),

    /// Client is not configured for live requests
    #[error("Missing configuration: {0}")]
    NotConfigured(String),
}

impl UpstreamError {
    /// Whether a retry may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout | Self::RateLimited | Self::Server(_)
        )
    }

    /// Map a non-success response to an error kind.
    ///
    /// Quota and context-length failures are reported by the upstream
    /// in the body, sometimes behind a 400 and sometimes behind a 429.
    pub fn from_status(status: u16, body: &str) -> Self {
        let lowered = body.to_lowercase();

        if status == 408 || status == 504 {
            return Self::Timeout;
        }
        if lowered.contains("quota") || lowered.contains("tpm") {
            return Self::QuotaExceeded(truncate_body(body));
        }
        if lowered.contains("context") {
            return Self::ContextLength(truncate_body(body));
        }
        match status {
            429 => Self::RateLimited,
            500..=599 => Self::Server(status),
            _ => Self::Status(status, truncate_body(body)),
        }
    }
}

fn truncate_body(body: &str) -> String {
    super::truncate_chars(body.trim(), 200)
}

/// Extraction outcomes.
///
/// Only [`ExtractError::NoContent`] is ever returned as an `Err`; the other
/// variants are degraded outcomes collected in the extraction report.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExtractError {
    /// Envelope contained no text
    #[error("No text content in upstream response")]
    NoContent,

    /// No category marker matched anywhere in the document
    #[error("No category sections recognized")]
    NoSectionsRecognized,

    /// A recognized section produced no items
    #[error("Section {category} produced no items")]
    EmptySection { category: NewsCategory },

    /// A block lacked a field; a placeholder was substituted or the block dropped
    #[error("Block in {category} is missing {field}")]
    MalformedBlock {
        category: NewsCategory,
        field: &'static str,
    },
}

impl ExtractError {
    /// Whether the pipeline still produced a usable (possibly degraded) result
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::NoContent)
    }
}
