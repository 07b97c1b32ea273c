//! Crate-level error type
//!
//! Upstream and extraction errors live in [`crate::utils::error`] next to the
//! code that raises them. [`Error`] wraps them for APIs that cross module
//! boundaries, such as the CLI and envelope parsing.

use std::io;
use thiserror::Error;

pub use crate::utils::error::{ExtractError, UpstreamError};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("Extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether retrying the same call may succeed
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Upstream(e) => e.is_recoverable(),
            Self::Extract(e) => e.is_recoverable(),
            Self::Io(_) => true,
            Self::Json(_) | Self::Config(_) => false,
        }
    }

    /// Process exit code for the CLI
    ///
    /// 2 for configuration problems, 3 for upstream failures, 4 for input
    /// that could not be read or decoded.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) | Self::Upstream(UpstreamError::NotConfigured(_)) => 2,
            Self::Upstream(_) => 3,
            Self::Extract(_) | Self::Io(_) | Self::Json(_) => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
