//! Integration tests module
//!
//! End-to-end tests for newsdigest, including:
//! - Document to item extraction across digest layouts
//! - Upstream client behavior against a mock chat API
//! - Feed fan-out and catalog fallback

pub mod error_scenarios;
pub mod fixtures;
pub mod pipeline_test;
