//! Common utilities and helper functions
//!
//! This module provides shared utilities used across the application.

pub mod error;
pub mod retry;

use url::Url;

/// Extract the lowercase host from a URL
pub fn extract_host(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()?
        .host_str()
        .map(|host| host.to_lowercase())
}

/// Keep the leading `max_chars` characters, appending `...` when cut
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Distance in characters between two byte offsets of `text`
pub fn char_distance(text: &str, a: usize, b: usize) -> usize {
    let (start, end) = if a <= b { (a, b) } else { (b, a) };
    text.get(start..end)
        .map(|span| span.chars().count())
        .unwrap_or(usize::MAX)
}

/// Byte offset of the char boundary at most `max_chars` characters before `end`
pub fn floor_chars_back(text: &str, end: usize, max_chars: usize) -> usize {
    text[..end]
        .char_indices()
        .rev()
        .nth(max_chars.saturating_sub(1))
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}
