//! Backoff for upstream requests
//!
//! Doubling delays between attempts, capped, retrying only the errors the
//! caller marks as transient.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry schedule for one logical request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,

    /// Delay before the first retry
    pub base_delay: Duration,

    /// Upper bound for any single delay
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self::with_delays(3, 1000, 30_000)
    }
}

impl RetryConfig {
    pub fn with_delays(max_retries: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
            max_delay: Duration::from_millis(max_delay_ms),
        }
    }

    /// Delay before retry number `retry` (1-based)
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `operation` until it succeeds, fails permanently or runs out of retries
///
/// Errors for which `should_retry` is false are returned at once. Otherwise
/// the error of the last attempt is returned.
///
/// ```no_run
/// use newsdigest::utils::retry::{with_retry_if, RetryConfig};
///
/// # async fn example() -> Result<(), std::io::Error> {
/// let body = with_retry_if(
///     &RetryConfig::default(),
///     || async { Ok::<_, std::io::Error>("digest".to_string()) },
///     |e| e.kind() == std::io::ErrorKind::TimedOut,
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation: F,
    should_retry: P,
) -> Result<T, E>
where
    E: Display,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
{
    let mut retry = 0;

    loop {
        let error = match operation().await {
            Ok(value) => {
                if retry > 0 {
                    debug!(retries = retry, "Upstream request recovered");
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if !should_retry(&error) {
            warn!(error = %error, "Permanent upstream failure");
            return Err(error);
        }
        if retry >= config.max_retries {
            warn!(attempts = retry + 1, error = %error, "Giving up on upstream request");
            return Err(error);
        }

        retry += 1;
        let delay = config.delay_for(retry);
        warn!(
            retry,
            max_retries = config.max_retries,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Transient upstream failure, backing off"
        );
        tokio::time::sleep(delay).await;
    }
}
