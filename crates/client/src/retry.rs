//! Retry envelope for failing asynchronous operations.
//!
//! Generic over the operation; reused by the persistence load path and the
//! catalog fetch path. On final failure the caller gets the classified
//! [`AppError`], never the raw transport error.

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Retry policy: how many extra attempts, and the fixed delay between them.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure.
    pub retry_count: u32,
    /// Fixed delay between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_count: 1,
            delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// A policy with the given number of extra attempts and the default delay.
    #[must_use]
    pub fn with_retry_count(retry_count: u32) -> Self {
        Self {
            retry_count,
            ..Self::default()
        }
    }
}

/// Run `operation`, retrying on failure up to `policy.retry_count` extra
/// times with a fixed delay between attempts.
///
/// The delay suspends the task (`tokio::time::sleep`); nothing busy-waits.
/// A retry sequence runs to completion; there is no cancellation.
///
/// # Errors
///
/// Returns the final failure classified into an [`AppError`] once the retry
/// budget is exhausted.
pub async fn with_retry<T, E, F, Fut>(mut operation: F, policy: RetryPolicy) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<AppError>,
{
    let mut remaining = policy.retry_count;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let err: AppError = err.into();
                if remaining == 0 {
                    return Err(err);
                }
                remaining -= 1;
                tracing::debug!(error = %err, remaining, "operation failed, retrying after delay");
                tokio::time::sleep(policy.delay).await;
            }
        }
    }
}
