//! Bounded retry with a fixed delay

use std::future::Future;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    /// Pause before every retry
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_millis(2000),
        }
    }
}

/// Run `op` until it succeeds or `policy.max_retries` retries are spent.
///
/// `op` receives the zero-based attempt number. `on_retry` is called with
/// the upcoming retry number (1-based) and the error that caused it, before
/// the delay. Attempts never overlap.
pub async fn retry<T, E, F, Fut, R>(policy: RetryPolicy, mut on_retry: R, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    R: FnMut(u32, &E),
{
    let mut attempt = 0;
    loop {
        match op(attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < policy.max_retries => {
                attempt += 1;
                on_retry(attempt, &e);
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
