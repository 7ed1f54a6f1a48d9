//! Retry with exponential back-off and jitter for source fetches.

use std::future::Future;
use std::time::Duration;

use crate::error::SourceError;

/// Returns `true` for errors worth retrying after a back-off delay:
/// network-level failures (timeout, connection reset) and HTTP 5xx.
///
/// API-level errors, parse failures, and IO errors are returned
/// immediately; retrying cannot fix them.
fn is_retriable(err: &SourceError) -> bool {
    match err {
        SourceError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        SourceError::Feed(_)
        | SourceError::Api(_)
        | SourceError::Io(_)
        | SourceError::FeedTable(_) => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on
/// transient errors, sleeping `backoff_base_ms * 2^(attempt-1)` (±25 %
/// jitter, capped at 30 s) between attempts.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    const MAX_DELAY_MS: u64 = 30_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient source error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn non_retriable_error_returns_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<(), SourceError> = retry_with_backoff(3, 1, || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(SourceError::Api("bad key".to_string())) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn success_passes_through() {
        let result = retry_with_backoff(3, 1, || async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }
}
