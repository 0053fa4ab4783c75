//! Bounded exponential-backoff retry
//!
//! Wraps a fallible async operation: on failure wait
//! `base_delay * 2^attempt_index` before the next attempt, and after the last
//! attempt's failure propagate the last error unchanged. Stateless and
//! reentrant; concurrent callers each get independent backoff sequences.

use std::future::Future;
use std::time::Duration;

/// Default attempt ceiling used by the pipeline executor.
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay used by the pipeline executor.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Runs `op` up to `max_retries` times with exponential backoff between
/// failures. The error type is propagated as-is so callers can distinguish
/// causes; nothing is wrapped or suppressed.
pub async fn retry<T, E, F, Fut>(mut op: F, max_retries: u32, base_delay: Duration) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = max_retries.max(1);
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= attempts {
                    return Err(err);
                }
                tokio::time::sleep(base_delay * 2u32.pow(attempt - 1)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_without_retrying() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<u32, String> = retry(
            move || {
                let counter = Arc::clone(&counter);
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(7)
                }
            },
            DEFAULT_MAX_RETRIES,
            DEFAULT_BASE_DELAY,
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_doubles_between_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let start = tokio::time::Instant::now();

        let result: Result<&str, String> = retry(
            move || {
                let counter = Arc::clone(&counter);
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("transient".to_string())
                    } else {
                        Ok("done")
                    }
                }
            },
            DEFAULT_MAX_RETRIES,
            DEFAULT_BASE_DELAY,
        )
        .await;

        // Two failures incur waits of 1000ms and 2000ms before the success.
        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_millis(3000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_propagates_last_error_after_final_attempt() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let result: Result<(), String> = retry(
            move || {
                let counter = Arc::clone(&counter);
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Err(format!("attempt {}", n))
                }
            },
            3,
            DEFAULT_BASE_DELAY,
        )
        .await;

        // Exactly three attempts, and the third failure comes back verbatim.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(result.unwrap_err(), "attempt 2");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_max_retries_still_runs_once() {
        let result: Result<u32, String> = retry(|| async { Ok(1) }, 0, DEFAULT_BASE_DELAY).await;
        assert_eq!(result.unwrap(), 1);
    }
}
