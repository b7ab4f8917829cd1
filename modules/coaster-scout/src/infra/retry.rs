use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::warn;

use coaster_common::Config;

/// Bounded retry for a single external call site.
///
/// Delay before attempt `n + 1` is `base_delay * 3^n` plus up to half of
/// `base_delay` of random jitter. A zero base delay retries immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.retry_attempts, config.retry_base_delay)
    }

    /// Single attempt, no waiting.
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }

    pub fn backoff(&self, attempt: u32) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let exp = self.base_delay.saturating_mul(3u32.saturating_pow(attempt));
        let max_jitter = (self.base_delay.as_millis() / 2) as u64;
        let jitter = Duration::from_millis(rand::rng().random_range(0..=max_jitter));
        exp + jitter
    }
}

/// Run `f` until it succeeds, fails with a non-transient error, or the policy
/// runs out of attempts. The last error is returned as-is.
pub async fn retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    op: &str,
    is_transient: P,
    mut f: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt + 1 < policy.max_attempts && is_transient(&e) => {
                let backoff = policy.backoff(attempt);
                warn!(
                    op,
                    attempt = attempt + 1,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %e,
                    "Transient failure, retrying after backoff"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
