use std::future::Future;
use tokio::time::{sleep, Duration};
use tracing::{error, warn};

use crate::config::settings::RetryConfig;

/// Bounded exponential backoff: the delay before retry `n` is
/// `unit * backoff_factor^n`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub backoff_factor: f64,
    pub unit: Duration,
    pub max_delay: Duration,
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            attempts: cfg.attempts(),
            backoff_factor: cfg.backoff_factor(),
            unit: Duration::from_millis(cfg.backoff_unit_ms()),
            max_delay: Duration::from_millis(cfg.max_backoff_ms()),
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `retry` (1-based)
    pub fn delay(&self, retry: u32) -> Duration {
        let exponent = i32::try_from(retry).unwrap_or(i32::MAX);
        let seconds = self.unit.as_secs_f64() * self.backoff_factor.powi(exponent);
        if !seconds.is_finite() || seconds >= self.max_delay.as_secs_f64() {
            return self.max_delay;
        }
        Duration::from_secs_f64(seconds)
    }

    /// Run `operation` up to `attempts` times.
    ///
    /// Errors are returned at once. A successful value is retried only while
    /// `retryable` holds for it; when attempts run out the last value is returned.
    pub async fn run_with_retry<F, Fut, T, E, R>(&self, mut operation: F, retryable: R) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: Fn(&T) -> bool,
    {
        let attempts = self.attempts.max(1);
        let mut attempt = 1;
        loop {
            let value = operation().await?;
            if !retryable(&value) {
                return Ok(value);
            }
            if attempt >= attempts {
                error!("all {attempt} attempts failed");
                return Ok(value);
            }
            let delay = self.delay(attempt);
            warn!("Attempt {attempt}/{attempts} failed, retrying in {:?}", delay);
            sleep(delay).await;
            attempt += 1;
        }
    }
}
