//! Retry with exponential backoff for transient remote failures.
//!
//! The policy mirrors the platform's machine-operation retry: fixed
//! multiplier of 2, no randomization, 500ms initial interval capped at 5s
//! per attempt, and no bound on total attempts. Only errors matching the
//! caller's retryable predicate are retried; everything else is permanent.

use std::time::Duration;
use tracing::debug;

/// Exponential backoff schedule.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial_interval: Duration,
    multiplier: f64,
    max_interval: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(500),
            multiplier: 2.0,
            max_interval: Duration::from_secs(5),
        }
    }
}

impl Backoff {
    pub fn new(initial_interval: Duration, multiplier: f64, max_interval: Duration) -> Self {
        Self {
            initial_interval,
            multiplier,
            max_interval,
        }
    }

    /// The wait before attempt `attempt` (zero-based) is retried.
    pub fn interval(&self, attempt: u32) -> Duration {
        let interval = self
            .initial_interval
            .mul_f64(self.multiplier.powi(attempt as i32));
        interval.min(self.max_interval)
    }
}

/// Run `op` until it succeeds or fails with a non-retryable error.
pub fn retry<T, E, F>(backoff: &Backoff, is_retryable: impl Fn(&E) -> bool, mut op: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let mut attempt: u32 = 0;
    loop {
        match op() {
            Ok(value) => return Ok(value),
            Err(err) if is_retryable(&err) => {
                let wait = backoff.interval(attempt);
                debug!(attempt, wait_ms = wait.as_millis() as u64, error = %err, "retrying transient error");
                std::thread::sleep(wait);
                attempt = attempt.saturating_add(1);
            }
            Err(err) => return Err(err),
        }
    }
}
