use std::time::Duration;

/// Outcome of consulting a [`RetryPolicy`] after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for `delay`, then run attempt `next_attempt`.
    Retry { next_attempt: u32, delay: Duration },
    /// No attempts left.
    Exhausted,
}

/// Bounded retry with exponential backoff.
///
/// Attempts are numbered from 1. `max_attempts` counts every call, including
/// the first one, so a policy with `max_attempts = 3` sleeps at most twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            max_delay,
        }
    }

    /// Decide what to do after `attempt` failed.
    pub fn after_failure(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::Exhausted;
        }
        RetryDecision::Retry {
            next_attempt: attempt + 1,
            delay: calculate_backoff(
                attempt,
                self.base_delay.as_millis() as u64,
                self.max_delay.as_millis() as u64,
            ),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1), Duration::from_secs(60))
    }
}

/// Calculate the exponential backoff delay after a failed attempt.
///
/// Formula: `min(base_ms * 2^attempt, max_ms)`
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let exp_factor = 2u64.saturating_pow(attempt);
    let delay_ms = base_ms.saturating_mul(exp_factor).min(max_ms);
    Duration::from_millis(delay_ms)
}
