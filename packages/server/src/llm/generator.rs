use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use common::config::ModelConfig;
use common::retry::{RetryDecision, RetryPolicy};
use tracing::{error, info, instrument, warn};

use super::{GenerationError, GenerativeModel, ModelCallError};

/// Retryable failure of one attempt.
enum AttemptFailure {
    RateLimited(String),
    TimedOut,
    Other(String),
}

impl AttemptFailure {
    fn into_error(self, attempts: u32) -> GenerationError {
        match self {
            Self::RateLimited(_) => GenerationError::RateLimitExceeded { attempts },
            Self::TimedOut => GenerationError::Timeout { attempts },
            Self::Other(msg) => GenerationError::Model(msg),
        }
    }
}

impl fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited(msg) => write!(f, "rate limited: {msg}"),
            Self::TimedOut => f.write_str("timed out"),
            Self::Other(msg) => f.write_str(msg),
        }
    }
}

/// Calls a [`GenerativeModel`] with a per-attempt timeout and exponential backoff.
pub struct ResponseGenerator {
    model: Arc<dyn GenerativeModel>,
    policy: RetryPolicy,
    timeout: Duration,
}

impl ResponseGenerator {
    pub fn new(model: Arc<dyn GenerativeModel>, policy: RetryPolicy, timeout: Duration) -> Self {
        Self {
            model,
            policy,
            timeout,
        }
    }

    pub fn from_config(model: Arc<dyn GenerativeModel>, config: &ModelConfig) -> Self {
        Self::new(model, config.retry_policy(), config.timeout())
    }

    #[instrument(skip_all, fields(prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut attempt = 1;
        loop {
            let failure =
                match tokio::time::timeout(self.timeout, self.model.generate_content(prompt)).await
                {
                    Ok(Ok(text)) => {
                        if attempt > 1 {
                            info!(attempt, "Model call succeeded after retry");
                        }
                        return Ok(text);
                    }
                    Ok(Err(ModelCallError::InvalidRequest(msg))) => {
                        error!(attempt, error = %msg, "Model rejected request");
                        return Err(GenerationError::Model(msg));
                    }
                    Ok(Err(ModelCallError::RateLimited(msg))) => AttemptFailure::RateLimited(msg),
                    Ok(Err(ModelCallError::Other(msg))) => AttemptFailure::Other(msg),
                    Err(_) => AttemptFailure::TimedOut,
                };

            match self.policy.after_failure(attempt) {
                RetryDecision::Retry {
                    next_attempt,
                    delay,
                } => {
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %failure,
                        "Model call failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt = next_attempt;
                }
                RetryDecision::Exhausted => {
                    error!(attempt, error = %failure, "Model call failed, giving up");
                    return Err(failure.into_error(attempt));
                }
            }
        }
    }
}
