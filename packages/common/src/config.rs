use std::time::Duration;

use serde::Deserialize;

use crate::retry::RetryPolicy;

/// Generative model client configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// API key for the model provider. Required, no default.
    pub api_key: String,
    /// Model identifier. Default: "gemini-1.5-flash".
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Provider REST endpoint. Default: "https://generativelanguage.googleapis.com".
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Total attempts per prompt, including the first. Default: 3.
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Per-attempt timeout in seconds. Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Backoff base in milliseconds. Default: 1000.
    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
    /// Backoff ceiling in milliseconds. Default: 60000.
    #[serde(default = "default_backoff_max_ms")]
    pub backoff_max_ms: u64,
}

fn default_model_name() -> String {
    "gemini-1.5-flash".into()
}
fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".into()
}
fn default_retry_attempts() -> u32 {
    3
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_backoff_base_ms() -> u64 {
    1000
}
fn default_backoff_max_ms() -> u64 {
    60_000
}

impl ModelConfig {
    /// Config with every optional field at its default.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_name: default_model_name(),
            base_url: default_base_url(),
            retry_attempts: default_retry_attempts(),
            timeout_secs: default_timeout_secs(),
            backoff_base_ms: default_backoff_base_ms(),
            backoff_max_ms: default_backoff_max_ms(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            Duration::from_millis(self.backoff_base_ms),
            Duration::from_millis(self.backoff_max_ms),
        )
    }
}
