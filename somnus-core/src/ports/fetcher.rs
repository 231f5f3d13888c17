// somnus-core/src/ports/fetcher.rs

// What the acquisition use case needs: "give me the bytes behind this
// location". Whether they come over HTTP or from the local disk is an
// adapter concern (infrastructure/adapters).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Typed result of a single fetch attempt. Retry decisions are made on the
/// variant, never on error message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Fetched(Vec<u8>),
    /// Worth retrying: connection failure, timeout, 5xx, 429.
    Transient(String),
    /// The resource does not exist (HTTP 404/410, missing file).
    NotFound(String),
    /// Any other refusal (e.g. 401/403). Not retried.
    Rejected { status: u16, location: String },
}

impl FetchOutcome {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchOutcome::Transient(_))
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> FetchOutcome;
}

/// How often and how patiently a `Transient` outcome is retried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RetryPolicy {
    #[validate(range(min = 1, message = "at least one attempt is required"))]
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    #[validate(range(min = 1.0, message = "backoff multiplier must be >= 1"))]
    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            multiplier: default_multiplier(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}
fn default_initial_backoff_ms() -> u64 {
    500
}
fn default_multiplier() -> f64 {
    2.0
}

impl RetryPolicy {
    /// Pause before attempt `attempt + 1` (`attempt` is 1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt.saturating_sub(1) as i32);
        Duration::from_millis((self.initial_backoff_ms as f64 * factor).round() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_geometrically() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_millis(500));
        assert_eq!(policy.backoff(2), Duration::from_millis(1000));
        assert_eq!(policy.backoff(3), Duration::from_millis(2000));
    }

    #[test]
    fn test_zero_attempts_is_invalid() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        assert!(policy.validate().is_err());
    }
}
