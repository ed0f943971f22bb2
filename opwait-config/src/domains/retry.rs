//! Transport retry configuration
//!
//! Controls how transient infrastructure failures are retried. The
//! retryable status set is configuration, not a constant: 500/503 are
//! retried by default to work around a known defect in the upstream task
//! service, and deployments that want those surfaced as real errors can
//! narrow the set to `[403]` or empty it.

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_status_code, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Transport retry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial delay between attempts
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_initial_delay"
    )]
    pub initial_delay: Duration,

    /// Maximum delay between attempts
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_max_delay"
    )]
    pub max_delay: Duration,

    /// Backoff progression between attempts
    #[serde(default)]
    pub backoff: BackoffKind,

    /// Whether to add jitter to retry delays
    #[serde(default = "crate::domains::utils::default_false")]
    pub jitter: bool,

    /// HTTP statuses treated as retryable infrastructure failures
    #[serde(default = "default_retry_on_status")]
    pub retry_on_status: Vec<u16>,

    /// Whether connection-level errors are retryable
    #[serde(default = "crate::domains::utils::default_true")]
    pub retry_on_connect: bool,

    /// Whether read timeouts are retryable
    #[serde(default = "crate::domains::utils::default_true")]
    pub retry_on_timeout: bool,
}

/// Backoff progression kinds
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BackoffKind {
    /// Fixed delay between attempts
    #[default]
    Fixed,

    /// Linear increase: delay = initial_delay * attempt
    Linear,

    /// Exponential increase: delay = initial_delay * base^(attempt-1)
    Exponential { base: f64 },
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff: BackoffKind::Fixed,
            jitter: false,
            retry_on_status: default_retry_on_status(),
            retry_on_connect: true,
            retry_on_timeout: true,
        }
    }
}

impl Validatable for RetryConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(self.max_attempts, "max_attempts", self.domain_name())?;
        validate_positive(
            self.initial_delay.as_secs(),
            "initial_delay",
            self.domain_name(),
        )?;

        if self.max_delay < self.initial_delay {
            return Err(self.validation_error("max_delay must not be less than initial_delay"));
        }

        if let BackoffKind::Exponential { base } = self.backoff {
            if base <= 1.0 {
                return Err(self.validation_error(format!(
                    "exponential backoff base must be greater than 1.0, got {}",
                    base
                )));
            }
        }

        for status in &self.retry_on_status {
            validate_status_code(*status, "retry_on_status", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "retry"
    }
}

// Default value functions
fn default_max_attempts() -> u32 {
    10
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(30)
}

fn default_retry_on_status() -> Vec<u16> {
    vec![403, 500, 503]
}
