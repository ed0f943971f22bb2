//! Retry classification for transport errors
//!
//! Distinguishes retryable infrastructure failures from semantic
//! rejections. The default status set {403, 500, 503} mirrors the
//! environment this client targets: 403 is the proxy edge rejecting a
//! request, and 500/503 are a known task-service defect that has to be
//! polled through. The set is configuration, not a constant, so
//! deployments can stop masking 5xx the moment the upstream defect is
//! fixed.

use crate::errors::TransportError;
use opwait_config::domains::retry::RetryConfig;
use std::collections::HashSet;

/// Configurable retryable-or-not predicate over transport errors
#[derive(Debug, Clone)]
pub struct RetryClassifier {
    retry_on_status: HashSet<u16>,
    retry_on_connect: bool,
    retry_on_timeout: bool,
}

impl RetryClassifier {
    /// Create a classifier with an explicit status set
    pub fn new(retry_on_status: impl IntoIterator<Item = u16>) -> Self {
        Self {
            retry_on_status: retry_on_status.into_iter().collect(),
            retry_on_connect: true,
            retry_on_timeout: true,
        }
    }

    /// Classifier that only retries connection errors and timeouts, never
    /// HTTP statuses
    pub fn transport_only() -> Self {
        Self::new([])
    }

    /// Disable retrying of connection errors
    pub fn without_connect_retry(mut self) -> Self {
        self.retry_on_connect = false;
        self
    }

    /// Disable retrying of timeouts
    pub fn without_timeout_retry(mut self) -> Self {
        self.retry_on_timeout = false;
        self
    }

    /// Whether responses with this status should be turned into retryable
    /// errors
    pub fn retries_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    /// Whether the given transport error is retryable
    pub fn is_retryable(&self, error: &TransportError) -> bool {
        match error {
            TransportError::Status { status, .. } => self.retries_status(*status),
            TransportError::Network(_) => {
                (self.retry_on_connect && error.is_connect())
                    || (self.retry_on_timeout && error.is_timeout())
            }
            // Protocol and local errors are never transport noise
            _ => false,
        }
    }
}

impl Default for RetryClassifier {
    fn default() -> Self {
        Self::from(&RetryConfig::default())
    }
}

impl From<&RetryConfig> for RetryClassifier {
    fn from(config: &RetryConfig) -> Self {
        Self {
            retry_on_status: config.retry_on_status.iter().copied().collect(),
            retry_on_connect: config.retry_on_connect,
            retry_on_timeout: config.retry_on_timeout,
        }
    }
}
