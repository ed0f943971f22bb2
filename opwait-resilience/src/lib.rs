//! Resilience patterns for opwait
//!
//! This crate provides the retry policy, backoff strategies and the retry
//! executor used around every status fetch.

pub mod retry;

// Re-export commonly used types
pub use retry::{BackoffStrategy, RetryError, RetryExecutor, RetryPolicy, Retryable};
