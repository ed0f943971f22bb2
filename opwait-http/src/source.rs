//! Remote status source

use crate::classifier::RetryClassifier;
use crate::transport::HttpTransport;
use opwait_config::domains::retry::RetryConfig;
use opwait_core::{Operation, OperationId, SourceError, StatusSource};
use opwait_resilience::RetryPolicy;
use tracing::debug;
use url::Url;

/// [`StatusSource`] backed by the HTTP transport, bound to a base URL and
/// an operations path.
///
/// A 200 response is deserialized into an [`Operation`] document; any
/// other status that survives retry classification is surfaced as a
/// rejection carrying the body for diagnostics.
pub struct RemoteStatusSource {
    transport: HttpTransport,
    base_url: Url,
    operations_path: String,
    policy: RetryPolicy,
    classifier: RetryClassifier,
}

impl RemoteStatusSource {
    pub fn new(transport: HttpTransport, base_url: Url, operations_path: impl Into<String>) -> Self {
        Self {
            transport,
            base_url,
            operations_path: operations_path.into(),
            policy: RetryPolicy::default(),
            classifier: RetryClassifier::default(),
        }
    }

    /// Replace the retry policy applied to every status fetch
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the retry classifier applied to every status fetch
    pub fn with_classifier(mut self, classifier: RetryClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Build policy and classifier from the retry config domain
    pub fn with_retry_config(mut self, config: &RetryConfig) -> Self {
        self.classifier = RetryClassifier::from(config);
        self.policy = RetryPolicy {
            max_attempts: config.max_attempts,
            initial_delay: config.initial_delay,
            max_delay: config.max_delay,
            backoff_strategy: match config.backoff {
                opwait_config::domains::retry::BackoffKind::Fixed => {
                    opwait_resilience::BackoffStrategy::Fixed
                }
                opwait_config::domains::retry::BackoffKind::Linear => {
                    opwait_resilience::BackoffStrategy::Linear
                }
                opwait_config::domains::retry::BackoffKind::Exponential { base } => {
                    opwait_resilience::BackoffStrategy::Exponential { base }
                }
            },
            jitter: config.jitter,
        };
        self
    }

    /// URL of the status document for one operation
    fn status_url(&self, id: &OperationId) -> String {
        let path = format!(
            "{}/{}",
            self.operations_path.trim_end_matches('/'),
            id.as_str()
        );
        let mut url = self.base_url.clone();
        url.set_path(&path);
        url.to_string()
    }
}

#[async_trait::async_trait]
impl StatusSource for RemoteStatusSource {
    async fn fetch(&self, id: &OperationId) -> Result<Operation, SourceError> {
        let url = self.status_url(id);
        debug!(%url, operation = %id, "Fetching operation status");

        let response = self
            .transport
            .get_with_retry(&url, &self.policy, &self.classifier)
            .await
            .map_err(SourceError::from)?;

        if !response.status().is_success() {
            return Err(SourceError::Rejected {
                status: response.status().as_u16(),
                body: response.text(),
            });
        }

        response
            .json::<Operation>()
            .map_err(|e| SourceError::Malformed(e.to_string()))
    }
}
