//! HTTP transport implementation

use crate::classifier::RetryClassifier;
use crate::config::TransportConfig;
use crate::errors::TransportError;
use crate::response::HttpResponse;
use opwait_resilience::{RetryError, RetryExecutor, RetryPolicy, Retryable};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// HTTP transport built once from explicit configuration.
///
/// One shared `reqwest::Client` per transport; default headers and proxy
/// settings come from [`TransportConfig`], not from ambient state.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: TransportConfig,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(TransportConfig::default())
    }

    /// Create a transport from configuration
    pub fn with_config(config: TransportConfig) -> Result<Self, TransportError> {
        debug!(
            timeout_secs = config.timeout.as_secs(),
            user_agent = %config.user_agent,
            "Creating HTTP transport"
        );

        let mut default_headers = HeaderMap::new();
        for (name, value) in &config.default_headers {
            let header_name = HeaderName::from_str(name)
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| TransportError::InvalidHeader(name.clone()))?;
            default_headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .redirect(reqwest::redirect::Policy::limited(
                config.max_redirects as usize,
            ))
            .default_headers(default_headers);

        if let Some(ref proxy) = config.proxy {
            let no_proxy = proxy
                .no_proxy
                .as_deref()
                .and_then(reqwest::NoProxy::from_string);
            if let Some(ref url) = proxy.http_proxy {
                builder = builder.proxy(reqwest::Proxy::http(url)?.no_proxy(no_proxy.clone()));
            }
            if let Some(ref url) = proxy.https_proxy {
                builder = builder.proxy(reqwest::Proxy::https(url)?.no_proxy(no_proxy));
            }
        }

        let client = builder.build()?;
        Ok(Self { client, config })
    }

    /// Transport configuration in effect
    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Issue a single GET and snapshot the response, whatever its status
    pub async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        debug!(%url, "Sending GET request");
        let response = self.client.get(url).send().await?;
        HttpResponse::from_reqwest(response).await
    }

    /// GET through the retry executor.
    ///
    /// Responses whose status is in the classifier's retryable set are
    /// turned into retryable errors; every other status is returned as a
    /// snapshot for the caller to branch on. After exhaustion the last
    /// error is surfaced inside [`TransportError::RetriesExhausted`].
    pub async fn get_with_retry(
        &self,
        url: &str,
        policy: &RetryPolicy,
        classifier: &RetryClassifier,
    ) -> Result<HttpResponse, TransportError> {
        let executor = RetryExecutor::new(policy.clone());

        let result = executor
            .execute(|| async {
                match self.get(url).await {
                    Ok(response) => {
                        let status = response.status().as_u16();
                        if classifier.retries_status(status) {
                            warn!(%url, status, "Retryable status from server");
                            Err(Classified {
                                retryable: true,
                                error: TransportError::Status {
                                    status,
                                    body: response.text(),
                                },
                            })
                        } else {
                            Ok(response)
                        }
                    }
                    Err(error) => {
                        let retryable = classifier.is_retryable(&error);
                        Err(Classified { retryable, error })
                    }
                }
            })
            .await;

        match result {
            Ok(response) => Ok(response),
            Err(RetryError::MaxAttemptsExceeded {
                attempts,
                last_error,
            }) => Err(TransportError::RetriesExhausted {
                attempts,
                last: Box::new(last_error.error),
            }),
            Err(RetryError::NonRetryableError(classified)) => Err(classified.error),
        }
    }
}

/// Transport error paired with the classifier's verdict, so the generic
/// retry executor can act on a configurable predicate
struct Classified {
    retryable: bool,
    error: TransportError,
}

impl fmt::Display for Classified {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.fmt(f)
    }
}

impl Retryable for Classified {
    fn is_retryable(&self) -> bool {
        self.retryable
    }
}
