//! Transport error types

use opwait_core::SourceError;

/// Error type for transport operations
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A response with a status in the retryable set, surfaced as an error
    /// so the retry executor can act on it. The body is kept for
    /// diagnostics.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// All retry attempts were spent; carries the last observed error
    #[error("Retries exhausted after {attempts} attempts: {last}")]
    RetriesExhausted {
        attempts: u32,
        last: Box<TransportError>,
    },
}

impl TransportError {
    /// Whether this error is a connection-level failure
    pub fn is_connect(&self) -> bool {
        matches!(self, TransportError::Network(e) if e.is_connect())
    }

    /// Whether this error is a timeout at the HTTP layer
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Network(e) if e.is_timeout())
    }

    /// The HTTP status carried by this error, when there is one
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Network(e) => e.status().map(|s| s.as_u16()),
            TransportError::RetriesExhausted { last, .. } => last.status(),
            _ => None,
        }
    }
}

// Transport details degrade to seam-level messages at the core boundary
impl From<TransportError> for SourceError {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Status { status, body } => SourceError::Rejected { status, body },
            other => SourceError::Transport(other.to_string()),
        }
    }
}
