//! Error types shared across the protocol

use thiserror::Error;

/// Violations of the remote operation contract.
///
/// These are fatal: they indicate the remote API changed shape, and must
/// never be retried as if they were transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    /// An accepted response carried no operation identifier
    #[error("accepted response carries no operation identifier (no Location header, no taskUri field)")]
    MissingIdentifier,

    /// The status document used a state string outside the known vocabulary
    #[error("unknown operation state '{0}'")]
    UnknownState(String),

    /// The status document could not be interpreted
    #[error("malformed operation document: {0}")]
    MalformedDocument(String),
}

/// Errors surfaced by a [`crate::StatusSource`] when fetching a status
/// document.
///
/// Transport details are degraded to messages at this seam so that core
/// stays free of any HTTP client dependency.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The fetch failed at the transport layer (after any retries)
    #[error("transport error: {0}")]
    Transport(String),

    /// The status endpoint answered with a non-success status
    #[error("status fetch rejected with HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The response body was not a valid operation document
    #[error("malformed operation document: {0}")]
    Malformed(String),
}
