//! Operation status document model

use crate::error::ProtocolError;
use crate::status::RemoteState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status document returned by the operations endpoint.
///
/// Only `id` and `state` are required; everything else is diagnostic
/// detail the server may or may not populate. The `state` field is kept as
/// the raw wire string and parsed on demand so that a document can be
/// deserialized and inspected even when the vocabulary check fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Opaque operation identifier
    pub id: String,

    /// Raw state string as reported by the server
    pub state: String,

    /// Machine name of the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-readable name of the operation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Completion percentage, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<u32>,

    /// Structured error detail, present once the operation has failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,

    /// The resource the operation acts on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_resource: Option<SourceResource>,

    /// Progress log emitted by the server
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub log_messages: Vec<LogMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    /// Canonical URI of this operation resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

impl Operation {
    /// Parse the raw state string against the fixed vocabulary
    pub fn remote_state(&self) -> Result<RemoteState, ProtocolError> {
        self.state.parse()
    }

    /// The server's error message, when one is attached
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }
}

/// Structured error detail attached to a failed operation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationError {
    /// Error message suitable for assertion diagnostics
    #[serde(rename = "error")]
    pub message: String,

    /// Numeric error code, when the server provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
}

/// Resource the operation acts on
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_uri: Option<String>,
}

/// One entry of the server-side progress log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogMessage {
    pub message: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_at: Option<DateTime<Utc>>,
}
