//! Operation identifier newtype

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for a server-tracked operation (newtype pattern for
/// type safety).
///
/// The remote contract only promises an opaque trailing path segment in the
/// `Location` header or `taskUri` field, so this wraps a `String` rather
/// than a parsed UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(String);

impl OperationId {
    /// Create an identifier from a raw string
    pub fn new(id: impl Into<String>) -> Self {
        OperationId(id.into())
    }

    /// Parse an identifier from an operation URI, taking the trailing path
    /// segment (e.g. `/api/v1/tasks/abc-123` yields `abc-123`)
    pub fn from_uri(uri: &str) -> Result<Self, ProtocolError> {
        let segment = uri
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();
        if segment.is_empty() {
            return Err(ProtocolError::MissingIdentifier);
        }
        Ok(OperationId(segment.to_string()))
    }

    /// Get the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for OperationId {
    fn from(id: String) -> Self {
        OperationId(id)
    }
}

impl From<&str> for OperationId {
    fn from(id: &str) -> Self {
        OperationId(id.to_string())
    }
}
