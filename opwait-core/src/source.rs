//! Status source seam
//!
//! The trait lives in core rather than the poller crate so that transport
//! implementations can depend on it without a cycle.

use crate::error::SourceError;
use crate::id::OperationId;
use crate::operation::Operation;

/// A get-status callable bound to a base URL and operations path.
///
/// Implementations fetch the current status document for an operation.
/// The poller treats the source as the single source of truth and never
/// mutates the operation.
#[async_trait::async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetch the current status document for `id`
    async fn fetch(&self, id: &OperationId) -> Result<Operation, SourceError>;
}
