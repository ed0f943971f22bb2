//! Poll outcome type

use crate::operation::Operation;
use crate::status::TerminalStatus;

/// Result of observing one operation to completion.
///
/// All three terminal values are carried as data: a FAILED operation is a
/// successful round trip with a negative result, and a timeout is the
/// deadline elapsing client-side. Neither is an error of the poll itself.
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Terminal value observed (or synthesized, for timeouts)
    pub status: TerminalStatus,

    /// Last status document observed, when at least one fetch completed
    pub operation: Option<Operation>,

    /// Number of status fetches performed during the poll
    pub fetches: u32,
}

impl Outcome {
    pub fn succeeded(operation: Operation, fetches: u32) -> Self {
        Self {
            status: TerminalStatus::Succeeded,
            operation: Some(operation),
            fetches,
        }
    }

    pub fn failed(operation: Operation, fetches: u32) -> Self {
        Self {
            status: TerminalStatus::Failed,
            operation: Some(operation),
            fetches,
        }
    }

    pub fn timed_out(operation: Option<Operation>, fetches: u32) -> Self {
        Self {
            status: TerminalStatus::TimedOut,
            operation,
            fetches,
        }
    }

    /// Whether the operation completed successfully
    pub fn is_succeeded(&self) -> bool {
        self.status.is_success()
    }

    /// Server-provided error message from the last observed document,
    /// suitable for assertion diagnostics
    pub fn error_detail(&self) -> Option<&str> {
        self.operation.as_ref().and_then(|op| op.error_message())
    }

    /// Last observed progress percentage, when the server reports one
    pub fn progress_percent(&self) -> Option<u32> {
        self.operation.as_ref().and_then(|op| op.progress_percent)
    }
}
