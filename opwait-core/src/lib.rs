//! Core domain types for opwait
//!
//! This crate defines the shared vocabulary of the operation-completion
//! protocol: operation identifiers, the remote status vocabulary, terminal
//! outcomes, the operation status document, and the `StatusSource` seam
//! that transport implementations plug into.

pub mod error;
pub mod id;
pub mod operation;
pub mod outcome;
pub mod source;
pub mod status;

// Re-export commonly used types
pub use error::{ProtocolError, SourceError};
pub use id::OperationId;
pub use operation::{LogMessage, Operation, OperationError, SourceResource};
pub use outcome::Outcome;
pub use source::StatusSource;
pub use status::{RemoteState, TerminalStatus};
