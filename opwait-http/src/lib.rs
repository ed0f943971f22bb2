//! HTTP transport for opwait
//!
//! This crate provides the reqwest-based transport: client construction
//! from configuration, owned response snapshots, the transport error
//! taxonomy with its retry classification, a shared retrying GET wrapper,
//! and the remote status source bound to a base URL.

pub mod classifier;
pub mod config;
pub mod errors;
pub mod response;
pub mod source;
pub mod transport;

// Re-export main types for convenience
pub use classifier::RetryClassifier;
pub use config::{ProxyConfig, TransportConfig};
pub use errors::TransportError;
pub use response::HttpResponse;
pub use source::RemoteStatusSource;
pub use transport::HttpTransport;
