//! Operation completion protocol for opwait
//!
//! Two responsibilities: extracting the operation identifier from an
//! initiating response ([`initiation`]), and polling the status source
//! until the operation reaches a terminal state under a wall-clock
//! deadline ([`poller`]).

pub mod initiation;
pub mod poller;
pub mod schedule;

// Re-export main types
pub use initiation::{initiated, initiated_as, InitiationResult, Rejection};
pub use poller::{PollConfig, PollError, Poller};
pub use schedule::PollSchedule;
