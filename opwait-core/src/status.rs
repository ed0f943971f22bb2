//! Remote status vocabulary and terminal outcomes

use crate::error::ProtocolError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status vocabulary reported by the remote operations endpoint.
///
/// Parsed case-insensitively against a fixed vocabulary; a string outside
/// it is a protocol violation, never silently mapped. `INITIALIZED` is
/// emitted by the control plane before `RUNNING` and is non-terminal like
/// `PENDING`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteState {
    Initialized,
    Pending,
    Running,
    Succeeded,
    Failed,
}

impl RemoteState {
    /// Get the wire representation of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteState::Initialized => "INITIALIZED",
            RemoteState::Pending => "PENDING",
            RemoteState::Running => "RUNNING",
            RemoteState::Succeeded => "SUCCEEDED",
            RemoteState::Failed => "FAILED",
        }
    }

    /// Whether the server considers this state final
    pub fn is_terminal(&self) -> bool {
        matches!(self, RemoteState::Succeeded | RemoteState::Failed)
    }
}

impl fmt::Display for RemoteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RemoteState {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INITIALIZED" => Ok(RemoteState::Initialized),
            "PENDING" => Ok(RemoteState::Pending),
            "RUNNING" => Ok(RemoteState::Running),
            "SUCCEEDED" => Ok(RemoteState::Succeeded),
            "FAILED" => Ok(RemoteState::Failed),
            _ => Err(ProtocolError::UnknownState(s.to_string())),
        }
    }
}

/// Terminal value observed by the client for one tracked operation.
///
/// `TimedOut` is client-synthesized: the poll deadline elapsed before the
/// server reported a terminal state. All three are values, not errors;
/// whether `Failed` or `TimedOut` constitutes a failure is the caller's
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalStatus {
    Succeeded,
    Failed,
    TimedOut,
}

impl TerminalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalStatus::Succeeded => "SUCCEEDED",
            TerminalStatus::Failed => "FAILED",
            TerminalStatus::TimedOut => "TIMEOUT",
        }
    }

    /// Whether the operation completed successfully
    pub fn is_success(&self) -> bool {
        matches!(self, TerminalStatus::Succeeded)
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_state_case_insensitive() {
        assert_eq!("succeeded".parse::<RemoteState>().unwrap(), RemoteState::Succeeded);
        assert_eq!("Running".parse::<RemoteState>().unwrap(), RemoteState::Running);
        assert_eq!("FAILED".parse::<RemoteState>().unwrap(), RemoteState::Failed);
        assert_eq!("initialized".parse::<RemoteState>().unwrap(), RemoteState::Initialized);
    }

    #[test]
    fn test_remote_state_unknown_is_protocol_violation() {
        let err = "CANCELLED".parse::<RemoteState>().unwrap_err();
        assert_eq!(err, ProtocolError::UnknownState("CANCELLED".to_string()));
    }

    #[test]
    fn test_terminal_states() {
        assert!(RemoteState::Succeeded.is_terminal());
        assert!(RemoteState::Failed.is_terminal());
        assert!(!RemoteState::Running.is_terminal());
        assert!(!RemoteState::Pending.is_terminal());
        assert!(!RemoteState::Initialized.is_terminal());
    }

    #[test]
    fn test_terminal_status_display() {
        assert_eq!(TerminalStatus::TimedOut.to_string(), "TIMEOUT");
        assert!(TerminalStatus::Succeeded.is_success());
        assert!(!TerminalStatus::TimedOut.is_success());
    }
}
