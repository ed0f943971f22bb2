//! Bounded polling of operation status

use crate::schedule::PollSchedule;
use opwait_config::domains::poller::PollerConfig;
use opwait_core::{
    Operation, OperationId, Outcome, ProtocolError, RemoteState, SourceError, StatusSource,
    TerminalStatus,
};
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};
use tracing::{debug, warn};

/// Poll configuration: wall-clock deadline plus sleep schedule
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Deadline measured from poll start, independent of any single HTTP
    /// request timeout
    pub timeout: Duration,

    /// Sleep schedule between status fetches
    pub schedule: PollSchedule,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(600),
            schedule: PollSchedule::default(),
        }
    }
}

impl From<&PollerConfig> for PollConfig {
    fn from(config: &PollerConfig) -> Self {
        Self {
            timeout: config.timeout,
            schedule: PollSchedule::from(config),
        }
    }
}

/// Errors that abort a poll.
///
/// Neither a FAILED operation nor an elapsed deadline is an error; those
/// are [`Outcome`] values. Errors are infrastructure failures surviving
/// retry, and protocol violations.
#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Source(#[from] SourceError),
}

/// Observes operations until they reach a terminal state.
///
/// Each poll call owns only its identifier, deadline and schedule; many
/// operations can be polled concurrently with independent pollers and no
/// coordination. Dropping the poll future is cancellation; there is no
/// server-side cancel primitive to invoke.
#[derive(Debug, Clone, Default)]
pub struct Poller {
    config: PollConfig,
}

impl Poller {
    pub fn new(config: PollConfig) -> Self {
        Self { config }
    }

    /// Poll with an explicit timeout and fixed interval
    pub fn with_timeout(timeout: Duration, interval: Duration) -> Self {
        Self {
            config: PollConfig {
                timeout,
                schedule: PollSchedule::Fixed(interval),
            },
        }
    }

    /// Poll until the operation reaches SUCCEEDED or FAILED, or the
    /// deadline elapses.
    ///
    /// The deciding fetch incurs no sleep: an operation that is already
    /// terminal is reported after exactly one fetch. A FAILED operation is
    /// returned as a value, never raised; whether it constitutes a
    /// failure is the caller's decision.
    pub async fn poll<S>(&self, source: &S, id: &OperationId) -> Result<Outcome, PollError>
    where
        S: StatusSource + ?Sized,
    {
        self.poll_until(source, id, |operation| {
            Ok(match operation.remote_state()? {
                RemoteState::Succeeded => Some(TerminalStatus::Succeeded),
                RemoteState::Failed => Some(TerminalStatus::Failed),
                _ => None,
            })
        })
        .await
    }

    /// Poll until the reported progress reaches `percent` (or the
    /// operation finishes first).
    ///
    /// A SUCCEEDED operation satisfies any threshold; a FAILED one ends
    /// the wait with a Failed outcome since its progress will not advance.
    pub async fn poll_until_progress<S>(
        &self,
        source: &S,
        id: &OperationId,
        percent: u32,
    ) -> Result<Outcome, PollError>
    where
        S: StatusSource + ?Sized,
    {
        self.poll_until(source, id, move |operation| {
            let state = operation.remote_state()?;
            if state == RemoteState::Failed {
                return Ok(Some(TerminalStatus::Failed));
            }
            if state == RemoteState::Succeeded
                || operation.progress_percent.unwrap_or(0) >= percent
            {
                return Ok(Some(TerminalStatus::Succeeded));
            }
            Ok(None)
        })
        .await
    }

    /// Poll until the status document carries an error detail.
    ///
    /// Used when a test expects an operation to fail and wants the
    /// server's structured message for its assertion.
    pub async fn poll_for_error_detail<S>(
        &self,
        source: &S,
        id: &OperationId,
    ) -> Result<Outcome, PollError>
    where
        S: StatusSource + ?Sized,
    {
        self.poll_until(source, id, |operation| {
            operation.remote_state()?;
            if operation.error.is_some() {
                return Ok(Some(TerminalStatus::Failed));
            }
            Ok(None)
        })
        .await
    }

    /// Shared loop: fetch, decide, sleep per schedule, enforce the
    /// wall-clock deadline. Always performs at least one fetch, even with
    /// a zero timeout; once the deadline is reached no further fetch
    /// occurs.
    async fn poll_until<S, F>(
        &self,
        source: &S,
        id: &OperationId,
        mut decide: F,
    ) -> Result<Outcome, PollError>
    where
        S: StatusSource + ?Sized,
        F: FnMut(&Operation) -> Result<Option<TerminalStatus>, ProtocolError>,
    {
        let deadline = Instant::now() + self.config.timeout;
        let mut fetches: u32 = 0;

        loop {
            let operation = source.fetch(id).await?;
            fetches += 1;

            match decide(&operation)? {
                Some(TerminalStatus::Succeeded) => {
                    debug!(operation = %id, fetches, "Operation succeeded");
                    return Ok(Outcome::succeeded(operation, fetches));
                }
                Some(TerminalStatus::Failed) => {
                    debug!(
                        operation = %id,
                        fetches,
                        error = operation.error_message().unwrap_or("<none>"),
                        "Operation failed"
                    );
                    return Ok(Outcome::failed(operation, fetches));
                }
                Some(TerminalStatus::TimedOut) | None => {}
            }

            let now = Instant::now();
            if now >= deadline {
                warn!(operation = %id, state = %operation.state, fetches, "Poll deadline elapsed");
                return Ok(Outcome::timed_out(Some(operation), fetches));
            }

            let delay = self.config.schedule.delay_for(fetches).min(deadline - now);
            debug!(
                operation = %id,
                state = %operation.state,
                delay_ms = delay.as_millis() as u64,
                "Operation not terminal yet"
            );
            sleep(delay).await;

            if Instant::now() >= deadline {
                warn!(operation = %id, state = %operation.state, fetches, "Poll deadline elapsed");
                return Ok(Outcome::timed_out(Some(operation), fetches));
            }
        }
    }
}
