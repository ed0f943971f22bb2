//! Sleep schedules between status fetches

use opwait_config::domains::poller::{PollerConfig, ScheduleKind};
use std::time::Duration;

/// Sleep policy between polls.
///
/// No jitter here: concurrent pollers observe independent operations, so
/// synchronized wakeups are harmless. Jitter belongs to the transport
/// retry backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollSchedule {
    /// Same interval between every fetch
    Fixed(Duration),

    /// Interval doubles after each fetch: initial, 2x, 4x, ... capped
    Doubling { initial: Duration, cap: Duration },
}

impl PollSchedule {
    /// Delay to sleep after `completed_fetches` status fetches (1-indexed:
    /// the first sleep follows the first fetch)
    pub fn delay_for(&self, completed_fetches: u32) -> Duration {
        match self {
            PollSchedule::Fixed(interval) => *interval,
            PollSchedule::Doubling { initial, cap } => {
                let exponent = completed_fetches.saturating_sub(1).min(20);
                let delay = *initial * (1u32 << exponent);
                delay.min(*cap)
            }
        }
    }
}

impl Default for PollSchedule {
    fn default() -> Self {
        PollSchedule::Doubling {
            initial: Duration::from_millis(100),
            cap: Duration::from_secs(10),
        }
    }
}

impl From<&PollerConfig> for PollSchedule {
    fn from(config: &PollerConfig) -> Self {
        match config.schedule {
            ScheduleKind::Fixed => PollSchedule::Fixed(config.initial_interval),
            ScheduleKind::Doubling => PollSchedule::Doubling {
                initial: config.initial_interval,
                cap: config.max_interval,
            },
        }
    }
}
