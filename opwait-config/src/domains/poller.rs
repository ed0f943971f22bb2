//! Operation polling configuration

use crate::error::ConfigResult;
use crate::validation::{
    validate_positive, validate_required_string, validate_status_code, Validatable,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Operation polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Wall-clock deadline for one poll, measured from poll start
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_timeout"
    )]
    pub timeout: Duration,

    /// Sleep schedule between status fetches
    #[serde(default)]
    pub schedule: ScheduleKind,

    /// Initial sleep interval between status fetches
    #[serde(
        with = "crate::domains::utils::serde_duration_ms",
        default = "default_initial_interval"
    )]
    pub initial_interval: Duration,

    /// Cap on the sleep interval when the schedule grows
    #[serde(
        with = "crate::domains::utils::serde_duration",
        default = "default_max_interval"
    )]
    pub max_interval: Duration,

    /// HTTP status that marks an initiating response as accepted
    #[serde(default = "default_accepted_status")]
    pub accepted_status: u16,

    /// Path of the operations collection on the remote service
    #[serde(default = "default_operations_path")]
    pub operations_path: String,
}

/// Sleep schedule kinds
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Same interval between every fetch
    Fixed,

    /// Interval doubles after each fetch, capped at max_interval
    #[default]
    Doubling,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            schedule: ScheduleKind::Doubling,
            initial_interval: default_initial_interval(),
            max_interval: default_max_interval(),
            accepted_status: default_accepted_status(),
            operations_path: default_operations_path(),
        }
    }
}

impl Validatable for PollerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(
            self.initial_interval.as_millis(),
            "initial_interval",
            self.domain_name(),
        )?;

        if self.max_interval < self.initial_interval {
            return Err(self.validation_error("max_interval must not be less than initial_interval"));
        }

        validate_status_code(self.accepted_status, "accepted_status", self.domain_name())?;
        validate_required_string(&self.operations_path, "operations_path", self.domain_name())?;

        if !self.operations_path.starts_with('/') {
            return Err(self.validation_error("operations_path must start with '/'"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "poller"
    }
}

// Default value functions
fn default_timeout() -> Duration {
    Duration::from_secs(600)
}

fn default_initial_interval() -> Duration {
    Duration::from_millis(100)
}

fn default_max_interval() -> Duration {
    Duration::from_secs(10)
}

fn default_accepted_status() -> u16 {
    202
}

fn default_operations_path() -> String {
    "/api/v1/tasks".to_string()
}
