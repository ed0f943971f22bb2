//! Domain-specific configuration modules

pub mod http;
pub mod poller;
pub mod retry;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main opwait configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OpwaitConfig {
    /// HTTP transport configuration
    #[serde(default)]
    pub http: http::HttpConfig,

    /// Transport retry configuration
    #[serde(default)]
    pub retry: retry::RetryConfig,

    /// Operation polling configuration
    #[serde(default)]
    pub poller: poller::PollerConfig,
}

impl OpwaitConfig {
    /// Validate all domain configurations
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.http.validate()?;
        self.retry.validate()?;
        self.poller.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = OpwaitConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
