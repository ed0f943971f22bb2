//! Configuration loading and environment variable handling

use crate::domains::OpwaitConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::Path;

/// Configuration loader with environment variable support
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "OPWAIT".to_string(),
        }
    }

    /// Create a new config loader with custom prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<OpwaitConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: OpwaitConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<OpwaitConfig> {
        let mut config = OpwaitConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<OpwaitConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut OpwaitConfig) -> ConfigResult<()> {
        self.apply_http_overrides(&mut config.http)?;
        self.apply_retry_overrides(&mut config.retry)?;
        self.apply_poller_overrides(&mut config.poller)?;
        Ok(())
    }

    /// Apply HTTP config overrides
    fn apply_http_overrides(
        &self,
        config: &mut crate::domains::http::HttpConfig,
    ) -> ConfigResult<()> {
        if let Ok(timeout) = self.get_env_var("HTTP_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_TIMEOUT: {}", e)))?;
            config.timeout = std::time::Duration::from_secs(seconds);
        }

        if let Ok(user_agent) = self.get_env_var("HTTP_USER_AGENT") {
            config.user_agent = user_agent;
        }

        if let Ok(verify_ssl) = self.get_env_var("HTTP_VERIFY_SSL") {
            config.verify_ssl = verify_ssl
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid HTTP_VERIFY_SSL: {}", e)))?;
        }

        Ok(())
    }

    /// Apply retry config overrides
    fn apply_retry_overrides(
        &self,
        config: &mut crate::domains::retry::RetryConfig,
    ) -> ConfigResult<()> {
        if let Ok(attempts) = self.get_env_var("RETRY_MAX_ATTEMPTS") {
            config.max_attempts = attempts
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid RETRY_MAX_ATTEMPTS: {}", e)))?;
        }

        if let Ok(delay) = self.get_env_var("RETRY_INITIAL_DELAY") {
            let seconds: u64 = delay.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid RETRY_INITIAL_DELAY: {}", e))
            })?;
            config.initial_delay = std::time::Duration::from_secs(seconds);
        }

        if let Ok(statuses) = self.get_env_var("RETRY_ON_STATUS") {
            config.retry_on_status = statuses
                .split(',')
                .map(|s| {
                    s.trim().parse().map_err(|e| {
                        ConfigError::EnvError(format!("Invalid RETRY_ON_STATUS '{}': {}", s, e))
                    })
                })
                .collect::<ConfigResult<Vec<u16>>>()?;
        }

        Ok(())
    }

    /// Apply poller config overrides
    fn apply_poller_overrides(
        &self,
        config: &mut crate::domains::poller::PollerConfig,
    ) -> ConfigResult<()> {
        if let Ok(timeout) = self.get_env_var("POLL_TIMEOUT") {
            let seconds: u64 = timeout
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid POLL_TIMEOUT: {}", e)))?;
            config.timeout = std::time::Duration::from_secs(seconds);
        }

        if let Ok(interval) = self.get_env_var("POLL_INTERVAL_MS") {
            let millis: u64 = interval
                .parse()
                .map_err(|e| ConfigError::EnvError(format!("Invalid POLL_INTERVAL_MS: {}", e)))?;
            config.initial_interval = std::time::Duration::from_millis(millis);
        }

        if let Ok(status) = self.get_env_var("POLL_ACCEPTED_STATUS") {
            config.accepted_status = status.parse().map_err(|e| {
                ConfigError::EnvError(format!("Invalid POLL_ACCEPTED_STATUS: {}", e))
            })?;
        }

        if let Ok(path) = self.get_env_var("POLL_OPERATIONS_PATH") {
            config.operations_path = path;
        }

        Ok(())
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(format!("{}_{}", self.prefix, name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    #[test]
    fn test_from_env_defaults() {
        let loader = ConfigLoader::with_prefix("OPWAIT_TEST_NONE");
        let config = loader.from_env().unwrap();
        assert_eq!(config.poller.accepted_status, 202);
    }

    #[test]
    fn test_env_overrides() {
        temp_env::with_vars(
            [
                ("OPWAIT_HTTP_TIMEOUT", Some("60")),
                ("OPWAIT_RETRY_MAX_ATTEMPTS", Some("3")),
                ("OPWAIT_RETRY_ON_STATUS", Some("403, 502")),
                ("OPWAIT_POLL_TIMEOUT", Some("120")),
            ],
            || {
                let loader = ConfigLoader::new();
                let config = loader.from_env().unwrap();
                assert_eq!(config.http.timeout, Duration::from_secs(60));
                assert_eq!(config.retry.max_attempts, 3);
                assert_eq!(config.retry.retry_on_status, vec![403, 502]);
                assert_eq!(config.poller.timeout, Duration::from_secs(120));
            },
        );
    }

    #[test]
    fn test_invalid_env_value_rejected() {
        temp_env::with_vars([("OPWAIT_RETRY_MAX_ATTEMPTS", Some("ten"))], || {
            let loader = ConfigLoader::new();
            assert!(matches!(
                loader.from_env(),
                Err(ConfigError::EnvError(_))
            ));
        });
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "retry:\n  max_attempts: 5\npoller:\n  timeout: 300\n  operations_path: /api/v1/ops\n"
        )
        .unwrap();

        let loader = ConfigLoader::with_prefix("OPWAIT_TEST_NONE");
        let config = loader.from_file(file.path()).unwrap();
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.poller.timeout, Duration::from_secs(300));
        assert_eq!(config.poller.operations_path, "/api/v1/ops");
        // Untouched domains keep their defaults
        assert_eq!(config.http.max_redirects, 10);
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "retry: [not, a, mapping").unwrap();

        let loader = ConfigLoader::with_prefix("OPWAIT_TEST_NONE");
        assert!(loader.from_file(file.path()).is_err());
    }
}
