//! Configuration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration
pub trait Validatable {
    /// Validate the configuration
    fn validate(&self) -> ConfigResult<()>;

    /// Get the domain name for error reporting
    fn domain_name(&self) -> &'static str;

    /// Helper to create a domain-specific validation error
    fn validation_error(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::DomainError {
            domain: self.domain_name().to_string(),
            message: message.into(),
        }
    }
}

/// Validate a required string field
pub fn validate_required_string(value: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if value.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}

/// Validate a positive number
pub fn validate_positive<T>(value: T, field_name: &str, domain: &str) -> ConfigResult<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value <= T::default() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} must be greater than 0, got {}", field_name, value),
        });
    }
    Ok(())
}

/// Validate a URL
pub fn validate_url(url: &str, field_name: &str, domain: &str) -> ConfigResult<()> {
    if url.is_empty() {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} cannot be empty", field_name),
        });
    }

    // Parse URL to validate format
    url::Url::parse(url).map_err(|e| ConfigError::DomainError {
        domain: domain.to_string(),
        message: format!("{} has invalid URL format: {}", field_name, e),
    })?;

    Ok(())
}

/// Validate that a value is a plausible HTTP status code
pub fn validate_status_code(code: u16, field_name: &str, domain: &str) -> ConfigResult<()> {
    if !(100..=599).contains(&code) {
        return Err(ConfigError::DomainError {
            domain: domain.to_string(),
            message: format!("{} has invalid HTTP status code {}", field_name, code),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_required_string() {
        assert!(validate_required_string("value", "field", "domain").is_ok());
        assert!(validate_required_string("", "field", "domain").is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive(1u64, "field", "domain").is_ok());
        assert!(validate_positive(0u64, "field", "domain").is_err());
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("https://scdev.example.com", "field", "domain").is_ok());
        assert!(validate_url("not-a-url", "field", "domain").is_err());
        assert!(validate_url("", "field", "domain").is_err());
    }

    #[test]
    fn test_validate_status_code() {
        assert!(validate_status_code(202, "field", "domain").is_ok());
        assert!(validate_status_code(99, "field", "domain").is_err());
        assert!(validate_status_code(700, "field", "domain").is_err());
    }
}
