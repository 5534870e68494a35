//! Configuration validation rules.
//!
//! - The command timeout must be positive
//! - `ios.min_runtime` must be `major[.minor]`
//! - Custom requirements need a non-empty title and command

use crate::config::schema::PreflightConfig;
use crate::error::{PreflightError, Result};

/// Validation error with context.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: impl Into<String>) -> Self {
        Self {
            rule: rule.to_string(),
            message: message.into(),
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every problem rather than stopping at the first one.
pub fn validate_config(config: &PreflightConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.command_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "invalid-timeout",
            "command_timeout_secs must be greater than zero",
        ));
    }

    if config.ios.min_runtime_version().is_none() {
        errors.push(ValidationError::new(
            "invalid-min-runtime",
            format!(
                "ios.min_runtime '{}' is not a version like '13.0'",
                config.ios.min_runtime
            ),
        ));
    }

    for (index, req) in config.requirements.iter().enumerate() {
        if req.title.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-title",
                format!("requirements[{}] has an empty title", index),
            ));
        }
        if req.command.trim().is_empty() {
            errors.push(ValidationError::new(
                "missing-command",
                format!("requirement '{}' has an empty command", req.title),
            ));
        }
    }

    errors
}

/// Validate a configuration, failing with all problems joined together.
pub fn validate(config: &PreflightConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    Err(PreflightError::ConfigValidationError {
        message: errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; "),
    })
}
