//! Error types for preflight operations.
//!
//! This module defines [`PreflightError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A requirement that is not met is *data*, not an error: it is reported
//!   through [`CheckOutcome`](crate::requirements::CheckOutcome) and ends up
//!   in the setup report with `has_passed == false`.
//! - `PreflightError` is reserved for misuse of the engine (no requirements,
//!   colliding titles), invalid configuration, and command-layer failures.
//! - Use `anyhow::Error` (via `PreflightError::Other`) for unexpected errors.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for preflight operations.
#[derive(Debug, Error)]
pub enum PreflightError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Unrecognized value for the platform flag.
    #[error("Invalid platform '{value}': expected 'ios' or 'android'")]
    InvalidPlatform { value: String },

    /// A setup was executed with nothing to check.
    #[error("No requirements registered for setup '{setup}'")]
    NoRequirements { setup: String },

    /// Two requirement titles differ only by case.
    #[error("Requirement '{title}' collides with already registered '{existing}'")]
    DuplicateRequirement { title: String, existing: String },

    /// A requirement could not be registered.
    #[error("Invalid requirement: {message}")]
    InvalidRequirement { message: String },

    /// Shell command exited unsuccessfully or could not be spawned.
    #[error("Command failed{}: {command}{}", format_code(.code), format_detail(.detail))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        detail: Option<String>,
    },

    /// Shell command did not finish within its time limit.
    #[error("Command timed out after {timeout_secs}s: {command}")]
    CommandTimedOut { command: String, timeout_secs: u64 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

fn format_code(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!(" with exit code {}", c),
        None => String::new(),
    }
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(d) if !d.is_empty() => format!(" ({})", d),
        _ => String::new(),
    }
}

impl PreflightError {
    /// Whether this error means the engine itself was misused or misconfigured,
    /// as opposed to a collaborator failing.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound { .. }
                | Self::ConfigParseError { .. }
                | Self::ConfigValidationError { .. }
                | Self::InvalidPlatform { .. }
                | Self::NoRequirements { .. }
                | Self::DuplicateRequirement { .. }
                | Self::InvalidRequirement { .. }
        )
    }
}

/// Result type alias for preflight operations.
pub type Result<T> = std::result::Result<T, PreflightError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = PreflightError::ConfigNotFound {
            path: PathBuf::from("/foo/preflight.yml"),
        };
        assert!(err.to_string().contains("/foo/preflight.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = PreflightError::ConfigParseError {
            path: PathBuf::from("/config.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/config.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn invalid_platform_displays_value() {
        let err = PreflightError::InvalidPlatform {
            value: "windows-phone".into(),
        };
        assert!(err.to_string().contains("windows-phone"));
    }

    #[test]
    fn duplicate_requirement_displays_both_titles() {
        let err = PreflightError::DuplicateRequirement {
            title: "checking xcode".into(),
            existing: "Checking Xcode".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("checking xcode"));
        assert!(msg.contains("Checking Xcode"));
    }

    #[test]
    fn command_failed_includes_detail_when_present() {
        let err = PreflightError::CommandFailed {
            command: "adb --version".into(),
            code: Some(127),
            detail: Some("adb: command not found".into()),
        };
        let msg = err.to_string();
        assert_eq!(
            msg,
            "Command failed with exit code 127: adb --version (adb: command not found)"
        );
        assert!(!msg.contains("Some("));
    }

    #[test]
    fn command_failed_without_code_omits_exit_code() {
        let err = PreflightError::CommandFailed {
            command: "sdkmanager --version".into(),
            code: None,
            detail: Some("No such file or directory".into()),
        };
        assert_eq!(
            err.to_string(),
            "Command failed: sdkmanager --version (No such file or directory)"
        );
    }

    #[test]
    fn command_failed_omits_empty_detail() {
        let err = PreflightError::CommandFailed {
            command: "false".into(),
            code: Some(1),
            detail: Some(String::new()),
        };
        assert!(!err.to_string().contains("()"));
    }

    #[test]
    fn command_timed_out_displays_limit() {
        let err = PreflightError::CommandTimedOut {
            command: "xcrun simctl list runtimes".into(),
            timeout_secs: 30,
        };
        let msg = err.to_string();
        assert!(msg.contains("30s"));
        assert!(msg.contains("xcrun simctl"));
    }

    #[test]
    fn usage_errors_are_classified() {
        assert!(PreflightError::NoRequirements {
            setup: "ios".into()
        }
        .is_usage_error());
        assert!(!PreflightError::CommandTimedOut {
            command: "x".into(),
            timeout_secs: 1
        }
        .is_usage_error());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: PreflightError = io_err.into();
        assert!(matches!(err, PreflightError::Io(_)));
    }
}
