//! Mock command runner for testing.
//!
//! `MockCommandRunner` implements [`CommandRunner`] with canned responses
//! keyed by the exact command string, and records every command it is
//! asked to run.
//!
//! # Example
//!
//! ```
//! use mobile_preflight::shell::{CommandRunner, MockCommandRunner};
//!
//! let runner = MockCommandRunner::new()
//!     .with_stdout("/usr/bin/uname", "Darwin\n")
//!     .with_failure("adb --version", 127, "adb: command not found");
//!
//! assert_eq!(runner.run("/usr/bin/uname").unwrap().stdout, "Darwin\n");
//! assert!(runner.run("adb --version").is_err());
//! assert_eq!(runner.calls(), vec!["/usr/bin/uname", "adb --version"]);
//! ```

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use crate::error::{PreflightError, Result};

use super::command::{CommandResult, CommandRunner};

#[derive(Debug, Clone)]
enum MockResponse {
    Success { stdout: String, stderr: String },
    Failure { code: i32, stderr: String },
    TimedOut,
}

/// Command runner returning pre-configured responses.
///
/// Commands without a configured response fail with exit code 127, the
/// way a shell reports an unknown command.
#[derive(Debug, Default)]
pub struct MockCommandRunner {
    responses: HashMap<String, MockResponse>,
    calls: Mutex<Vec<String>>,
}

impl MockCommandRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Succeed with the given stdout.
    pub fn with_stdout(self, command: &str, stdout: &str) -> Self {
        self.with_output(command, stdout, "")
    }

    /// Succeed with the given stdout and stderr.
    pub fn with_output(mut self, command: &str, stdout: &str, stderr: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            MockResponse::Success {
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Exit with `code` and the given stderr.
    pub fn with_failure(mut self, command: &str, code: i32, stderr: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            MockResponse::Failure {
                code,
                stderr: stderr.to_string(),
            },
        );
        self
    }

    /// Behave as if the command hit its time limit.
    pub fn with_timeout(mut self, command: &str) -> Self {
        self.responses
            .insert(command.to_string(), MockResponse::TimedOut);
        self
    }

    /// Commands run so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Whether `command` has been run.
    pub fn was_called(&self, command: &str) -> bool {
        self.calls().iter().any(|c| c == command)
    }
}

impl CommandRunner for MockCommandRunner {
    fn run(&self, command: &str) -> Result<CommandResult> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.to_string());
        }

        match self.responses.get(command) {
            Some(MockResponse::Success { stdout, stderr }) => Ok(CommandResult::success(
                stdout.clone(),
                stderr.clone(),
                Duration::ZERO,
            )),
            Some(MockResponse::Failure { code, stderr }) => Err(PreflightError::CommandFailed {
                command: command.to_string(),
                code: Some(*code),
                detail: Some(stderr.clone()),
            }),
            Some(MockResponse::TimedOut) => Err(PreflightError::CommandTimedOut {
                command: command.to_string(),
                timeout_secs: 0,
            }),
            None => Err(PreflightError::CommandFailed {
                command: command.to_string(),
                code: Some(127),
                detail: Some("command not found".to_string()),
            }),
        }
    }
}
