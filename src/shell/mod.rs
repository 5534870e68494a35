//! Shell command execution for requirement checks.

pub mod command;
pub mod mock;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult, CommandRunner, ShellCommandRunner};
pub use mock::MockCommandRunner;
pub use platform::{is_ci, is_ci_with_env};
