//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::args::{Cli, Commands};
use crate::config::load_config;
use crate::error::Result;
use crate::platform::PlatformContext;
use crate::shell::{CommandOptions, ShellCommandRunner};
use crate::ui::UserInterface;

use super::list::ListCommand;
use super::setup::SetupCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    ///
    /// Returns a [`CommandResult`] with the exit code, or an error for
    /// configuration problems and engine misuse.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Load configuration and build the context checks run in.
///
/// Check commands run from the project root and are killed after the
/// configured timeout.
pub fn load_context(
    project_root: &Path,
    config_override: Option<&Path>,
) -> Result<PlatformContext> {
    let config = load_config(project_root, config_override)?;
    let runner = ShellCommandRunner::with_options(CommandOptions {
        cwd: Some(project_root.to_path_buf()),
        timeout: Some(config.command_timeout()),
        ..Default::default()
    });
    Ok(PlatformContext::new(Arc::new(runner), config))
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_override: None,
        }
    }

    /// Use `path` instead of the project config file.
    pub fn with_config(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.config_override.as_deref();
        match &cli.command {
            Commands::Setup(args) => {
                SetupCommand::new(&self.project_root, config, args.clone()).execute(ui)
            }
            Commands::List(args) => {
                ListCommand::new(&self.project_root, config, args.clone()).execute(ui)
            }
        }
    }
}
