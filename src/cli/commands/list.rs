//! List command implementation.
//!
//! The `mobile-preflight list` command prints the requirements a setup would
//! check, in order, without running any of them.

use std::path::{Path, PathBuf};

use crate::cli::args::ListArgs;
use crate::error::Result;
use crate::platform::PlatformContext;
use crate::ui::{StatusKind, UserInterface};

use super::dispatcher::{load_context, Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ListArgs,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ListArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// List the requirements registered for the context.
    pub fn run(&self, ctx: &PlatformContext, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let platform = self.args.platform;
        let setup = platform.setup(ctx)?;

        ui.show_header(&format!("{} requirements", platform));
        for (index, title) in setup.titles().iter().enumerate() {
            ui.message(&format!(
                "  {:>2}. {}",
                index + 1,
                StatusKind::Pending.format_plain(title)
            ));
        }

        Ok(CommandResult::success())
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = load_context(&self.project_root, self.config_override.as_deref())?;
        self.run(&ctx, ui)
    }
}
