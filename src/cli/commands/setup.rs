//! Setup command implementation.
//!
//! The `mobile-preflight setup` command runs every requirement of a platform
//! and reports the verdict.

use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::args::SetupArgs;
use crate::error::Result;
use crate::platform::PlatformContext;
use crate::requirements::{RequirementCheckResult, SetupTestResult};
use crate::setup::SetupObserver;
use crate::ui::{SpinnerHandle, UserInterface};

use super::dispatcher::{load_context, Command, CommandResult};
use super::display::{result_line, show_result_message, show_verdict};

/// Exit code when at least one requirement is not met.
pub const EXIT_REQUIREMENTS_UNMET: i32 = 1;

/// The setup command implementation.
pub struct SetupCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: SetupArgs,
}

impl SetupCommand {
    /// Create a new setup command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: SetupArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    pub fn args(&self) -> &SetupArgs {
        &self.args
    }

    /// Run the setup against an already built context.
    pub fn run(&self, ctx: &PlatformContext, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let platform = self.args.platform;
        let setup = platform.setup(ctx)?;

        let report = if self.args.json {
            let report = setup.execute_setup()?;
            let json = serde_json::to_string_pretty(&report)
                .context("Failed to serialize setup report")?;
            ui.message(&json);
            report
        } else {
            ui.show_header(&format!("{} environment setup", platform));
            let report = {
                let mut observer = ProgressObserver::new(ui);
                setup.execute_setup_with(&mut observer)?
            };
            ui.message("");
            show_verdict(ui, platform, &report);
            report
        };

        Ok(exit_result(&report))
    }
}

impl Command for SetupCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = load_context(&self.project_root, self.config_override.as_deref())?;
        self.run(&ctx, ui)
    }
}

fn exit_result(report: &SetupTestResult) -> CommandResult {
    if report.has_met_all_requirements() {
        CommandResult::success()
    } else {
        CommandResult::failure(EXIT_REQUIREMENTS_UNMET)
    }
}

/// Shows a spinner per check and settles it with the check's verdict.
struct ProgressObserver<'a> {
    ui: &'a mut dyn UserInterface,
    spinner: Option<Box<dyn SpinnerHandle>>,
}

impl<'a> ProgressObserver<'a> {
    fn new(ui: &'a mut dyn UserInterface) -> Self {
        Self { ui, spinner: None }
    }
}

impl SetupObserver for ProgressObserver<'_> {
    fn check_started(&mut self, index: usize, total: usize, title: &str) {
        self.spinner = Some(
            self.ui
                .start_spinner(&format!("[{}/{}] {}", index + 1, total, title)),
        );
    }

    fn check_finished(&mut self, _index: usize, _total: usize, result: &RequirementCheckResult) {
        let line = result_line(result, self.ui.output_mode());
        if let Some(mut spinner) = self.spinner.take() {
            if result.has_passed {
                spinner.finish_success(&line);
            } else {
                spinner.finish_error(&line);
            }
        }
        show_result_message(self.ui, result);
    }
}
