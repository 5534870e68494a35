//! Shared display helpers for requirement results.

use crate::platform::PlatformKind;
use crate::requirements::{RequirementCheckResult, SetupTestResult};
use crate::ui::{format_duration, OutputMode, StatusKind, UserInterface};

/// Line a settled check's spinner finishes with.
///
/// Verbose mode appends the check duration.
pub fn result_line(result: &RequirementCheckResult, mode: OutputMode) -> String {
    if mode.shows_details() {
        format!("{} ({})", result.title, format_duration(result.duration))
    } else {
        result.title.clone()
    }
}

/// Print a check's message under its status line.
///
/// Quiet mode has no status lines, so failures are printed in full there
/// and passes are dropped.
pub fn show_result_message(ui: &mut dyn UserInterface, result: &RequirementCheckResult) {
    match (ui.output_mode(), result.has_passed) {
        (OutputMode::Quiet, true) => {}
        (OutputMode::Quiet, false) => {
            ui.error(&format!("{}: {}", result.title, result.message));
        }
        (_, _) => ui.message(&format!("      {}", result.message)),
    }
}

/// Print the overall verdict of a setup run.
pub fn show_verdict(ui: &mut dyn UserInterface, platform: PlatformKind, report: &SetupTestResult) {
    if report.has_met_all_requirements() {
        ui.success(&format!(
            "{} development environment is ready ({} of {} requirements met in {})",
            platform,
            report.len(),
            report.len(),
            format_duration(report.total_duration())
        ));
        return;
    }

    let failed: Vec<&str> = report.failed().map(|r| r.title.as_str()).collect();
    ui.error(&format!("Setup failed for {}", platform));
    ui.message(&format!(
        "  {} of {} requirements not met:",
        failed.len(),
        report.len()
    ));
    for title in &failed {
        ui.message(&format!("    {}", StatusKind::Failed.format_plain(title)));
    }
    ui.show_hint(&format!(
        "Resolve the issues above and run `mobile-preflight setup -p {}` again.",
        platform.name()
    ));
}
