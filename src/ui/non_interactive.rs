//! Non-interactive UI for CI/headless environments.

use super::{OutputMode, SpinnerHandle, StatusKind, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Output is plain text. In CI (detected via `is_ci()`) the "started" line
/// of each spinner is suppressed, since only the settled line is useful in
/// a log.
pub struct NonInteractiveUI {
    mode: OutputMode,
    is_ci: bool,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            is_ci: crate::shell::is_ci(),
        }
    }

    /// Create with explicit CI flag (for testing).
    pub fn with_ci(mode: OutputMode, is_ci: bool) -> Self {
        Self { mode, is_ci }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("✓ {}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("✗ {}", msg);
    }

    fn show_header(&mut self, title: &str) {
        println!("\n{}\n", title);
    }

    fn show_hint(&mut self, hint: &str) {
        println!("  {}", hint);
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() && !self.is_ci {
            println!("  {}", StatusKind::Running.format_plain(message));
        }
        Box::new(LineSpinner {
            visible: self.mode.shows_spinners(),
        })
    }
}

/// Spinner that prints one line when it settles.
struct LineSpinner {
    visible: bool,
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        if self.visible {
            println!("  {}", StatusKind::Passed.format_plain(msg));
        }
    }

    fn finish_error(&mut self, msg: &str) {
        if self.visible {
            println!("  {}", StatusKind::Failed.format_plain(msg));
        }
    }
}
