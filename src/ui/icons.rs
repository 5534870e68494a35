//! Status vocabulary for requirement output.
//!
//! `StatusKind` provides one set of status icons shared by the setup and
//! list commands, with bracketed fallbacks for plain logs.

/// Status of a single requirement as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Requirement met.
    Passed,
    /// Requirement not met.
    Failed,
    /// Requirement registered but not checked yet.
    Pending,
    /// Check in progress.
    Running,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Passed => "✓",
            Self::Failed => "✗",
            Self::Pending => "◌",
            Self::Running => "◆",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Passed => "[ok]",
            Self::Failed => "[FAIL]",
            Self::Pending => "[pending]",
            Self::Running => "[run]",
        }
    }

    /// Format a status line for TTY: icon + message.
    pub fn format_icon(self, msg: &str) -> String {
        format!("{} {}", self.icon(), msg)
    }

    /// Format a status line for non-TTY: bracketed + message.
    pub fn format_plain(self, msg: &str) -> String {
        format!("{} {}", self.bracketed(), msg)
    }
}
