//! Requirement definitions.

use std::fmt;

/// Outcome of a single check: a success message or a diagnostic.
pub type CheckOutcome = std::result::Result<String, String>;

/// A zero-argument check. Called once per setup run.
pub type CheckFn = Box<dyn Fn() -> CheckOutcome>;

/// A named environment check.
///
/// Requirements are built once per setup and never change after
/// registration.
///
/// # Example
///
/// ```
/// use mobile_preflight::requirements::Requirement;
///
/// let req = Requirement::new("Checking git", || Ok("git 2.43.0".to_string()))
///     .with_unfulfilled_message("Install git from https://git-scm.com");
/// assert_eq!(req.title(), "Checking git");
/// assert_eq!(req.check(), Ok("git 2.43.0".to_string()));
/// ```
pub struct Requirement {
    title: String,
    check: CheckFn,
    unfulfilled_message: Option<String>,
    logger: Option<String>,
}

impl Requirement {
    /// Create a requirement from a title and a check function.
    pub fn new<F>(title: impl Into<String>, check: F) -> Self
    where
        F: Fn() -> CheckOutcome + 'static,
    {
        Self {
            title: title.into(),
            check: Box::new(check),
            unfulfilled_message: None,
            logger: None,
        }
    }

    /// Text reported instead of the raw diagnostic when the check fails.
    pub fn with_unfulfilled_message(mut self, message: impl Into<String>) -> Self {
        self.unfulfilled_message = Some(message.into());
        self
    }

    /// Identity attached to log lines emitted while this requirement runs.
    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn unfulfilled_message(&self) -> Option<&str> {
        self.unfulfilled_message.as_deref()
    }

    pub fn logger(&self) -> Option<&str> {
        self.logger.as_deref()
    }

    /// Invoke the check directly, without logging or failure capture.
    ///
    /// Use [`RequirementRunner::run`](super::RequirementRunner::run) to get a
    /// structured result.
    pub fn check(&self) -> CheckOutcome {
        (self.check)()
    }
}

impl fmt::Debug for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requirement")
            .field("title", &self.title)
            .field("unfulfilled_message", &self.unfulfilled_message)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}
