//! Single-requirement execution.
//!
//! The runner is the boundary where check failures turn into data: whatever
//! the check does (succeed, fail, or panic), exactly one
//! [`RequirementCheckResult`] comes out.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, info_span, warn};

use super::requirement::Requirement;
use super::status::RequirementCheckResult;

/// Executes requirements and normalizes their outcomes.
pub struct RequirementRunner;

impl RequirementRunner {
    /// Run one requirement and capture its outcome.
    ///
    /// Never panics and never returns an error: a failing or panicking check
    /// yields a result with `has_passed == false`. When the requirement has
    /// an unfulfilled message, it replaces the raw diagnostic.
    pub fn run(requirement: &Requirement) -> RequirementCheckResult {
        let title = requirement.title();
        let span = info_span!(
            "requirement",
            title = %title,
            logger = requirement.logger().unwrap_or("preflight"),
        );
        let _guard = span.enter();

        debug!("Checking requirement: {}", title);

        let start = Instant::now();
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| requirement.check()))
            .unwrap_or_else(|payload| {
                Err(format!("check panicked: {}", panic_message(&*payload)))
            });
        let duration = start.elapsed();

        match outcome {
            Ok(message) => {
                debug!("Requirement met: {} ({})", title, message);
                RequirementCheckResult::passed(title, message, duration)
            }
            Err(diagnostic) => {
                warn!("Requirement not met: {} ({})", title, diagnostic);
                let message = requirement
                    .unfulfilled_message()
                    .map(str::to_string)
                    .unwrap_or(diagnostic);
                RequirementCheckResult::failed(title, message, duration)
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
