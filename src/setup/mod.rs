//! Setup aggregation.
//!
//! An [`EnvironmentSetup`] owns an ordered set of requirements, runs each of
//! them through the [`RequirementRunner`] one at a time, and folds the
//! results into a [`SetupTestResult`].
//!
//! # Example
//!
//! ```
//! use mobile_preflight::requirements::Requirement;
//! use mobile_preflight::setup::EnvironmentSetup;
//!
//! let mut setup = EnvironmentSetup::new("example");
//! setup
//!     .add_requirements(vec![
//!         Requirement::new("Checking uname", || Ok("uname OK".to_string())),
//!         Requirement::new("Checking xcode", || Ok("xcode 13.1".to_string())),
//!     ])
//!     .unwrap();
//!
//! let report = setup.execute_setup().unwrap();
//! assert!(report.has_met_all_requirements());
//! assert_eq!(report.len(), 2);
//! ```

use tracing::{debug, info, warn};

use crate::error::{PreflightError, Result};
use crate::requirements::{Requirement, RequirementCheckResult, RequirementRunner, SetupTestResult};

/// Receives progress notifications while a setup runs.
///
/// Both methods default to no-ops.
pub trait SetupObserver {
    /// Called before the check at `index` (zero-based) starts.
    fn check_started(&mut self, _index: usize, _total: usize, _title: &str) {}

    /// Called after the check at `index` settles.
    fn check_finished(&mut self, _index: usize, _total: usize, _result: &RequirementCheckResult) {}
}

/// Observer that ignores all notifications.
pub struct NoopObserver;

impl SetupObserver for NoopObserver {}

/// An ordered collection of requirements and the logic to verify them.
#[derive(Debug)]
pub struct EnvironmentSetup {
    name: String,
    requirements: Vec<Requirement>,
}

impl EnvironmentSetup {
    /// Create an empty setup. `name` identifies it in log output.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requirements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Registered requirements, in registration order.
    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Titles of registered requirements, in registration order.
    pub fn titles(&self) -> Vec<&str> {
        self.requirements.iter().map(|r| r.title()).collect()
    }

    /// Register requirements.
    ///
    /// A requirement whose title exactly matches an already registered one
    /// replaces it at the original position. Titles that differ only by case
    /// are rejected, as is an empty title. The batch is validated as a whole
    /// before anything is registered.
    pub fn add_requirements<I>(&mut self, requirements: I) -> Result<()>
    where
        I: IntoIterator<Item = Requirement>,
    {
        let batch: Vec<Requirement> = requirements.into_iter().collect();
        self.validate_batch(&batch)?;

        for requirement in batch {
            match self
                .requirements
                .iter()
                .position(|r| r.title() == requirement.title())
            {
                Some(index) => {
                    debug!(
                        "Overriding requirement '{}' in setup '{}'",
                        requirement.title(),
                        self.name
                    );
                    self.requirements[index] = requirement;
                }
                None => self.requirements.push(requirement),
            }
        }
        Ok(())
    }

    fn validate_batch(&self, batch: &[Requirement]) -> Result<()> {
        let mut seen: Vec<&str> = self.requirements.iter().map(|r| r.title()).collect();

        for requirement in batch {
            let title = requirement.title();
            if title.trim().is_empty() {
                return Err(PreflightError::InvalidRequirement {
                    message: format!("empty requirement title in setup '{}'", self.name),
                });
            }
            let folded = title.to_lowercase();
            if let Some(existing) = seen
                .iter()
                .find(|s| **s != title && s.to_lowercase() == folded)
            {
                return Err(PreflightError::DuplicateRequirement {
                    title: title.to_string(),
                    existing: existing.to_string(),
                });
            }
            if !seen.contains(&title) {
                seen.push(title);
            }
        }
        Ok(())
    }

    /// Run every requirement in registration order and return the verdict.
    ///
    /// Failing checks never make this return an error; only an empty setup
    /// does.
    pub fn execute_setup(&self) -> Result<SetupTestResult> {
        self.execute_setup_with(&mut NoopObserver)
    }

    /// Like [`execute_setup`](Self::execute_setup), notifying `observer`
    /// around each check.
    pub fn execute_setup_with(&self, observer: &mut dyn SetupObserver) -> Result<SetupTestResult> {
        if self.requirements.is_empty() {
            return Err(PreflightError::NoRequirements {
                setup: self.name.clone(),
            });
        }

        let total = self.requirements.len();
        debug!("Executing setup '{}' with {} requirements", self.name, total);

        let mut tests = Vec::with_capacity(total);
        for (index, requirement) in self.requirements.iter().enumerate() {
            observer.check_started(index, total, requirement.title());
            let result = RequirementRunner::run(requirement);
            observer.check_finished(index, total, &result);
            tests.push(result);
        }

        let report = SetupTestResult::new(tests);
        let failed = report.failed().count();
        if failed == 0 {
            info!("Setup '{}' met all {} requirements", self.name, total);
        } else {
            warn!(
                "Setup '{}' has {} of {} requirements unmet",
                self.name, failed, total
            );
        }
        Ok(report)
    }
}
