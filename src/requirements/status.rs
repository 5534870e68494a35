//! Requirement check results.
//!
//! Each executed requirement produces a [`RequirementCheckResult`]; a full
//! setup run produces a [`SetupTestResult`] holding them in registration
//! order.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// The outcome of running a single requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementCheckResult {
    /// Title of the requirement that produced this result.
    pub title: String,
    /// Whether the check succeeded.
    pub has_passed: bool,
    /// Success text, or the (possibly overridden) failure text.
    pub message: String,
    /// Wall-clock time spent in the check.
    #[serde(rename = "durationMs", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

impl RequirementCheckResult {
    /// Create a passing result.
    pub fn passed(
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            has_passed: true,
            message: message.into(),
            duration,
        }
    }

    /// Create a failing result.
    pub fn failed(
        title: impl Into<String>,
        message: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            title: title.into(),
            has_passed: false,
            message: message.into(),
            duration,
        }
    }
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

/// The aggregate verdict of a setup run.
///
/// The overall verdict is never stored: [`has_met_all_requirements`]
/// is always derived from the individual results.
///
/// [`has_met_all_requirements`]: SetupTestResult::has_met_all_requirements
#[derive(Debug, Clone)]
pub struct SetupTestResult {
    tests: Vec<RequirementCheckResult>,
    checked_at: DateTime<Utc>,
}

impl SetupTestResult {
    /// Build a report from results in registration order.
    pub fn new(tests: Vec<RequirementCheckResult>) -> Self {
        Self {
            tests,
            checked_at: Utc::now(),
        }
    }

    /// Per-requirement results, in registration order.
    pub fn tests(&self) -> &[RequirementCheckResult] {
        &self.tests
    }

    /// True iff every check passed.
    pub fn has_met_all_requirements(&self) -> bool {
        self.tests.iter().all(|t| t.has_passed)
    }

    /// Results of checks that passed.
    pub fn passed(&self) -> impl Iterator<Item = &RequirementCheckResult> {
        self.tests.iter().filter(|t| t.has_passed)
    }

    /// Results of checks that failed.
    pub fn failed(&self) -> impl Iterator<Item = &RequirementCheckResult> {
        self.tests.iter().filter(|t| !t.has_passed)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Sum of all check durations.
    pub fn total_duration(&self) -> Duration {
        self.tests.iter().map(|t| t.duration).sum()
    }

    /// When the report was produced.
    pub fn checked_at(&self) -> DateTime<Utc> {
        self.checked_at
    }
}

impl Serialize for SetupTestResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SetupTestResult", 3)?;
        state.serialize_field("hasMetAllRequirements", &self.has_met_all_requirements())?;
        state.serialize_field("tests", &self.tests)?;
        state.serialize_field("checkedAt", &self.checked_at)?;
        state.end()
    }
}
