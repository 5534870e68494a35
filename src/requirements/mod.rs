//! Requirement verification.
//!
//! A [`Requirement`] is a named, independently failable environment check.
//! The [`RequirementRunner`] executes one requirement and turns its outcome
//! into a [`RequirementCheckResult`]; failures are captured as data and never
//! propagate past the runner.
//!
//! # Modules
//!
//! - [`requirement`] - The requirement definition and its check callable
//! - [`runner`] - Executes a single requirement with logging and timing
//! - [`status`] - Per-check results and the aggregate setup report

pub mod requirement;
pub mod runner;
pub mod status;

pub use requirement::{CheckFn, CheckOutcome, Requirement};
pub use runner::RequirementRunner;
pub use status::{RequirementCheckResult, SetupTestResult};
