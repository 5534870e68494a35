//! mobile-preflight - verify a machine is ready for mobile development.
//!
//! A setup is an ordered list of named requirements. Each requirement runs a
//! check that either passes with a message or fails with a diagnostic; the
//! setup runs all of them and reports whether every one was met.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, parsing, and validation
//! - [`error`] - Error types and result aliases
//! - [`platform`] - Built-in iOS and Android requirements
//! - [`requirements`] - Requirement definitions, runner, and results
//! - [`setup`] - Requirement registration and setup execution
//! - [`shell`] - Shell command execution
//! - [`ui`] - Spinners and terminal output
//!
//! # Example
//!
//! ```
//! use mobile_preflight::requirements::Requirement;
//! use mobile_preflight::setup::EnvironmentSetup;
//!
//! let mut setup = EnvironmentSetup::new("ci");
//! setup
//!     .add_requirements(vec![
//!         Requirement::new("Checking uname", || Ok("uname OK".to_string())),
//!         Requirement::new("Checking adb", || Err("adb not found".to_string()))
//!             .with_unfulfilled_message("Install adb"),
//!     ])
//!     .unwrap();
//!
//! let report = setup.execute_setup().unwrap();
//! assert!(!report.has_met_all_requirements());
//! assert_eq!(report.tests()[1].message, "Install adb");
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod platform;
pub mod requirements;
pub mod setup;
pub mod shell;
pub mod ui;

pub use error::{PreflightError, Result};
