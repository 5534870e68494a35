//! Configuration loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! Configuration is optional. Without a file every setting has a default.
//!
//! # Example
//!
//! ```
//! use mobile_preflight::config::{load_config, CONFIG_FILE_NAME};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(CONFIG_FILE_NAME), "ios:\n  min_runtime: \"15.0\"\n").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.ios.min_runtime_version(), Some((15, 0)));
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    find_project_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME,
};
pub use schema::{
    parse_major_minor, AndroidSettings, CustomRequirement, IosSettings, PreflightConfig,
};
pub use validator::{validate, validate_config, ValidationError};
