//! Configuration file discovery and loading.

use crate::config::schema::PreflightConfig;
use crate::config::validator::validate;
use crate::error::{PreflightError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = ".mobile-preflight.yml";

/// Find the project config at `<project_root>/.mobile-preflight.yml`.
pub fn find_project_config(project_root: &Path) -> Option<PathBuf> {
    let path = project_root.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file and parse it into PreflightConfig.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PreflightConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PreflightError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PreflightError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into PreflightConfig.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PreflightConfig> {
    if content.trim().is_empty() {
        return Ok(PreflightConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| PreflightError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and validate configuration.
///
/// If `config_override` is provided, that file must exist. Otherwise the
/// project config is used when present, and defaults when it is not.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<PreflightConfig> {
    let config = match config_override {
        Some(path) => load_config_file(path)?,
        None => match find_project_config(project_root) {
            Some(path) => {
                tracing::debug!("Loading config from {}", path.display());
                load_config_file(&path)?
            }
            None => PreflightConfig::default(),
        },
    };

    validate(&config)?;
    Ok(config)
}
