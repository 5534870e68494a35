//! Configuration schema definitions.
//!
//! This module contains the struct definitions that map to the
//! `.mobile-preflight.yml` file format. Every section is optional.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::platform::PlatformKind;

/// Root configuration structure for `.mobile-preflight.yml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreflightConfig {
    /// Seconds before an external command is killed. Zero is invalid.
    pub command_timeout_secs: u64,

    /// iOS-specific settings
    pub ios: IosSettings,

    /// Android-specific settings
    pub android: AndroidSettings,

    /// Additional command-based requirements
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub requirements: Vec<CustomRequirement>,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
            ios: IosSettings::default(),
            android: AndroidSettings::default(),
            requirements: Vec::new(),
        }
    }
}

impl PreflightConfig {
    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Custom requirements that apply to `platform`, in file order.
    pub fn requirements_for(
        &self,
        platform: PlatformKind,
    ) -> impl Iterator<Item = &CustomRequirement> {
        self.requirements
            .iter()
            .filter(move |r| r.platform.is_none_or(|p| p == platform))
    }
}

/// Default command timeout.
pub const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 120;

/// Default minimum iOS simulator runtime.
pub const DEFAULT_MIN_IOS_RUNTIME: &str = "13.0";

/// Default minimum Android platform API level.
pub const DEFAULT_MIN_ANDROID_API_LEVEL: u32 = 23;

/// iOS settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IosSettings {
    /// Oldest simulator runtime accepted, as `major[.minor]`.
    pub min_runtime: String,
}

impl Default for IosSettings {
    fn default() -> Self {
        Self {
            min_runtime: DEFAULT_MIN_IOS_RUNTIME.to_string(),
        }
    }
}

impl IosSettings {
    /// Parsed `(major, minor)` of `min_runtime`, or `None` if malformed.
    pub fn min_runtime_version(&self) -> Option<(u32, u32)> {
        parse_major_minor(&self.min_runtime)
    }
}

/// Parse `"14"` or `"14.2"` into `(major, minor)`.
pub fn parse_major_minor(value: &str) -> Option<(u32, u32)> {
    let mut parts = value.trim().splitn(2, '.');
    let major = parts.next()?.parse().ok()?;
    let minor = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

/// Android settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AndroidSettings {
    /// Lowest platform API level accepted.
    pub min_api_level: u32,

    /// SDK location; takes precedence over `ANDROID_HOME`/`ANDROID_SDK_ROOT`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sdk_root: Option<PathBuf>,
}

impl Default for AndroidSettings {
    fn default() -> Self {
        Self {
            min_api_level: DEFAULT_MIN_ANDROID_API_LEVEL,
            sdk_root: None,
        }
    }
}

/// A requirement defined in configuration: passes when `command` exits 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomRequirement {
    /// Requirement title. Matching a built-in title replaces the built-in.
    pub title: String,

    /// Command to run
    pub command: String,

    /// Platform this applies to; both when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<PlatformKind>,

    /// Text shown instead of the command's error output when it fails
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unfulfilled_message: Option<String>,
}
