//! Platform-specific setups.
//!
//! Each [`PlatformKind`] maps to a fixed, ordered list of requirements.
//! [`PlatformKind::setup`] builds an [`EnvironmentSetup`] with those
//! requirements followed by any custom requirements from configuration.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mobile_preflight::config::PreflightConfig;
//! use mobile_preflight::platform::{PlatformContext, PlatformKind};
//! use mobile_preflight::shell::MockCommandRunner;
//!
//! let runner = Arc::new(MockCommandRunner::new().with_stdout("/usr/bin/uname", "Darwin\n"));
//! let ctx = PlatformContext::new(runner, PreflightConfig::default());
//!
//! let setup = PlatformKind::Ios.setup(&ctx).unwrap();
//! assert_eq!(setup.titles()[0], "Checking macOS environment");
//! ```

pub mod android;
pub mod ios;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{CustomRequirement, PreflightConfig};
use crate::error::{PreflightError, Result};
use crate::requirements::Requirement;
use crate::setup::EnvironmentSetup;
use crate::shell::CommandRunner;

/// Target mobile platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    /// Apple iOS (requires macOS and Xcode)
    #[value(name = "ios")]
    Ios,
    /// Google Android
    #[value(name = "android")]
    Android,
}

impl PlatformKind {
    /// Lowercase identifier, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ios => "ios",
            Self::Android => "android",
        }
    }

    /// Human-readable platform name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Ios => "iOS",
            Self::Android => "Android",
        }
    }

    /// Built-in requirements for this platform, in check order.
    pub fn requirements(self, ctx: &PlatformContext) -> Vec<Requirement> {
        match self {
            Self::Ios => ios::requirements(ctx),
            Self::Android => android::requirements(ctx),
        }
    }

    /// Build the setup for this platform.
    ///
    /// Custom requirements from configuration are registered after the
    /// built-ins; one whose title matches a built-in replaces it in place.
    pub fn setup(self, ctx: &PlatformContext) -> Result<EnvironmentSetup> {
        let mut setup = EnvironmentSetup::new(self.name());
        setup.add_requirements(self.requirements(ctx))?;
        setup.add_requirements(
            ctx.config()
                .requirements_for(self)
                .map(|custom| custom_requirement(ctx, custom)),
        )?;
        Ok(setup)
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PlatformKind {
    type Err = PreflightError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            _ => Err(PreflightError::InvalidPlatform {
                value: s.to_string(),
            }),
        }
    }
}

type EnvLookup = dyn Fn(&str) -> Option<String>;

/// Everything a platform needs to build its requirements.
#[derive(Clone)]
pub struct PlatformContext {
    runner: Arc<dyn CommandRunner>,
    config: PreflightConfig,
    env: Arc<EnvLookup>,
}

impl PlatformContext {
    /// Create a context that reads the process environment.
    pub fn new(runner: Arc<dyn CommandRunner>, config: PreflightConfig) -> Self {
        Self {
            runner,
            config,
            env: Arc::new(|key: &str| std::env::var(key).ok()),
        }
    }

    /// Replace the environment lookup (for tests).
    pub fn with_env<F>(mut self, env: F) -> Self
    where
        F: Fn(&str) -> Option<String> + 'static,
    {
        self.env = Arc::new(env);
        self
    }

    /// Shared handle to the command runner, for capture in check closures.
    pub fn runner(&self) -> Arc<dyn CommandRunner> {
        Arc::clone(&self.runner)
    }

    pub fn config(&self) -> &PreflightConfig {
        &self.config
    }

    /// Look up an environment variable, ignoring empty values.
    pub fn env_var(&self, key: &str) -> Option<String> {
        (self.env)(key).filter(|v| !v.trim().is_empty())
    }
}

impl fmt::Debug for PlatformContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlatformContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Requirement that passes when a configured command exits successfully.
fn custom_requirement(ctx: &PlatformContext, custom: &CustomRequirement) -> Requirement {
    let runner = ctx.runner();
    let command = custom.command.clone();
    let requirement = Requirement::new(custom.title.clone(), move || {
        let result = runner.run(&command).map_err(|e| e.to_string())?;
        let output = result.combined_output();
        Ok(output
            .lines()
            .next()
            .map(str::to_string)
            .unwrap_or_else(|| format!("`{}` succeeded", command)))
    })
    .with_logger("custom");

    match &custom.unfulfilled_message {
        Some(message) => requirement.with_unfulfilled_message(message.clone()),
        None => requirement,
    }
}
