//! iOS requirements.
//!
//! In check order: the host is macOS, Xcode is installed, and at least one
//! simulator runtime at or above the configured minimum is available.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::schema::{parse_major_minor, DEFAULT_MIN_IOS_RUNTIME};
use crate::requirements::{CheckOutcome, Requirement};

use super::PlatformContext;

const LOGGER: &str = "ios";

pub const UNAME_COMMAND: &str = "/usr/bin/uname";
pub const XCODE_VERSION_COMMAND: &str = "xcodebuild -version";
pub const XCODE_SELECT_COMMAND: &str = "xcode-select -p";
pub const SIMULATOR_RUNTIMES_COMMAND: &str = "xcrun simctl list runtimes";

pub const TITLE_SUPPORTED_OS: &str = "Checking macOS environment";
pub const TITLE_XCODE: &str = "Checking Xcode installation";
pub const TITLE_SIMULATOR_RUNTIMES: &str = "Checking iOS simulator runtimes";

static XCODE_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^Xcode\s+(\d+(?:\.\d+)*)").expect("valid xcode regex"));

static IOS_RUNTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^iOS\s+(\d+)\.(\d+)").expect("valid runtime regex"));

/// Built-in iOS requirements, in check order.
pub fn requirements(ctx: &PlatformContext) -> Vec<Requirement> {
    vec![
        supported_environment(ctx),
        xcode_installed(ctx),
        simulator_runtimes(ctx),
    ]
}

fn supported_environment(ctx: &PlatformContext) -> Requirement {
    let runner = ctx.runner();
    Requirement::new(TITLE_SUPPORTED_OS, move || {
        let output = runner.run(UNAME_COMMAND).map_err(|e| e.to_string())?;
        check_os_name(output.stdout.trim())
    })
    .with_unfulfilled_message("iOS development requires a Mac running macOS.")
    .with_logger(LOGGER)
}

fn xcode_installed(ctx: &PlatformContext) -> Requirement {
    let runner = ctx.runner();
    Requirement::new(TITLE_XCODE, move || {
        let output = runner.run(XCODE_VERSION_COMMAND).map_err(|e| e.to_string())?;
        let version = parse_xcode_version(&output.stdout).ok_or_else(|| {
            format!(
                "Unexpected output from `{}`: {}",
                XCODE_VERSION_COMMAND,
                output.stdout.trim()
            )
        })?;

        // The developer directory is informational only.
        match runner.run(XCODE_SELECT_COMMAND) {
            Ok(dir) if !dir.stdout.trim().is_empty() => {
                Ok(format!("{} ({})", version, dir.stdout.trim()))
            }
            _ => Ok(version),
        }
    })
    .with_unfulfilled_message(
        "Xcode was not found. Install Xcode from the App Store and run `xcode-select --install`.",
    )
    .with_logger(LOGGER)
}

fn simulator_runtimes(ctx: &PlatformContext) -> Requirement {
    let runner = ctx.runner();
    let minimum = ctx
        .config()
        .ios
        .min_runtime_version()
        .or_else(|| parse_major_minor(DEFAULT_MIN_IOS_RUNTIME))
        .map(|(major, minor)| IosRuntime { major, minor })
        .unwrap_or(IosRuntime { major: 13, minor: 0 });

    Requirement::new(TITLE_SIMULATOR_RUNTIMES, move || {
        let output = runner
            .run(SIMULATOR_RUNTIMES_COMMAND)
            .map_err(|e| e.to_string())?;
        check_runtimes(&parse_simulator_runtimes(&output.stdout), minimum)
    })
    .with_unfulfilled_message(format!(
        "No iOS simulator runtime {} or newer is installed. \
         Add one in Xcode > Settings > Platforms.",
        minimum
    ))
    .with_logger(LOGGER)
}

/// Pass only on Darwin.
pub fn check_os_name(os: &str) -> CheckOutcome {
    if os == "Darwin" {
        Ok("macOS detected".to_string())
    } else if os.is_empty() {
        Err("iOS development requires macOS, found an unknown OS".to_string())
    } else {
        Err(format!("iOS development requires macOS, found {}", os))
    }
}

/// Extract `Xcode <version>` from `xcodebuild -version` output.
pub fn parse_xcode_version(output: &str) -> Option<String> {
    output
        .lines()
        .find_map(|line| XCODE_VERSION.captures(line.trim()))
        .map(|caps| format!("Xcode {}", &caps[1]))
}

/// An iOS simulator runtime version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct IosRuntime {
    pub major: u32,
    pub minor: u32,
}

impl fmt::Display for IosRuntime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "iOS {}.{}", self.major, self.minor)
    }
}

/// Parse available iOS runtimes from `xcrun simctl list runtimes`.
///
/// Runtimes marked unavailable and non-iOS runtimes (watchOS, tvOS) are
/// skipped.
pub fn parse_simulator_runtimes(output: &str) -> Vec<IosRuntime> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.contains("unavailable"))
        .filter_map(|line| IOS_RUNTIME.captures(line))
        .filter_map(|caps| {
            Some(IosRuntime {
                major: caps[1].parse().ok()?,
                minor: caps[2].parse().ok()?,
            })
        })
        .collect()
}

fn check_runtimes(runtimes: &[IosRuntime], minimum: IosRuntime) -> CheckOutcome {
    let mut supported: Vec<IosRuntime> = runtimes
        .iter()
        .copied()
        .filter(|r| *r >= minimum)
        .collect();
    supported.sort();
    supported.dedup();

    if supported.is_empty() {
        let installed = if runtimes.is_empty() {
            "none installed".to_string()
        } else {
            format!("installed: {}", join(runtimes))
        };
        return Err(format!(
            "No iOS simulator runtime at or above {} found ({})",
            minimum, installed
        ));
    }

    Ok(format!("Supported runtimes: {}", join(&supported)))
}

fn join(runtimes: &[IosRuntime]) -> String {
    runtimes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
