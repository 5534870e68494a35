//! Android requirements.
//!
//! The SDK root is resolved once when the requirements are built, from
//! `android.sdk_root` in configuration, then `ANDROID_HOME`, then
//! `ANDROID_SDK_ROOT`. Tool commands run from inside the SDK when the root
//! is known and fall back to `PATH` otherwise.

use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::requirements::{CheckOutcome, Requirement};
use crate::shell::CommandRunner;

use super::PlatformContext;

const LOGGER: &str = "android";

pub const JAVA_VERSION_COMMAND: &str = "java -version";

pub const TITLE_SDK_ROOT: &str = "Checking Android SDK root";
pub const TITLE_JAVA: &str = "Checking Java installation";
pub const TITLE_CMDLINE_TOOLS: &str = "Checking Android SDK command-line tools";
pub const TITLE_PLATFORM_TOOLS: &str = "Checking Android SDK platform tools";
pub const TITLE_PLATFORM_API: &str = "Checking Android platform API packages";
pub const TITLE_EMULATOR_IMAGE: &str = "Checking Android emulator images";

/// Emulator image variants accepted, most preferred first.
const IMAGE_VARIANTS: &[&str] = &["google_apis", "google_apis_playstore", "default"];

static JAVA_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"version\s+"([^"]+)""#).expect("valid java regex"));

static ADB_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^Version\s+(\S+)").expect("valid adb regex"));

static PLATFORM_PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^platforms;android-(\d+)$").expect("valid platform regex"));

static SYSTEM_IMAGE_PACKAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^system-images;android-(\d+);([^;]+);([^;]+)$").expect("valid image regex")
});

/// Where the SDK root came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkRootSource {
    Config,
    AndroidHome,
    AndroidSdkRoot,
}

impl fmt::Display for SdkRootSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Config => "android.sdk_root",
            Self::AndroidHome => "ANDROID_HOME",
            Self::AndroidSdkRoot => "ANDROID_SDK_ROOT",
        })
    }
}

/// Resolve the SDK root without checking that it exists.
pub fn resolve_sdk_root(ctx: &PlatformContext) -> Option<(PathBuf, SdkRootSource)> {
    if let Some(root) = &ctx.config().android.sdk_root {
        return Some((root.clone(), SdkRootSource::Config));
    }
    if let Some(home) = ctx.env_var("ANDROID_HOME") {
        return Some((PathBuf::from(home), SdkRootSource::AndroidHome));
    }
    ctx.env_var("ANDROID_SDK_ROOT")
        .map(|root| (PathBuf::from(root), SdkRootSource::AndroidSdkRoot))
}

/// Command line for `sdkmanager`, run from the SDK when the root is known.
pub fn sdkmanager_command(sdk_root: Option<&Path>, args: &str) -> String {
    let program = if cfg!(windows) { "sdkmanager.bat" } else { "sdkmanager" };
    tool_command(
        sdk_root.map(|root| root.join("cmdline-tools").join("latest").join("bin")),
        program,
        args,
    )
}

/// Command line for `adb`, run from the SDK when the root is known.
pub fn adb_command(sdk_root: Option<&Path>, args: &str) -> String {
    tool_command(sdk_root.map(|root| root.join("platform-tools")), "adb", args)
}

fn tool_command(dir: Option<PathBuf>, program: &str, args: &str) -> String {
    match dir {
        Some(dir) => format!("\"{}\" {}", dir.join(program).display(), args),
        None => format!("{} {}", program, args),
    }
}

/// Built-in Android requirements, in check order.
pub fn requirements(ctx: &PlatformContext) -> Vec<Requirement> {
    let sdk_root = resolve_sdk_root(ctx);
    let root_path = sdk_root.as_ref().map(|(path, _)| path.as_path());
    let min_api_level = ctx.config().android.min_api_level;

    // Both package checks read the same listing; fetch it at most once.
    let listing = InstalledPackages::new(
        ctx.runner(),
        sdkmanager_command(root_path, "--list_installed"),
    );

    vec![
        sdk_root_requirement(sdk_root.clone()),
        java_requirement(ctx.runner()),
        cmdline_tools_requirement(ctx.runner(), sdkmanager_command(root_path, "--version")),
        platform_tools_requirement(ctx.runner(), adb_command(root_path, "--version")),
        platform_api_requirement(listing.clone(), min_api_level),
        emulator_image_requirement(listing, min_api_level, preferred_abi()),
    ]
}

fn sdk_root_requirement(sdk_root: Option<(PathBuf, SdkRootSource)>) -> Requirement {
    Requirement::new(TITLE_SDK_ROOT, move || match &sdk_root {
        Some((path, source)) if path.is_dir() => Ok(format!(
            "Android SDK root {} (from {})",
            path.display(),
            source
        )),
        Some((path, source)) => Err(format!(
            "Android SDK root {} (from {}) does not exist",
            path.display(),
            source
        )),
        None => Err("Neither ANDROID_HOME nor ANDROID_SDK_ROOT is set".to_string()),
    })
    .with_unfulfilled_message(
        "Install the Android SDK and set ANDROID_HOME to its location, \
         or set android.sdk_root in .mobile-preflight.yml.",
    )
    .with_logger(LOGGER)
}

fn java_requirement(runner: Arc<dyn CommandRunner>) -> Requirement {
    Requirement::new(TITLE_JAVA, move || {
        let output = runner.run(JAVA_VERSION_COMMAND).map_err(|e| e.to_string())?;
        let combined = output.combined_output();
        match parse_java_version(&combined) {
            Some(version) => Ok(format!("Java {}", version)),
            None => Ok(first_line(&combined).unwrap_or("Java found").to_string()),
        }
    })
    .with_unfulfilled_message(
        "Install a JDK (version 17 or newer) and make sure `java` is on PATH.",
    )
    .with_logger(LOGGER)
}

fn cmdline_tools_requirement(runner: Arc<dyn CommandRunner>, command: String) -> Requirement {
    Requirement::new(TITLE_CMDLINE_TOOLS, move || {
        let output = runner.run(&command).map_err(|e| e.to_string())?;
        let version = first_line(&output.stdout).unwrap_or("unknown version");
        Ok(format!("sdkmanager {}", version))
    })
    .with_unfulfilled_message(
        "Install \"Android SDK Command-line Tools (latest)\" from the Android Studio SDK Manager.",
    )
    .with_logger(LOGGER)
}

fn platform_tools_requirement(runner: Arc<dyn CommandRunner>, command: String) -> Requirement {
    Requirement::new(TITLE_PLATFORM_TOOLS, move || {
        let output = runner.run(&command).map_err(|e| e.to_string())?;
        let version = parse_adb_version(&output.stdout).unwrap_or("unknown version");
        Ok(format!("Android SDK platform tools {}", version))
    })
    .with_unfulfilled_message(
        "Install the Android SDK platform tools with `sdkmanager \"platform-tools\"`.",
    )
    .with_logger(LOGGER)
}

fn platform_api_requirement(listing: InstalledPackages, min_api_level: u32) -> Requirement {
    Requirement::new(TITLE_PLATFORM_API, move || {
        let packages = listing.get()?;
        check_platform_api(&parse_platform_levels(&packages), min_api_level)
    })
    .with_unfulfilled_message(format!(
        "Install an Android platform with API level {} or newer, \
         e.g. `sdkmanager \"platforms;android-{}\"`.",
        min_api_level, min_api_level
    ))
    .with_logger(LOGGER)
}

fn emulator_image_requirement(
    listing: InstalledPackages,
    min_api_level: u32,
    abi: &'static str,
) -> Requirement {
    Requirement::new(TITLE_EMULATOR_IMAGE, move || {
        let packages = listing.get()?;
        let images = parse_system_images(&packages);
        match find_emulator_image(&images, min_api_level, abi) {
            Some(image) => Ok(format!("Emulator image {}", image)),
            None => Err(format!(
                "No {} emulator image with API level {} or newer found",
                abi, min_api_level
            )),
        }
    })
    .with_unfulfilled_message(format!(
        "Install an emulator image, e.g. `sdkmanager \"system-images;android-{};google_apis;{}\"`.",
        min_api_level, abi
    ))
    .with_logger(LOGGER)
}

/// Lazily fetched `sdkmanager --list_installed` output shared by checks.
#[derive(Clone)]
struct InstalledPackages {
    runner: Arc<dyn CommandRunner>,
    command: Rc<String>,
    output: Rc<OnceCell<CheckOutcome>>,
}

impl InstalledPackages {
    fn new(runner: Arc<dyn CommandRunner>, command: String) -> Self {
        Self {
            runner,
            command: Rc::new(command),
            output: Rc::new(OnceCell::new()),
        }
    }

    fn get(&self) -> CheckOutcome {
        self.output
            .get_or_init(|| {
                self.runner
                    .run(&self.command)
                    .map(|r| r.stdout)
                    .map_err(|e| e.to_string())
            })
            .clone()
    }
}

/// ABI of emulator images that run natively on this host.
pub fn preferred_abi() -> &'static str {
    if cfg!(target_arch = "aarch64") {
        "arm64-v8a"
    } else {
        "x86_64"
    }
}

/// Extract the quoted version from `java -version` output.
pub fn parse_java_version(output: &str) -> Option<String> {
    JAVA_VERSION
        .captures(output)
        .map(|caps| caps[1].to_string())
}

/// Extract the `Version` line from `adb --version` output.
pub fn parse_adb_version(output: &str) -> Option<&str> {
    ADB_VERSION
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Package paths from `sdkmanager --list_installed`, in listed order.
///
/// Only the first column of the table rows is kept.
pub fn parse_installed_packages(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.contains('|'))
        .filter_map(|line| line.split('|').next())
        .map(str::trim)
        .filter(|path| !path.is_empty() && *path != "Path" && !path.starts_with("---"))
        .collect()
}

/// Numeric API levels of installed platforms. Preview codenames are skipped.
pub fn parse_platform_levels(output: &str) -> Vec<u32> {
    parse_installed_packages(output)
        .into_iter()
        .filter_map(|path| PLATFORM_PACKAGE.captures(path))
        .filter_map(|caps| caps[1].parse().ok())
        .collect()
}

fn check_platform_api(levels: &[u32], min_api_level: u32) -> CheckOutcome {
    match levels.iter().copied().filter(|l| *l >= min_api_level).max() {
        Some(level) => Ok(format!("Android API level {} installed", level)),
        None if levels.is_empty() => Err("No Android platform packages installed".to_string()),
        None => Err(format!(
            "No Android platform with API level {} or newer (highest installed: {})",
            min_api_level,
            levels.iter().max().copied().unwrap_or_default()
        )),
    }
}

/// An installed emulator system image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemImage {
    pub api_level: u32,
    pub variant: String,
    pub abi: String,
}

impl fmt::Display for SystemImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "android-{} {} {}", self.api_level, self.variant, self.abi)
    }
}

/// System images from `sdkmanager --list_installed`.
pub fn parse_system_images(output: &str) -> Vec<SystemImage> {
    parse_installed_packages(output)
        .into_iter()
        .filter_map(|path| SYSTEM_IMAGE_PACKAGE.captures(path))
        .filter_map(|caps| {
            Some(SystemImage {
                api_level: caps[1].parse().ok()?,
                variant: caps[2].to_string(),
                abi: caps[3].to_string(),
            })
        })
        .collect()
}

/// Best image for `abi` at or above `min_api_level`.
///
/// Highest API level wins; ties go to the more preferred variant.
pub fn find_emulator_image<'a>(
    images: &'a [SystemImage],
    min_api_level: u32,
    abi: &str,
) -> Option<&'a SystemImage> {
    images
        .iter()
        .filter(|image| image.abi == abi && image.api_level >= min_api_level)
        .filter_map(|image| {
            IMAGE_VARIANTS
                .iter()
                .position(|v| *v == image.variant)
                .map(|rank| (image, rank))
        })
        .max_by(|(a, a_rank), (b, b_rank)| {
            a.api_level
                .cmp(&b.api_level)
                .then_with(|| b_rank.cmp(a_rank))
        })
        .map(|(image, _)| image)
}

fn first_line(output: &str) -> Option<&str> {
    output.lines().map(str::trim).find(|line| !line.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PreflightConfig;
    use crate::shell::MockCommandRunner;
    use tempfile::TempDir;

    const LIST_INSTALLED: &str = "\
Installed packages:
  Path                                           | Version | Description                         | Location
  -------                                        | ------- | -------                             | -------
  build-tools;33.0.0                             | 33.0.0  | Android SDK Build-Tools 33          | build-tools/33.0.0
  platform-tools                                 | 34.0.4  | Android SDK Platform-Tools          | platform-tools
  platforms;android-30                           | 3       | Android SDK Platform 30             | platforms/android-30
  platforms;android-33                           | 2       | Android SDK Platform 33             | platforms/android-33
  platforms;android-UpsideDownCake               | 4       | Android SDK Platform UpsideDownCake | platforms/android-UpsideDownCake
  system-images;android-30;default;x86_64        | 10      | Intel x86_64 Atom System Image      | system-images/android-30/default/x86_64
  system-images;android-33;google_apis;x86_64    | 8       | Google APIs Intel x86_64 Image      | system-images/android-33/google_apis/x86_64
  system-images;android-33;google_apis;arm64-v8a | 8       | Google APIs ARM 64 v8a Image        | system-images/android-33/google_apis/arm64-v8a
";

    const ADB_OUTPUT: &str = "\
Android Debug Bridge version 1.0.41
Version 34.0.4-10411341
Installed as /opt/android/platform-tools/adb
";

    fn context(runner: &Arc<MockCommandRunner>, config: PreflightConfig) -> PlatformContext {
        PlatformContext::new(runner.clone(), config).with_env(|_| None)
    }

    #[test]
    fn registers_titles_in_order() {
        let runner = Arc::new(MockCommandRunner::new());
        let reqs = requirements(&context(&runner, PreflightConfig::default()));
        let titles: Vec<_> = reqs.iter().map(|r| r.title()).collect();

        assert_eq!(
            titles,
            vec![
                TITLE_SDK_ROOT,
                TITLE_JAVA,
                TITLE_CMDLINE_TOOLS,
                TITLE_PLATFORM_TOOLS,
                TITLE_PLATFORM_API,
                TITLE_EMULATOR_IMAGE,
            ]
        );
        assert!(reqs.iter().all(|r| r.logger() == Some("android")));
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn sdk_root_prefers_config_then_android_home() {
        let runner = Arc::new(MockCommandRunner::new());
        let env = |key: &str| match key {
            "ANDROID_HOME" => Some("/opt/home".to_string()),
            "ANDROID_SDK_ROOT" => Some("/opt/sdk-root".to_string()),
            _ => None,
        };

        let ctx = PlatformContext::new(runner.clone(), PreflightConfig::default()).with_env(env);
        assert_eq!(
            resolve_sdk_root(&ctx),
            Some((PathBuf::from("/opt/home"), SdkRootSource::AndroidHome))
        );

        let mut config = PreflightConfig::default();
        config.android.sdk_root = Some(PathBuf::from("/opt/configured"));
        let ctx = PlatformContext::new(runner.clone(), config).with_env(env);
        assert_eq!(
            resolve_sdk_root(&ctx),
            Some((PathBuf::from("/opt/configured"), SdkRootSource::Config))
        );

        let ctx = PlatformContext::new(runner, PreflightConfig::default()).with_env(|key| {
            (key == "ANDROID_SDK_ROOT").then(|| "/opt/sdk-root".to_string())
        });
        assert_eq!(
            resolve_sdk_root(&ctx),
            Some((PathBuf::from("/opt/sdk-root"), SdkRootSource::AndroidSdkRoot))
        );
    }

    #[test]
    fn sdk_root_check_requires_existing_directory() {
        let temp = TempDir::new().unwrap();
        let runner = Arc::new(MockCommandRunner::new());

        let mut config = PreflightConfig::default();
        config.android.sdk_root = Some(temp.path().to_path_buf());
        let reqs = requirements(&context(&runner, config));
        let message = reqs[0].check().unwrap();
        assert!(message.contains("android.sdk_root"));

        let mut config = PreflightConfig::default();
        config.android.sdk_root = Some(temp.path().join("missing"));
        let reqs = requirements(&context(&runner, config));
        assert!(reqs[0].check().unwrap_err().contains("does not exist"));
    }

    #[test]
    fn sdk_root_check_fails_when_unset() {
        let runner = Arc::new(MockCommandRunner::new());
        let reqs = requirements(&context(&runner, PreflightConfig::default()));

        assert_eq!(
            reqs[0].check(),
            Err("Neither ANDROID_HOME nor ANDROID_SDK_ROOT is set".to_string())
        );
    }

    #[test]
    fn java_version_is_read_from_stderr() {
        let runner = Arc::new(MockCommandRunner::new().with_output(
            JAVA_VERSION_COMMAND,
            "",
            "openjdk version \"17.0.8\" 2023-07-18\nOpenJDK Runtime Environment\n",
        ));
        let reqs = requirements(&context(&runner, PreflightConfig::default()));

        assert_eq!(reqs[1].check(), Ok("Java 17.0.8".to_string()));
    }

    #[test]
    fn tools_run_from_sdk_root_when_known() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        let runner = Arc::new(
            MockCommandRunner::new()
                .with_stdout(&sdkmanager_command(Some(root), "--version"), "11.0\n")
                .with_stdout(&adb_command(Some(root), "--version"), ADB_OUTPUT),
        );
        let mut config = PreflightConfig::default();
        config.android.sdk_root = Some(root.to_path_buf());
        let reqs = requirements(&context(&runner, config));

        assert_eq!(reqs[2].check(), Ok("sdkmanager 11.0".to_string()));
        assert_eq!(
            reqs[3].check(),
            Ok("Android SDK platform tools 34.0.4-10411341".to_string())
        );
    }

    #[test]
    fn tools_fall_back_to_path() {
        assert_eq!(adb_command(None, "--version"), "adb --version");
        let with_root = adb_command(Some(Path::new("/opt/sdk")), "--version");
        assert!(with_root.starts_with('"'));
        assert!(with_root.contains("platform-tools"));
        assert!(with_root.ends_with("\" --version"));
    }

    #[test]
    fn package_checks_share_one_listing() {
        let command = sdkmanager_command(None, "--list_installed");
        let runner = Arc::new(MockCommandRunner::new().with_stdout(&command, LIST_INSTALLED));
        let reqs = requirements(&context(&runner, PreflightConfig::default()));

        assert_eq!(
            reqs[4].check(),
            Ok("Android API level 33 installed".to_string())
        );
        assert!(reqs[5].check().is_ok());
        assert_eq!(runner.calls(), vec![command]);
    }

    #[test]
    fn platform_api_check_honors_min_level() {
        let command = sdkmanager_command(None, "--list_installed");
        let runner = Arc::new(MockCommandRunner::new().with_stdout(&command, LIST_INSTALLED));
        let mut config = PreflightConfig::default();
        config.android.min_api_level = 34;
        let reqs = requirements(&context(&runner, config));

        assert_eq!(
            reqs[4].check(),
            Err(
                "No Android platform with API level 34 or newer (highest installed: 33)"
                    .to_string()
            )
        );
        assert!(reqs[4]
            .unfulfilled_message()
            .unwrap()
            .contains("platforms;android-34"));
    }

    #[test]
    fn listing_failure_fails_both_package_checks() {
        let runner = Arc::new(MockCommandRunner::new());
        let reqs = requirements(&context(&runner, PreflightConfig::default()));

        assert!(reqs[4].check().unwrap_err().contains("command not found"));
        assert!(reqs[5].check().unwrap_err().contains("command not found"));
    }

    #[test]
    fn parses_installed_package_paths() {
        let packages = parse_installed_packages(LIST_INSTALLED);
        assert_eq!(packages[0], "build-tools;33.0.0");
        assert!(!packages.contains(&"Path"));
        assert_eq!(packages.len(), 8);
    }

    #[test]
    fn platform_levels_skip_codenames() {
        assert_eq!(parse_platform_levels(LIST_INSTALLED), vec![30, 33]);
    }

    #[test]
    fn emulator_image_matches_abi_and_level() {
        let images = parse_system_images(LIST_INSTALLED);
        assert_eq!(images.len(), 3);

        let image = find_emulator_image(&images, 23, "x86_64").unwrap();
        assert_eq!(image.to_string(), "android-33 google_apis x86_64");

        let image = find_emulator_image(&images, 23, "arm64-v8a").unwrap();
        assert_eq!(image.api_level, 33);

        assert!(find_emulator_image(&images, 34, "x86_64").is_none());
        assert!(find_emulator_image(&images, 23, "armeabi-v7a").is_none());
    }

    #[test]
    fn emulator_image_ties_prefer_google_apis() {
        let images = vec![
            SystemImage {
                api_level: 33,
                variant: "default".to_string(),
                abi: "x86_64".to_string(),
            },
            SystemImage {
                api_level: 33,
                variant: "google_apis".to_string(),
                abi: "x86_64".to_string(),
            },
            SystemImage {
                api_level: 33,
                variant: "android-tv".to_string(),
                abi: "x86_64".to_string(),
            },
        ];

        let image = find_emulator_image(&images, 23, "x86_64").unwrap();
        assert_eq!(image.variant, "google_apis");
    }

    #[test]
    fn parses_adb_and_java_versions() {
        assert_eq!(parse_adb_version(ADB_OUTPUT), Some("34.0.4-10411341"));
        assert_eq!(parse_adb_version("garbage"), None);
        assert_eq!(
            parse_java_version("java version \"1.8.0_381\""),
            Some("1.8.0_381".to_string())
        );
    }
}
