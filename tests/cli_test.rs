//! Integration tests for the command-line interface.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// A project whose Android checks cannot find an SDK, plus a custom
/// requirement that always fails.
const FAILING_ANDROID_CONFIG: &str = r#"
command_timeout_secs: 20
android:
  sdk_root: /nonexistent/android-sdk
requirements:
  - title: Checking custom tool
    command: exit 3
    platform: android
    unfulfilled_message: Install the custom tool
"#;

fn project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".mobile-preflight.yml"), config).unwrap();
    temp
}

fn preflight(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("mobile-preflight"));
    cmd.current_dir(temp.path())
        .env("CI", "true")
        .env("NO_COLOR", "1")
        .env_remove("ANDROID_HOME")
        .env_remove("ANDROID_SDK_ROOT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn cli_shows_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("mobile-preflight"));
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("ready for iOS or Android development"))
        .stdout(predicate::str::contains("setup"))
        .stdout(predicate::str::contains("list"));
    Ok(())
}

#[test]
fn cli_shows_version() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("mobile-preflight"));
    cmd.arg("--version");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn cli_requires_subcommand() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin("mobile-preflight"));
    cmd.assert().failure().code(2);
    Ok(())
}

#[test]
fn cli_rejects_invalid_platform() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    preflight(&temp)
        .args(["setup", "-p", "windows"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("windows"));
    Ok(())
}

#[test]
fn cli_list_prints_titles_in_order() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    let output = preflight(&temp)
        .args(["list", "--platform", "iOS"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let stdout = String::from_utf8(output)?;
    let macos = stdout.find("Checking macOS environment").unwrap();
    let xcode = stdout.find("Checking Xcode installation").unwrap();
    let runtimes = stdout.find("Checking iOS simulator runtimes").unwrap();
    assert!(macos < xcode && xcode < runtimes);
    Ok(())
}

#[test]
fn cli_list_includes_custom_requirements() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(FAILING_ANDROID_CONFIG);
    preflight(&temp)
        .args(["list", "-p", "android"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking Android SDK root"))
        .stdout(predicate::str::contains("Checking custom tool"));
    Ok(())
}

#[test]
fn cli_setup_json_reports_failures() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(FAILING_ANDROID_CONFIG);
    let output = preflight(&temp)
        .args(["setup", "-p", "android", "--json"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    assert_eq!(report["hasMetAllRequirements"], false);

    let tests = report["tests"].as_array().unwrap();
    assert_eq!(tests[0]["title"], "Checking Android SDK root");
    assert_eq!(tests[0]["hasPassed"], false);

    let custom = tests.last().unwrap();
    assert_eq!(custom["title"], "Checking custom tool");
    assert_eq!(custom["hasPassed"], false);
    assert_eq!(custom["message"], "Install the custom tool");
    assert!(custom["durationMs"].is_u64());
    assert!(report["checkedAt"].is_string());
    Ok(())
}

#[test]
fn cli_setup_prints_failure_and_recommendation() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(FAILING_ANDROID_CONFIG);
    preflight(&temp)
        .args(["setup", "-p", "android"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("[FAIL] Checking custom tool"))
        .stdout(predicate::str::contains("Install the custom tool"))
        .stdout(predicate::str::contains("mobile-preflight setup -p android"))
        .stderr(predicate::str::contains("Setup failed for Android"));
    Ok(())
}

#[test]
fn cli_setup_keeps_stderr_free_of_check_logs() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(FAILING_ANDROID_CONFIG);
    let output = preflight(&temp)
        .args(["setup", "-p", "android"])
        .assert()
        .failure()
        .code(1)
        .get_output()
        .stderr
        .clone();

    let stderr = String::from_utf8(output)?;
    assert!(!stderr.contains("INFO"), "unexpected log output: {}", stderr);
    assert!(!stderr.contains("Checking requirement"));
    assert!(!stderr.contains("Requirement not met"));
    assert!(!stderr.contains("Executing setup"));
    Ok(())
}

#[test]
fn cli_debug_flag_enables_check_logs() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(FAILING_ANDROID_CONFIG);
    preflight(&temp)
        .args(["--debug", "setup", "-p", "android", "--json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Checking requirement"))
        .stderr(predicate::str::contains("Requirement not met"));
    Ok(())
}

#[test]
fn cli_verbose_flag_logs_unmet_requirements() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(FAILING_ANDROID_CONFIG);
    preflight(&temp)
        .args(["-v", "setup", "-p", "android", "--json"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Requirement not met"))
        .stderr(predicate::str::contains("Checking requirement").not());
    Ok(())
}

#[cfg(unix)]
#[test]
fn cli_custom_requirement_output_ignores_shell_rc_files() -> Result<(), Box<dyn std::error::Error>>
{
    let temp = project(
        r#"
requirements:
  - title: Checking kernel name
    command: uname
    platform: ios
"#,
    );
    let home = TempDir::new()?;
    for rc in [".bashrc", ".bash_profile", ".profile", ".zshrc"] {
        fs::write(home.path().join(rc), "echo rc-banner\n")?;
    }

    let output = preflight(&temp)
        .env("HOME", home.path())
        .env("SHELL", "/bin/bash")
        .args(["setup", "-p", "ios", "--json"])
        .assert()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output)?;
    let tests = report["tests"].as_array().unwrap();
    let custom = tests.last().unwrap();
    assert_eq!(custom["title"], "Checking kernel name");
    assert_eq!(custom["hasPassed"], true);
    assert!(!custom["message"].as_str().unwrap().contains("rc-banner"));
    assert!(!tests[0]["message"].as_str().unwrap().contains("rc-banner"));
    Ok(())
}

#[test]
fn cli_list_includes_platformless_custom_requirements() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(
        r#"
requirements:
  - title: Checking shell
    command: echo ready
"#,
    );
    preflight(&temp)
        .args(["list", "-p", "ios"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking shell"));
    Ok(())
}

#[test]
fn cli_invalid_config_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project("command_timeout_secs: 0\n");
    preflight(&temp)
        .args(["setup", "-p", "ios"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Invalid configuration"));
    Ok(())
}

#[test]
fn cli_unknown_config_field_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project("ios:\n  min_runtime: \"14.0\"\n  simulator: iPhone 15\n");
    preflight(&temp)
        .args(["list", "-p", "ios"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Failed to parse config"));
    Ok(())
}

#[test]
fn cli_missing_config_override_exits_two() -> Result<(), Box<dyn std::error::Error>> {
    let temp = TempDir::new()?;
    preflight(&temp)
        .args(["list", "-p", "ios", "--config", "missing.yml"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Configuration not found"));
    Ok(())
}

#[test]
fn cli_project_flag_selects_config() -> Result<(), Box<dyn std::error::Error>> {
    let temp = project(FAILING_ANDROID_CONFIG);
    let elsewhere = TempDir::new()?;
    let mut cmd = preflight(&elsewhere);
    cmd.arg("--project").arg(temp.path());
    cmd.args(["list", "-p", "android"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking custom tool"));
    Ok(())
}
