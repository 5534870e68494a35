//! Integration tests for config module public API.

use mobile_preflight::config::{load_config, validate, PreflightConfig, CONFIG_FILE_NAME};
use mobile_preflight::platform::PlatformKind;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn full_config_round() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        r#"
command_timeout_secs: 30
ios:
  min_runtime: "16.4"
android:
  min_api_level: 33
  sdk_root: /opt/android-sdk
requirements:
  - title: Checking CocoaPods
    command: pod --version
    platform: ios
    unfulfilled_message: Run `gem install cocoapods`
  - title: Checking Node.js
    command: node --version
"#,
    )
    .unwrap();

    let config = load_config(temp.path(), None).unwrap();
    validate(&config).unwrap();

    assert_eq!(config.command_timeout_secs, 30);
    assert_eq!(config.ios.min_runtime_version(), Some((16, 4)));
    assert_eq!(config.android.min_api_level, 33);
    assert_eq!(config.android.sdk_root, Some(PathBuf::from("/opt/android-sdk")));

    let ios: Vec<_> = config
        .requirements_for(PlatformKind::Ios)
        .map(|r| r.title.as_str())
        .collect();
    let android: Vec<_> = config
        .requirements_for(PlatformKind::Android)
        .map(|r| r.title.as_str())
        .collect();
    assert_eq!(ios, vec!["Checking CocoaPods", "Checking Node.js"]);
    assert_eq!(android, vec!["Checking Node.js"]);
}

#[test]
fn defaults_without_config_file() {
    let temp = TempDir::new().unwrap();
    let config = load_config(temp.path(), None).unwrap();

    assert_eq!(config, PreflightConfig::default());
    assert_eq!(config.command_timeout_secs, 120);
    assert_eq!(config.ios.min_runtime, "13.0");
    assert_eq!(config.android.min_api_level, 23);
}

#[test]
fn unknown_platform_in_requirement_is_rejected() {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join(CONFIG_FILE_NAME),
        "requirements:\n  - title: x\n    command: y\n    platform: windows\n",
    )
    .unwrap();

    assert!(load_config(temp.path(), None).is_err());
}
