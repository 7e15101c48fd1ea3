//! Tests for the Sleuth configuration system.

use std::sync::Mutex;

use sleuth_core::config::{ConfigOverrides, DetectionThresholds, SleuthConfig};
use sleuth_core::errors::ConfigError;

/// Global mutex to serialize tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn tempdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap()
}

/// Clear all SLEUTH_ env vars to prevent cross-test contamination.
fn clear_sleuth_env_vars() {
    for key in [
        "SLEUTH_DETECTION_EXACT_RUN_LENGTH",
        "SLEUTH_DETECTION_PATTERN_LENGTH",
        "SLEUTH_DETECTION_PATTERN_CAP",
        "SLEUTH_DETECTION_PROXIMITY_SECS",
        "SLEUTH_DETECTION_PATCHWORK_THRESHOLD",
        "SLEUTH_WORKER_THREAD_NAME",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn test_layered_resolution() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sleuth_env_vars();

    let dir = tempdir();
    std::fs::write(
        dir.path().join("sleuth.toml"),
        r#"
[detection]
exact_run_length = 60
pattern_length = 12
patchwork_threshold = 30
"#,
    )
    .unwrap();

    std::env::set_var("SLEUTH_DETECTION_PATTERN_LENGTH", "20");

    let overrides = ConfigOverrides {
        patchwork_threshold: Some(25),
        ..Default::default()
    };
    let config = SleuthConfig::load(dir.path(), Some(&overrides)).unwrap();

    // Project file beats defaults.
    assert_eq!(config.detection.exact_run_length, Some(60));
    // Env beats project.
    assert_eq!(config.detection.pattern_length, Some(20));
    // Overrides beat project.
    assert_eq!(config.detection.patchwork_threshold, Some(25));
    // Untouched values fall back to defaults.
    assert_eq!(config.detection.effective_pattern_cap(), 10);

    clear_sleuth_env_vars();
}

#[test]
fn test_load_missing_files_fallback() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sleuth_env_vars();

    let dir = tempdir();
    let config = SleuthConfig::load(dir.path(), None).unwrap();
    let thresholds = config.detection.thresholds();

    assert_eq!(thresholds, DetectionThresholds::default());
    assert_eq!(thresholds.exact_run_length, 75);
    assert_eq!(thresholds.pattern_length, 15);
    assert_eq!(thresholds.pattern_cap, 10);
    assert_eq!(thresholds.proximity_secs, 1);
    assert_eq!(thresholds.patchwork_threshold, 20);
    assert_eq!(config.worker.effective_thread_name(), "sleuth-intake");
}

#[test]
fn test_unparseable_env_value_is_ignored() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sleuth_env_vars();

    let dir = tempdir();
    std::env::set_var("SLEUTH_DETECTION_PATTERN_CAP", "lots");
    let config = SleuthConfig::load(dir.path(), None).unwrap();
    assert_eq!(config.detection.pattern_cap, None);

    clear_sleuth_env_vars();
}

#[test]
fn test_invalid_toml_syntax() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_sleuth_env_vars();

    let dir = tempdir();
    std::fs::write(dir.path().join("sleuth.toml"), "this is not valid toml {{{{").unwrap();

    match SleuthConfig::load(dir.path(), None).unwrap_err() {
        ConfigError::ParseError { path, .. } => assert!(path.ends_with("sleuth.toml")),
        other => panic!("Expected ParseError, got: {:?}", other),
    }
}

#[test]
fn test_zero_lengths_fail_validation() {
    for toml_str in [
        "[detection]\nexact_run_length = 0",
        "[detection]\npattern_length = 0",
        "[detection]\npattern_cap = 0",
        "[detection]\npatchwork_threshold = 0",
    ] {
        match SleuthConfig::from_toml(toml_str) {
            Err(ConfigError::ValidationFailed { field, .. }) => {
                assert!(field.starts_with("detection."), "field was {field}")
            }
            other => panic!("Expected ValidationFailed for {toml_str:?}, got: {other:?}"),
        }
    }
}

#[test]
fn test_negative_proximity_fails_validation() {
    let result = SleuthConfig::from_toml("[detection]\nproximity_secs = -1");
    assert!(matches!(
        result,
        Err(ConfigError::ValidationFailed { ref field, .. }) if field == "detection.proximity_secs"
    ));
}

#[test]
fn test_blank_thread_name_fails_validation() {
    let result = SleuthConfig::from_toml("[worker]\nthread_name = \"  \"");
    assert!(matches!(result, Err(ConfigError::ValidationFailed { .. })));
}

#[test]
fn test_unknown_keys_are_ignored() {
    let config = SleuthConfig::from_toml(
        r#"
[detection]
pattern_cap = 4
future_knob = true

[reporting]
format = "sarif"
"#,
    )
    .unwrap();
    assert_eq!(config.detection.pattern_cap, Some(4));
}

#[test]
fn test_toml_round_trip_keeps_values() {
    let config = SleuthConfig::from_toml(
        "[detection]\nexact_run_length = 50\nproximity_secs = 3\n[worker]\nthread_name = \"checker\"",
    )
    .unwrap();
    let reparsed = SleuthConfig::from_toml(&config.to_toml().unwrap()).unwrap();
    assert_eq!(reparsed.detection.thresholds(), config.detection.thresholds());
    assert_eq!(reparsed.worker.thread_name.as_deref(), Some("checker"));
}
