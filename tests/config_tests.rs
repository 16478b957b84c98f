// tests/config_tests.rs

use gemini_key_rotator::config::{load_config, save_config, AppConfig, DEFAULT_KEYS_ENV_VAR};
use gemini_key_rotator::{
    build_rotator, global, RotationStrategy, RotatorError, RotatorOverrides,
};
use serial_test::serial;
use std::env;
use std::fs;
use tempfile::TempDir;

const ROTATION_VARS: [&str; 4] = [
    "GEMINI_KEY_ROTATION_STRATEGY",
    "GEMINI_MAX_ERRORS_PER_KEY",
    "GEMINI_COOLDOWN_MS",
    "GEMINI_AUTO_REACTIVATE",
];

fn clear_rotation_env() {
    for var in ROTATION_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_config_load_from_file() {
    clear_rotation_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");

    let config_content = r#"
keys_env_var: "MY_GEMINI_KEYS"
rotation:
  strategy: least-errors
  max_errors_per_key: 5
  cooldown_ms: 30000
"#;
    fs::write(&config_path, config_content).unwrap();

    let config = load_config(&config_path).unwrap();
    assert_eq!(config.keys_env_var, "MY_GEMINI_KEYS");
    assert_eq!(config.rotation.strategy, Some(RotationStrategy::LeastErrors));
    assert_eq!(config.rotation.max_errors_per_key, Some(5));
    assert_eq!(config.rotation.cooldown_ms, Some(30_000));
    assert_eq!(config.rotation.auto_reactivate, None);
}

#[test]
#[serial]
fn test_missing_file_uses_defaults() {
    clear_rotation_env();
    let temp_dir = TempDir::new().unwrap();
    let config = load_config(&temp_dir.path().join("absent.yaml")).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.keys_env_var, DEFAULT_KEYS_ENV_VAR);
}

#[test]
#[serial]
fn test_environment_overrides_file() {
    clear_rotation_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(
        &config_path,
        "rotation:\n  strategy: random\n  max_errors_per_key: 4\n",
    )
    .unwrap();

    env::set_var("GEMINI_MAX_ERRORS_PER_KEY", "9");
    let config = load_config(&config_path).unwrap();
    clear_rotation_env();

    assert_eq!(config.rotation.strategy, Some(RotationStrategy::Random));
    assert_eq!(config.rotation.max_errors_per_key, Some(9));
}

#[test]
#[serial]
fn test_invalid_yaml_reports_parse_error() {
    clear_rotation_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "rotation:\n  strategy: [not, a, strategy]\n").unwrap();

    let err = load_config(&config_path).unwrap_err();
    assert!(matches!(err, RotatorError::ConfigParse { .. }), "got {err:?}");
}

#[test]
#[serial]
fn test_unknown_fields_are_rejected() {
    clear_rotation_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "rotation:\n  max_errors: 3\n").unwrap();

    assert!(load_config(&config_path).is_err());
}

#[test]
#[serial]
fn test_zero_threshold_fails_validation() {
    clear_rotation_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "rotation:\n  max_errors_per_key: 0\n").unwrap();

    let err = load_config(&config_path).unwrap_err();
    assert!(matches!(err, RotatorError::ConfigValidation { .. }));
}

#[test]
#[serial]
fn test_save_and_reload() {
    clear_rotation_env();
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("saved.yaml");

    let config = AppConfig {
        keys_env_var: "TEAM_KEYS".to_string(),
        rotation: RotatorOverrides::default()
            .with_strategy(RotationStrategy::LeastErrors)
            .with_auto_reactivate(true),
    };
    save_config(&config, &config_path).unwrap();

    let reloaded = load_config(&config_path).unwrap();
    assert_eq!(reloaded, config);
}

#[test]
#[serial]
fn test_build_rotator_from_environment() {
    clear_rotation_env();
    let config = AppConfig {
        keys_env_var: "ROTATOR_TEST_KEYS".to_string(),
        rotation: RotatorOverrides::default(),
    };

    env::set_var("ROTATOR_TEST_KEYS", "AIzaSyFirstTestKey01;AIzaSySecondTestKey2");
    let rotator = build_rotator(&config).unwrap();
    env::remove_var("ROTATOR_TEST_KEYS");

    assert_eq!(rotator.get_total_count(), 2);
    assert!(global::has_multiple());
    global::clear_global();
}

#[test]
#[serial]
fn test_build_rotator_without_keys() {
    clear_rotation_env();
    env::remove_var("ROTATOR_TEST_KEYS");
    env::remove_var("GEMINI_API_KEY");
    let config = AppConfig {
        keys_env_var: "ROTATOR_TEST_KEYS".to_string(),
        rotation: RotatorOverrides::default(),
    };
    assert_eq!(build_rotator(&config).unwrap_err(), RotatorError::EmptyInput);
}
