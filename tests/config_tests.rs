//! Integration tests for configuration management

use gradecalc::config::{Config, ConfigOverrides};
use gradecalc::core::goal_seeker::{GoalSeeker, SeekStrategy};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert!(
        config.paths.data_file.ends_with("courses.json"),
        "Default data_file should point at a courses JSON file"
    );
    assert!(
        !config.paths.reports_dir.is_empty(),
        "Default reports_dir should not be empty"
    );
    assert!((config.solver.tolerance - 0.1).abs() < f64::EPSILON);
    assert!((config.solver.step - 0.5).abs() < f64::EPSILON);
    assert_eq!(config.solver.max_iterations, 9999);
    assert_eq!(config.solver.strategy, "stepwise");
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[paths]
data_file = "./courses.json"
reports_dir = "./reports"

[solver]
tolerance = 0.05
step = 0.25
max_iterations = 500
strategy = "proportional"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.data_file, "./courses.json");
    assert_eq!(config.paths.reports_dir, "./reports");
    assert!((config.solver.tolerance - 0.05).abs() < f64::EPSILON);
    assert!((config.solver.step - 0.25).abs() < f64::EPSILON);
    assert_eq!(config.solver.max_iterations, 500);
    assert_eq!(config.solver.strategy, "proportional");
}

#[test]
fn test_config_from_toml_partial() {
    // Missing fields and sections use serde defaults
    let toml_str = r#"
[logging]
level = "error"

[paths]
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.paths.data_file, "");
    assert_eq!(config.solver.max_iterations, 0);
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$GRADECALC/test.log"

[paths]
data_file = "$GRADECALC/courses.json"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("gradecalc"));
    assert!(!config.logging.file.contains("$GRADECALC"));
    assert!(config.paths.data_file.contains("gradecalc"));
    assert!(!config.paths.data_file.contains("$GRADECALC"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "debug").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config
        .set("verbose", "true")
        .expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);

    config
        .set("max-iterations", "250")
        .expect("Failed to set max_iterations");
    assert_eq!(config.get("max_iterations").unwrap(), "250");

    config
        .set("strategy", "Proportional")
        .expect("Failed to set strategy");
    assert_eq!(config.solver.strategy, "proportional");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let mut config = Config::from_defaults();

    assert!(config.set("level", "trace").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("tolerance", "-0.1").is_err());
    assert!(config.set("step", "0").is_err());
    assert!(config.set("max_iterations", "0").is_err());
    assert!(config.set("strategy", "bisection").is_err());

    // Nothing changed
    assert_eq!(config.solver.strategy, "stepwise");
    assert_eq!(config.solver.max_iterations, 9999);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("level", "debug").expect("Failed to set level");
    config.set("step", "2").expect("Failed to set step");
    assert_eq!(config.logging.level, "debug");

    config
        .unset("level", &defaults)
        .expect("Failed to unset level");
    config.unset("step", &defaults).expect("Failed to unset step");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert!((config.solver.step - defaults.solver.step).abs() < f64::EPSILON);

    assert!(config.unset("unknown_key", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("tolerance", "0.2").expect("Failed to set tolerance");

    // Manually save to our test location
    if let Some(parent) = config_file.parent() {
        fs::create_dir_all(parent).expect("Failed to create dir");
    }
    let toml_str = toml::to_string_pretty(&config).expect("Failed to serialize");
    fs::write(&config_file, toml_str).expect("Failed to write config");

    let content = fs::read_to_string(&config_file).expect("Failed to read config");
    let loaded_config = Config::from_toml(&content).expect("Failed to parse loaded config");

    assert_eq!(loaded_config.logging.level, "info");
    assert!((loaded_config.solver.tolerance - 0.2).abs() < f64::EPSILON);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        data_file: Some("/custom/courses.json".to_string()),
        reports_dir: Some("./custom_reports".to_string()),
        strategy: Some("proportional".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.paths.data_file, "/custom/courses.json");
    assert_eq!(config.paths.reports_dir, "./custom_reports");
    assert_eq!(config.solver.strategy, "proportional");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.paths.data_file, defaults.paths.data_file);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[paths]"));
    assert!(display_str.contains("[solver]"));

    assert!(display_str.contains("level"));
    assert!(display_str.contains("data_file"));
    assert!(display_str.contains("max_iterations"));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false

[paths]
data_file = ""
reports_dir = ""
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    let changed = config.merge_defaults(&defaults);

    assert!(
        changed,
        "merge_defaults should return true when fields are added"
    );
    assert_eq!(config.paths.data_file, defaults.paths.data_file);
    assert_eq!(config.solver.max_iterations, defaults.solver.max_iterations);
    assert_eq!(config.solver.strategy, defaults.solver.strategy);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"
verbose = false

[solver]
step = 1.0
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert!((config.solver.step - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_solver_config_builds_seeker() {
    let mut config = Config::from_defaults();
    config.set("strategy", "proportional").unwrap();
    config.set("tolerance", "0.25").unwrap();

    let seeker = GoalSeeker::from(&config.solver);
    assert_eq!(seeker.strategy, SeekStrategy::Proportional);
    assert!((seeker.tolerance - 0.25).abs() < f64::EPSILON);
    assert_eq!(seeker.max_iterations, 9999);
}

#[test]
fn test_get_app_dir() {
    let dir = Config::get_app_dir();

    assert!(dir.to_string_lossy().contains("gradecalc"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
