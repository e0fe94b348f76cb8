// tests/config_test.rs
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use autoversion::config::{load_config, Config, CONFIG_FILE_NAME};
use autoversion::domain::Version;
use autoversion::AutoversionError;
use serial_test::serial;
use tempfile::NamedTempFile;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.changelog.file, "CHANGELOG.md");
    assert_eq!(config.changelog.other_types, vec!["perf", "revert"]);
    assert_eq!(config.initial_version().unwrap(), Version::new(0, 0, 0));
}

#[test]
fn test_load_from_file() {
    let path = fixture("autoversion.toml");
    let config = load_config(path.to_str()).expect("Failed to load test config");
    assert_eq!(config.changelog.file, "HISTORY.md");
    assert!(config
        .changelog
        .other_types
        .contains(&"refactor".to_string()));
    assert_eq!(config.initial_version().unwrap(), Version::new(1, 0, 0));
}

#[test]
fn test_load_invalid_toml() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[changelog\nfile = ").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(temp_file.path().to_str()).unwrap_err();
    assert!(matches!(err, AutoversionError::Config(_)));
}

#[test]
fn test_load_missing_explicit_file() {
    let err = load_config(Some("/nonexistent/autoversion.toml")).unwrap_err();
    assert!(matches!(err, AutoversionError::Config(_)));
}

#[test]
#[serial]
fn test_load_from_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[version]\ninitial = \"0.4.0\"\n",
    )
    .unwrap();

    let previous = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None);
    env::set_current_dir(previous).unwrap();

    let config = result.unwrap();
    assert_eq!(config.version.initial, "0.4.0");
    assert_eq!(config.changelog.file, "CHANGELOG.md");
}
