//! Configuration file tests

use std::fs;

use tempfile::TempDir;
use textcopy::config::StaticConfig;
use textcopy::errors::TextCopyError;

#[test]
fn test_saved_sample_loads_back_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("textcopy.toml");

    let mut config = StaticConfig::default();
    config.server.port = 9090;
    config.store.ttl_secs = 120;
    config.frontend.static_dir = "/srv/textcopy".to_string();
    config.save_to_file(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let loaded = StaticConfig::from_toml_str(&content).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.validate().is_ok());
}

#[test]
fn test_sample_config_is_valid_toml() {
    let sample = StaticConfig::generate_sample_config();
    assert!(sample.contains("[server]"));
    assert!(sample.contains("[store]"));

    let parsed = StaticConfig::from_toml_str(&sample).unwrap();
    assert_eq!(parsed.store.ttl_secs, 3600);
    assert_eq!(parsed.frontend.api_prefix, "/api");
}

#[test]
fn test_explicit_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let result = StaticConfig::load(Some(path.to_str().unwrap()));
    assert!(matches!(result, Err(TextCopyError::Config(_))));
}

#[test]
fn test_invalid_values_fail_validation() {
    let config = StaticConfig::from_toml_str(
        r#"
        [store]
        ttl_secs = 0
        "#,
    )
    .unwrap();
    let err = config.validate().unwrap_err();
    assert_eq!(err.code(), "E004");
    assert!(err.message().contains("ttl_secs"));
}
