//! Layering of defaults and the TOML configuration file

use std::fs;
use subit_cli::config::ConfigManager;
use tempfile::TempDir;

fn manager_with(temp_dir: &TempDir, contents: Option<&str>) -> ConfigManager {
    let config_path = temp_dir.path().join("config.toml");
    if let Some(contents) = contents {
        fs::write(&config_path, contents).unwrap();
    }
    ConfigManager::with_path(config_path)
}

#[test]
fn test_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = manager_with(&temp_dir, None).load().unwrap();

    assert_eq!(config.client.app_tag, "SubIt");
    assert_eq!(
        config.client.endpoint,
        "http://api.opensubtitles.org/xml-rpc"
    );
    assert_eq!(config.client.subtitle_extension, "srt");
    assert!(config.client.username.is_empty());
    assert_eq!(config.network.timeout_seconds, 30);
    assert_eq!(config.network.login_retry_delay_ms, 3000);
}

#[test]
fn test_file_overrides_only_given_keys() {
    let temp_dir = TempDir::new().unwrap();
    let config = manager_with(
        &temp_dir,
        Some(
            r#"
[client]
endpoint = "https://mirror.example.org/xml-rpc"
subtitle_extension = "sub"

[network]
login_retry_delay_ms = 500
"#,
        ),
    )
    .load()
    .unwrap();

    assert_eq!(config.client.endpoint, "https://mirror.example.org/xml-rpc");
    assert_eq!(config.client.subtitle_extension, "sub");
    assert_eq!(config.client.app_tag, "SubIt");
    assert_eq!(config.network.login_retry_delay_ms, 500);
    assert_eq!(config.network.timeout_seconds, 30);
}

#[test]
fn test_invalid_values_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let manager = manager_with(&temp_dir, Some("[client]\nsubtitle_extension = \".srt\"\n"));
    assert!(manager.load().is_err());

    let temp_dir = TempDir::new().unwrap();
    let manager = manager_with(&temp_dir, Some("[client]\nendpoint = \"ftp://x\"\n"));
    assert!(manager.load().is_err());
}

#[test]
fn test_malformed_toml_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let manager = manager_with(&temp_dir, Some("[client\nendpoint ="));
    let err = manager.load().unwrap_err();
    assert!(format!("{err:#}").contains("config.toml"));
}

#[test]
fn test_config_path_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let manager = manager_with(&temp_dir, None);
    assert_eq!(manager.config_path(), temp_dir.path().join("config.toml"));
}
