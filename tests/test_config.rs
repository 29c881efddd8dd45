// ABOUTME: Tests for loading the TOML config and the admin secrets file from disk

use fylshare::config::{AdminCredentials, AdminRole, AppConfig, ConfigError};
use std::time::Duration;

#[test]
fn test_load_from_file_then_env() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
        [api]
        base_url = "https://files.example.com"
        timeout_secs = 10

        [notifications]
        search_ms = 4000

        [upload]
        max_files = 3
        copy_code_to_clipboard = false

        [downloads]
        directory = "/tmp/fylshare-downloads"
        "#,
    )
    .unwrap();

    let mut config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.api.base_url, "https://files.example.com");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.notifications.search(), Duration::from_secs(4));
    assert_eq!(config.notifications.upload(), Duration::from_secs(15));
    assert_eq!(config.upload.max_files, 3);
    assert!(!config.upload.copy_code_to_clipboard);
    assert_eq!(
        config.downloads.directory(),
        std::path::PathBuf::from("/tmp/fylshare-downloads")
    );

    config.apply_env_with(|key| (key == "FYLSHARE_API_URL").then(|| "http://127.0.0.1:5001".to_string()));
    assert_eq!(config.api.base_url, "http://127.0.0.1:5001");
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_config_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = AppConfig::load_from(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::Io { .. })));
}

#[test]
fn test_malformed_config_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[api\nbase_url = ").unwrap();

    let err = AppConfig::load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("config.toml"));
}

#[test]
fn test_admin_secrets_file_and_env_identity() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("admin.toml");
    std::fs::write(
        &path,
        r#"
        [[credentials]]
        username = "owner"
        password = "correct horse"
        role = "main"
        "#,
    )
    .unwrap();

    let mut secrets = AdminCredentials::load_from(&path).unwrap();
    secrets
        .apply_env_with(|key| match key {
            "FYLSHARE_ADMIN_USER" => Some("viewer".to_string()),
            "FYLSHARE_ADMIN_PASSWORD" => Some("look-only".to_string()),
            _ => None,
        })
        .unwrap();

    assert_eq!(secrets.authenticate("owner", "correct horse"), Some(AdminRole::Main));
    assert_eq!(secrets.authenticate("viewer", "look-only"), Some(AdminRole::Team));
    assert_eq!(secrets.authenticate("viewer", "correct horse"), None);
}

#[test]
fn test_partial_env_identity_is_ignored() {
    let mut secrets = AdminCredentials::default();
    secrets
        .apply_env_with(|key| (key == "FYLSHARE_ADMIN_USER").then(|| "viewer".to_string()))
        .unwrap();
    assert!(secrets.is_empty());
}
