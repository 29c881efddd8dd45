// ABOUTME: Application configuration loaded at startup from TOML, environment and CLI
// Replaces compiled-in constants such as the API base URL and admin credentials

pub mod secrets;

pub use secrets::{AdminCredential, AdminCredentials, AdminRole};

use crate::models::{MAX_FILES_PER_UPLOAD, MAX_TOTAL_UPLOAD_BYTES};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_API_URL: &str = "http://localhost:5001";
pub const API_URL_ENV: &str = "FYLSHARE_API_URL";
const CONFIG_DIR: &str = "fylshare";
const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid API base URL {0:?}")]
    InvalidUrl(String),
    #[error("Invalid admin credentials: {0}")]
    InvalidCredentials(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

/// How long each screen keeps its toasts up, in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub search_ms: u64,
    pub upload_ms: u64,
    pub workspace_ms: u64,
    pub admin_ms: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            search_ms: 3_000,
            upload_ms: 15_000,
            workspace_ms: 5_000,
            admin_ms: 5_000,
        }
    }
}

impl NotificationConfig {
    pub fn search(&self) -> Duration {
        Duration::from_millis(self.search_ms)
    }

    pub fn upload(&self) -> Duration {
        Duration::from_millis(self.upload_ms)
    }

    pub fn workspace(&self) -> Duration {
        Duration::from_millis(self.workspace_ms)
    }

    pub fn admin(&self) -> Duration {
        Duration::from_millis(self.admin_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_total_bytes: u64,
    pub max_files: usize,
    pub copy_code_to_clipboard: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_total_bytes: MAX_TOTAL_UPLOAD_BYTES,
            max_files: MAX_FILES_PER_UPLOAD,
            copy_code_to_clipboard: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub directory: Option<PathBuf>,
}

impl DownloadConfig {
    pub fn directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub notifications: NotificationConfig,
    pub upload: UploadConfig,
    pub downloads: DownloadConfig,
}

impl AppConfig {
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR))
    }

    pub fn default_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE))
    }

    /// Defaults, then the user's config file if it exists, then environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
            info!("Using API base URL from {}", API_URL_ENV);
            self.api.base_url = url.trim().to_string();
        }
    }

    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.base_url = url;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            _ => Err(ConfigError::InvalidUrl(self.api.base_url.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_hosted_service() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:5001");
        assert_eq!(config.notifications.search(), Duration::from_secs(3));
        assert_eq!(config.notifications.upload(), Duration::from_secs(15));
        assert_eq!(config.upload.max_total_bytes, 1024 * 1024 * 1024);
        assert_eq!(config.upload.max_files, 10);
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [api]
            base_url = "https://filehub.example.com"

            [notifications]
            upload_ms = 20000
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.api.base_url, "https://filehub.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.notifications.upload_ms, 20_000);
        assert_eq!(config.notifications.search_ms, 3_000);
    }

    #[test]
    fn env_overrides_file_and_cli_overrides_env() {
        let mut config = AppConfig::default();
        config.apply_env_with(|key| (key == API_URL_ENV).then(|| "https://env.example.com".to_string()));
        assert_eq!(config.api.base_url, "https://env.example.com");

        let config = config.with_api_url(Some("https://cli.example.com".to_string()));
        assert_eq!(config.api.base_url, "https://cli.example.com");
    }

    #[test]
    fn blank_env_value_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_env_with(|_| Some("   ".to_string()));
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn validate_rejects_non_http_urls() {
        let mut config = AppConfig::default();
        assert!(config.validate().is_ok());

        config.api.base_url = "ftp://files.example.com".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::InvalidUrl(_))));

        config.api.base_url = "localhost".to_string();
        assert!(config.validate().is_err());
    }
}
