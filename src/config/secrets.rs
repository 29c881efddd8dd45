// ABOUTME: Admin credentials kept outside the main config, in a secrets file or the environment
// Nothing is compiled in: with no credentials configured, admin login is refused

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const ADMIN_USER_ENV: &str = "FYLSHARE_ADMIN_USER";
pub const ADMIN_PASSWORD_ENV: &str = "FYLSHARE_ADMIN_PASSWORD";
pub const ADMIN_ROLE_ENV: &str = "FYLSHARE_ADMIN_ROLE";
const SECRETS_FILE: &str = "admin.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    /// Sees access codes and may delete uploads and boxes.
    Main,
    /// Read-only view.
    #[default]
    Team,
}

impl AdminRole {
    pub fn can_delete(&self) -> bool {
        matches!(self, AdminRole::Main)
    }

    pub fn can_see_codes(&self) -> bool {
        matches!(self, AdminRole::Main)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdminRole::Main => "main",
            AdminRole::Team => "team",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "main" => Some(AdminRole::Main),
            "team" => Some(AdminRole::Team),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredential {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub role: AdminRole,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminCredentials {
    #[serde(default)]
    pub credentials: Vec<AdminCredential>,
}

impl AdminCredentials {
    pub fn default_path() -> Option<PathBuf> {
        super::AppConfig::config_dir().map(|dir| dir.join(SECRETS_FILE))
    }

    /// Secrets file first, then an extra identity from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut secrets = match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        secrets.apply_env_with(|key| std::env::var(key).ok())?;
        if secrets.is_empty() {
            warn!("No admin credentials configured; admin screen is locked");
        }
        Ok(secrets)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let secrets: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Loaded {} admin identities from {}", secrets.credentials.len(), path.display());
        Ok(secrets)
    }

    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        let (Some(username), Some(password)) = (lookup(ADMIN_USER_ENV), lookup(ADMIN_PASSWORD_ENV)) else {
            return Ok(());
        };
        let role = match lookup(ADMIN_ROLE_ENV) {
            Some(raw) => AdminRole::parse(&raw)
                .ok_or_else(|| ConfigError::InvalidCredentials(format!("unknown role {raw:?}")))?,
            None => AdminRole::default(),
        };
        if username.is_empty() || password.is_empty() {
            return Err(ConfigError::InvalidCredentials("empty username or password".to_string()));
        }
        self.credentials.push(AdminCredential { username, password, role });
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.credentials.is_empty()
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Option<AdminRole> {
        self.credentials
            .iter()
            .find(|c| c.username == username && c.password == password)
            .map(|c| c.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn secrets() -> AdminCredentials {
        toml::from_str(
            r#"
            [[credentials]]
            username = "owner"
            password = "s3cret"
            role = "main"

            [[credentials]]
            username = "helper"
            password = "helper-pass"
            "#,
        )
        .expect("valid secrets toml")
    }

    #[test]
    fn authenticate_returns_the_matching_role() {
        let secrets = secrets();
        assert_eq!(secrets.authenticate("owner", "s3cret"), Some(AdminRole::Main));
        assert_eq!(secrets.authenticate("helper", "helper-pass"), Some(AdminRole::Team));
        assert_eq!(secrets.authenticate("owner", "wrong"), None);
    }

    #[test]
    fn nothing_configured_means_nobody_gets_in() {
        let secrets = AdminCredentials::default();
        assert!(secrets.is_empty());
        assert_eq!(secrets.authenticate("", ""), None);
    }

    #[test]
    fn env_identity_is_added_with_its_role() {
        let mut secrets = AdminCredentials::default();
        secrets
            .apply_env_with(|key| match key {
                ADMIN_USER_ENV => Some("ops".to_string()),
                ADMIN_PASSWORD_ENV => Some("pw".to_string()),
                ADMIN_ROLE_ENV => Some("Main".to_string()),
                _ => None,
            })
            .expect("valid env identity");
        assert_eq!(secrets.authenticate("ops", "pw"), Some(AdminRole::Main));
    }

    #[test]
    fn unknown_env_role_is_an_error() {
        let mut secrets = AdminCredentials::default();
        let result = secrets.apply_env_with(|key| match key {
            ADMIN_USER_ENV => Some("ops".to_string()),
            ADMIN_PASSWORD_ENV => Some("pw".to_string()),
            ADMIN_ROLE_ENV => Some("root".to_string()),
            _ => None,
        });
        assert!(matches!(result, Err(ConfigError::InvalidCredentials(_))));
    }

    #[test]
    fn debug_output_hides_passwords() {
        let rendered = format!("{:?}", secrets());
        assert!(!rendered.contains("s3cret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn team_role_is_read_only() {
        assert!(AdminRole::Main.can_delete());
        assert!(!AdminRole::Team.can_delete());
        assert!(!AdminRole::Team.can_see_codes());
    }
}
