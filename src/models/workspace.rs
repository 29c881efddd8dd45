// ABOUTME: Box (workspace) data model: PIN-protected named containers of uploaded files

use super::UploadFile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxCredentials {
    pub box_name: String,
    pub pin: String,
}

impl BoxCredentials {
    pub fn new(box_name: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            box_name: box_name.into(),
            pin: pin.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoxAuthMode {
    #[default]
    Login,
    Create,
}

impl BoxAuthMode {
    pub fn endpoint(&self) -> &'static str {
        match self {
            BoxAuthMode::Login => "login",
            BoxAuthMode::Create => "create",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            BoxAuthMode::Login => BoxAuthMode::Create,
            BoxAuthMode::Create => BoxAuthMode::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            BoxAuthMode::Login => "Access Your Box",
            BoxAuthMode::Create => "Create New Box",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxFile {
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub url: Option<String>,
}

impl BoxFile {
    pub fn code_label(&self) -> &str {
        self.code.as_deref().unwrap_or("N/A")
    }
}

/// Body of box login/create/list responses. `files` is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxListing {
    #[serde(default)]
    pub files: Option<Vec<BoxFile>>,
}

#[derive(Debug, Clone)]
pub struct BoxAuthRequest {
    pub credentials: BoxCredentials,
    pub mode: BoxAuthMode,
}

#[derive(Debug, Clone)]
pub struct BoxUploadRequest {
    pub credentials: BoxCredentials,
    pub files: Vec<UploadFile>,
}

#[derive(Debug, Clone)]
pub struct BoxFileDeleteRequest {
    pub credentials: BoxCredentials,
    pub code: String,
}

/// One row of the admin workspaces listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSummary {
    pub box_name: String,
    #[serde(default)]
    pub pin: String,
    #[serde(default)]
    pub files: Vec<BoxFile>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl WorkspaceSummary {
    pub fn created_label(&self) -> String {
        super::date_label(self.created_at.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn credentials_serialize_with_camel_case_keys() {
        let json = serde_json::to_value(BoxCredentials::new("MySharedBox", "1234")).expect("serializable");
        assert_eq!(json, serde_json::json!({ "boxName": "MySharedBox", "pin": "1234" }));
    }

    #[test]
    fn box_file_tolerates_missing_optional_fields() {
        let file: BoxFile = serde_json::from_str(r#"{"name":"notes.txt"}"#).expect("valid json");
        assert_eq!(file.code_label(), "N/A");
        assert_eq!(file.size, 0);
        assert_eq!(file.url, None);
    }

    #[test]
    fn auth_mode_toggles_between_login_and_create() {
        assert_eq!(BoxAuthMode::default(), BoxAuthMode::Login);
        assert_eq!(BoxAuthMode::Login.toggle(), BoxAuthMode::Create);
        assert_eq!(BoxAuthMode::Create.toggle().endpoint(), "login");
    }
}
