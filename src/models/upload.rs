// ABOUTME: Anonymous upload data model: local files to send and packages found by code

use super::AccessCode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Aggregate limit for one anonymous upload (1 GiB).
pub const MAX_TOTAL_UPLOAD_BYTES: u64 = 1024 * 1024 * 1024;

/// Files accepted per anonymous upload batch.
pub const MAX_FILES_PER_UPLOAD: usize = 10;

#[derive(Debug, Clone)]
pub enum FileBody {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

/// A local file selected for upload. `size` is captured at selection time so
/// validation never touches the disk.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub size: u64,
    pub body: FileBody,
}

impl UploadFile {
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path).await?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("file")
            .to_string();

        Ok(Self {
            name,
            size: metadata.len(),
            body: FileBody::Path(path.to_path_buf()),
        })
    }

    pub fn in_memory(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            size: bytes.len() as u64,
            body: FileBody::Memory(bytes.into()),
        }
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        match &self.body {
            FileBody::Path(path) => tokio::fs::read(path).await,
            FileBody::Memory(bytes) => Ok(bytes.to_vec()),
        }
    }
}

pub fn total_size(files: &[UploadFile]) -> u64 {
    files.iter().map(|f| f.size).sum()
}

pub fn format_size(bytes: u64) -> String {
    const MB: f64 = 1024.0 * 1024.0;
    format!("{:.1} MB", bytes as f64 / MB)
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub name: String,
    pub files: Vec<UploadFile>,
}

impl UploadRequest {
    pub fn new(name: impl Into<String>, files: Vec<UploadFile>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    pub fn total_size(&self) -> u64 {
        total_size(&self.files)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub code: AccessCode,
    pub name: String,
    pub total_size: u64,
    pub file_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFile {
    pub name: String,
    pub url: String,
}

/// What `GET /api/uploads/{code}` returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilePackage {
    pub name: String,
    #[serde(default)]
    pub files: Vec<PackageFile>,
}

/// One row of the admin uploads listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub files: Vec<PackageFile>,
    #[serde(default)]
    pub date: Option<String>,
}

impl UploadSummary {
    pub fn file_names(&self) -> String {
        self.files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>().join(", ")
    }

    pub fn date_label(&self) -> String {
        super::date_label(self.date.as_deref())
    }
}
