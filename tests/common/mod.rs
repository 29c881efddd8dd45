// ABOUTME: Shared test fixtures: an in-memory backend with canned responses and a call log
// The optional gate holds every call open so tests can observe the in-flight phase

#![allow(dead_code)]

use fylshare::api::{Transport, TransportError};
use fylshare::clock::ManualClock;
use fylshare::models::{
    AccessCode, BoxAuthMode, BoxCredentials, BoxFile, BoxListing, FilePackage, PackageFile, UploadFile,
    UploadRequest, UploadSummary, WorkspaceSummary,
};
use fylshare::notification::{NotificationManager, SharedNotifications};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Upload {
        name: String,
        code: String,
        file_count: usize,
        size: u64,
    },
    Fetch(String),
    Auth(String, BoxAuthMode),
    ListBox(String),
    BoxUpload(String, usize),
    BoxDelete(String, String),
    ListUploads,
    DeleteUpload(String),
    ListWorkspaces,
    DeleteWorkspace(String),
    Download(String),
}

pub struct FakeTransport {
    pub calls: Mutex<Vec<Call>>,
    pub gate: Option<Arc<Notify>>,
    pub fetch: Result<FilePackage, TransportError>,
    pub upload: Result<(), TransportError>,
    pub auth: Result<BoxListing, TransportError>,
    pub box_files: Result<Vec<BoxFile>, TransportError>,
    pub box_upload: Result<(), TransportError>,
    pub box_delete: Result<(), TransportError>,
    pub uploads: Result<Vec<UploadSummary>, TransportError>,
    pub workspaces: Result<Vec<WorkspaceSummary>, TransportError>,
    pub admin_delete: Result<(), TransportError>,
    pub download: Result<Vec<u8>, TransportError>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            gate: None,
            fetch: Ok(sample_package()),
            upload: Ok(()),
            auth: Ok(BoxListing::default()),
            box_files: Ok(Vec::new()),
            box_upload: Ok(()),
            box_delete: Ok(()),
            uploads: Ok(Vec::new()),
            workspaces: Ok(Vec::new()),
            admin_delete: Ok(()),
            download: Ok(b"file contents".to_vec()),
        }
    }
}

impl FakeTransport {
    /// Every call blocks until the returned gate is notified once per call.
    pub fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let transport = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (transport, gate)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }
}

impl Transport for FakeTransport {
    async fn upload_package(&self, request: &UploadRequest, code: &AccessCode) -> Result<(), TransportError> {
        self.record(Call::Upload {
            name: request.name.clone(),
            code: code.to_string(),
            file_count: request.files.len(),
            size: request.total_size(),
        })
        .await;
        self.upload.clone()
    }

    async fn fetch_package(&self, code: &str) -> Result<FilePackage, TransportError> {
        self.record(Call::Fetch(code.to_string())).await;
        self.fetch.clone()
    }

    async fn authenticate_box(&self, credentials: &BoxCredentials, mode: BoxAuthMode) -> Result<BoxListing, TransportError> {
        self.record(Call::Auth(credentials.box_name.clone(), mode)).await;
        self.auth.clone()
    }

    async fn list_box_files(&self, credentials: &BoxCredentials) -> Result<Vec<BoxFile>, TransportError> {
        self.record(Call::ListBox(credentials.box_name.clone())).await;
        self.box_files.clone()
    }

    async fn upload_box_files(&self, credentials: &BoxCredentials, files: &[UploadFile]) -> Result<(), TransportError> {
        self.record(Call::BoxUpload(credentials.box_name.clone(), files.len())).await;
        self.box_upload.clone()
    }

    async fn delete_box_file(&self, credentials: &BoxCredentials, code: &str) -> Result<(), TransportError> {
        self.record(Call::BoxDelete(credentials.box_name.clone(), code.to_string()))
            .await;
        self.box_delete.clone()
    }

    async fn list_uploads(&self) -> Result<Vec<UploadSummary>, TransportError> {
        self.record(Call::ListUploads).await;
        self.uploads.clone()
    }

    async fn delete_upload(&self, code: &str) -> Result<(), TransportError> {
        self.record(Call::DeleteUpload(code.to_string())).await;
        self.admin_delete.clone()
    }

    async fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>, TransportError> {
        self.record(Call::ListWorkspaces).await;
        self.workspaces.clone()
    }

    async fn delete_workspace(&self, box_name: &str) -> Result<(), TransportError> {
        self.record(Call::DeleteWorkspace(box_name.to_string())).await;
        self.admin_delete.clone()
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<u64, TransportError> {
        self.record(Call::Download(url.to_string())).await;
        let bytes = self.download.clone()?;
        tokio::fs::write(destination, &bytes)
            .await
            .map_err(|e| TransportError::Local(e.to_string()))?;
        Ok(bytes.len() as u64)
    }
}

pub fn sample_package() -> FilePackage {
    FilePackage {
        name: "Nobitha".to_string(),
        files: vec![
            PackageFile {
                name: "report.pdf".to_string(),
                url: "/uploads/report.pdf".to_string(),
            },
            PackageFile {
                name: "photo.jpg".to_string(),
                url: "/uploads/photo.jpg".to_string(),
            },
        ],
    }
}

pub fn box_file(code: &str, name: &str) -> BoxFile {
    BoxFile {
        code: Some(code.to_string()),
        name: name.to_string(),
        size: 1024,
        url: Some(format!("/workspaces/{name}")),
    }
}

pub fn notifications() -> (ManualClock, SharedNotifications) {
    let clock = ManualClock::new();
    let shared = NotificationManager::shared(Arc::new(clock.clone()));
    (clock, shared)
}

/// An upload file that claims `size` bytes without allocating them.
pub fn sized_file(name: &str, size: u64) -> UploadFile {
    let mut file = UploadFile::in_memory(name, Vec::new());
    file.size = size;
    file
}
