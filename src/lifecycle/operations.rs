// ABOUTME: One Operation per network action: search, uploads, box access, admin and downloads
// Validation rules and success wording live here; the controller drives the phases

use super::{FailureReason, Operation, RequestKind};
use crate::api::{Transport, TransportError};
use crate::models::{
    AccessCode, BoxAuthMode, BoxAuthRequest, BoxFile, BoxFileDeleteRequest, BoxUploadRequest, FilePackage,
    UploadReceipt, UploadRequest, UploadSummary, WorkspaceSummary, MAX_TOTAL_UPLOAD_BYTES,
};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchOperation;

impl Operation for SearchOperation {
    type Input = String;
    type Output = FilePackage;

    fn kind(&self) -> RequestKind {
        RequestKind::Search
    }

    fn validate(&self, input: &String) -> Result<(), FailureReason> {
        if AccessCode::is_valid(input.trim()) {
            Ok(())
        } else {
            Err(FailureReason::InvalidCode)
        }
    }

    async fn execute<T: Transport>(&self, transport: &T, input: &String) -> Result<FilePackage, TransportError> {
        transport.fetch_package(input.trim()).await
    }

    fn success_message(&self, _input: &String, _output: &FilePackage) -> String {
        "File found successfully!".to_string()
    }
}

/// Anonymous upload. The access code is generated right before the request
/// goes out, so a rejected validation never consumes one.
#[derive(Debug, Clone, Copy)]
pub struct UploadOperation {
    max_total_bytes: u64,
}

impl UploadOperation {
    pub fn new(max_total_bytes: u64) -> Self {
        Self { max_total_bytes }
    }

    pub fn max_total_bytes(&self) -> u64 {
        self.max_total_bytes
    }
}

impl Default for UploadOperation {
    fn default() -> Self {
        Self::new(MAX_TOTAL_UPLOAD_BYTES)
    }
}

impl Operation for UploadOperation {
    type Input = UploadRequest;
    type Output = UploadReceipt;

    fn kind(&self) -> RequestKind {
        RequestKind::Upload
    }

    fn validate(&self, input: &UploadRequest) -> Result<(), FailureReason> {
        if input.name.trim().is_empty() || input.files.is_empty() {
            return Err(FailureReason::MissingFields);
        }
        if input.total_size() > self.max_total_bytes {
            return Err(FailureReason::SizeLimitExceeded);
        }
        Ok(())
    }

    async fn execute<T: Transport>(&self, transport: &T, input: &UploadRequest) -> Result<UploadReceipt, TransportError> {
        let code = AccessCode::generate().map_err(|e| TransportError::Local(format!("code generation: {e}")))?;
        let request = UploadRequest::new(input.name.trim(), input.files.clone());
        debug!("Uploading {} files as {}", request.files.len(), code);

        transport.upload_package(&request, &code).await?;

        Ok(UploadReceipt {
            total_size: request.total_size(),
            file_count: request.files.len(),
            name: request.name,
            code,
        })
    }

    fn success_message(&self, _input: &UploadRequest, output: &UploadReceipt) -> String {
        format!("Upload successful! Your code: {}", output.code)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoxAuthOperation;

impl Operation for BoxAuthOperation {
    type Input = BoxAuthRequest;
    type Output = Vec<BoxFile>;

    fn kind(&self) -> RequestKind {
        RequestKind::BoxAuth
    }

    fn validate(&self, input: &BoxAuthRequest) -> Result<(), FailureReason> {
        let creds = &input.credentials;
        if creds.box_name.trim().is_empty() || creds.pin.trim().is_empty() {
            return Err(FailureReason::MissingFields);
        }
        Ok(())
    }

    async fn execute<T: Transport>(&self, transport: &T, input: &BoxAuthRequest) -> Result<Vec<BoxFile>, TransportError> {
        let listing = transport.authenticate_box(&input.credentials, input.mode).await?;
        if input.mode == BoxAuthMode::Create {
            return Ok(listing.files.unwrap_or_default());
        }

        // The login body may omit files; the workspace listing is authoritative.
        match transport.list_box_files(&input.credentials).await {
            Ok(files) => Ok(files),
            Err(e) => {
                warn!("Box file refresh after login failed: {}", e);
                Ok(listing.files.unwrap_or_default())
            }
        }
    }

    fn success_message(&self, input: &BoxAuthRequest, _output: &Vec<BoxFile>) -> String {
        match input.mode {
            BoxAuthMode::Login => "Logged in successfully".to_string(),
            BoxAuthMode::Create => "Box created successfully".to_string(),
        }
    }
}

/// Uploads into an open box. The output is the refreshed listing, or `None`
/// when the upload landed but the refresh did not.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoxUploadOperation;

impl Operation for BoxUploadOperation {
    type Input = BoxUploadRequest;
    type Output = Option<Vec<BoxFile>>;

    fn kind(&self) -> RequestKind {
        RequestKind::BoxUpload
    }

    fn validate(&self, input: &BoxUploadRequest) -> Result<(), FailureReason> {
        if input.files.is_empty() {
            return Err(FailureReason::MissingFields);
        }
        Ok(())
    }

    async fn execute<T: Transport>(
        &self,
        transport: &T,
        input: &BoxUploadRequest,
    ) -> Result<Option<Vec<BoxFile>>, TransportError> {
        transport.upload_box_files(&input.credentials, &input.files).await?;
        Ok(refresh(transport, input).await)
    }

    fn success_message(&self, input: &BoxUploadRequest, _output: &Option<Vec<BoxFile>>) -> String {
        if input.files.len() == 1 {
            "File uploaded successfully".to_string()
        } else {
            "Files uploaded successfully".to_string()
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BoxFileDeleteOperation;

impl Operation for BoxFileDeleteOperation {
    type Input = BoxFileDeleteRequest;
    type Output = Option<Vec<BoxFile>>;

    fn kind(&self) -> RequestKind {
        RequestKind::BoxFileDelete
    }

    fn validate(&self, input: &BoxFileDeleteRequest) -> Result<(), FailureReason> {
        if input.code.trim().is_empty() {
            return Err(FailureReason::MissingFields);
        }
        Ok(())
    }

    async fn execute<T: Transport>(
        &self,
        transport: &T,
        input: &BoxFileDeleteRequest,
    ) -> Result<Option<Vec<BoxFile>>, TransportError> {
        transport.delete_box_file(&input.credentials, input.code.trim()).await?;
        Ok(refresh(transport, input).await)
    }

    fn success_message(&self, _input: &BoxFileDeleteRequest, _output: &Option<Vec<BoxFile>>) -> String {
        "File deleted".to_string()
    }
}

trait HasCredentials {
    fn credentials(&self) -> &crate::models::BoxCredentials;
}

impl HasCredentials for BoxUploadRequest {
    fn credentials(&self) -> &crate::models::BoxCredentials {
        &self.credentials
    }
}

impl HasCredentials for BoxFileDeleteRequest {
    fn credentials(&self) -> &crate::models::BoxCredentials {
        &self.credentials
    }
}

async fn refresh<T: Transport, R: HasCredentials + Sync>(transport: &T, request: &R) -> Option<Vec<BoxFile>> {
    match transport.list_box_files(request.credentials()).await {
        Ok(files) => Some(files),
        Err(e) => {
            warn!("Box file refresh failed: {}", e);
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminTarget {
    Upload(String),
    Workspace(String),
}

impl AdminTarget {
    pub fn identifier(&self) -> &str {
        match self {
            AdminTarget::Upload(code) => code,
            AdminTarget::Workspace(name) => name,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdminDeleteOperation;

impl Operation for AdminDeleteOperation {
    type Input = AdminTarget;
    type Output = ();

    fn kind(&self) -> RequestKind {
        RequestKind::AdminDelete
    }

    fn validate(&self, input: &AdminTarget) -> Result<(), FailureReason> {
        if input.identifier().trim().is_empty() {
            return Err(FailureReason::MissingFields);
        }
        Ok(())
    }

    async fn execute<T: Transport>(&self, transport: &T, input: &AdminTarget) -> Result<(), TransportError> {
        match input {
            AdminTarget::Upload(code) => transport.delete_upload(code.trim()).await,
            AdminTarget::Workspace(name) => transport.delete_workspace(name.trim()).await,
        }
    }

    fn success_message(&self, input: &AdminTarget, _output: &()) -> String {
        match input {
            AdminTarget::Upload(code) => format!("Upload {} deleted", code.trim()),
            AdminTarget::Workspace(name) => format!("Box \"{}\" deleted", name.trim()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminListing {
    #[default]
    Uploads,
    Workspaces,
}

impl AdminListing {
    pub fn toggle(&self) -> Self {
        match self {
            AdminListing::Uploads => AdminListing::Workspaces,
            AdminListing::Workspaces => AdminListing::Uploads,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AdminListing::Uploads => "Uploads",
            AdminListing::Workspaces => "Boxes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCatalog {
    Uploads(Vec<UploadSummary>),
    Workspaces(Vec<WorkspaceSummary>),
}

impl AdminCatalog {
    pub fn len(&self) -> usize {
        match self {
            AdminCatalog::Uploads(rows) => rows.len(),
            AdminCatalog::Workspaces(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AdminListOperation;

impl Operation for AdminListOperation {
    type Input = AdminListing;
    type Output = AdminCatalog;

    fn kind(&self) -> RequestKind {
        RequestKind::AdminList
    }

    fn validate(&self, _input: &AdminListing) -> Result<(), FailureReason> {
        Ok(())
    }

    async fn execute<T: Transport>(&self, transport: &T, input: &AdminListing) -> Result<AdminCatalog, TransportError> {
        match input {
            AdminListing::Uploads => transport.list_uploads().await.map(AdminCatalog::Uploads),
            AdminListing::Workspaces => transport.list_workspaces().await.map(AdminCatalog::Workspaces),
        }
    }

    fn success_message(&self, _input: &AdminListing, output: &AdminCatalog) -> String {
        match output {
            AdminCatalog::Uploads(rows) => format!("Loaded {} uploads", rows.len()),
            AdminCatalog::Workspaces(rows) => format!("Loaded {} boxes", rows.len()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub file_name: String,
    pub url: String,
    pub directory: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub bytes: u64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DownloadOperation;

impl Operation for DownloadOperation {
    type Input = DownloadRequest;
    type Output = DownloadedFile;

    fn kind(&self) -> RequestKind {
        RequestKind::Download
    }

    fn validate(&self, input: &DownloadRequest) -> Result<(), FailureReason> {
        if input.url.trim().is_empty() || safe_file_name(&input.file_name).is_none() {
            return Err(FailureReason::MissingFields);
        }
        Ok(())
    }

    async fn execute<T: Transport>(&self, transport: &T, input: &DownloadRequest) -> Result<DownloadedFile, TransportError> {
        let name = safe_file_name(&input.file_name)
            .ok_or_else(|| TransportError::Local(format!("unusable file name {:?}", input.file_name)))?;
        tokio::fs::create_dir_all(&input.directory)
            .await
            .map_err(|e| TransportError::Local(format!("{}: {e}", input.directory.display())))?;

        let path = unused_path(&input.directory, &name).await;
        let bytes = transport.download(input.url.trim(), &path).await?;
        Ok(DownloadedFile { path, bytes })
    }

    fn success_message(&self, _input: &DownloadRequest, output: &DownloadedFile) -> String {
        let name = output
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = output.path.parent().map(|p| p.display().to_string()).unwrap_or_default();
        format!("Saved {name} to {dir}")
    }
}

/// Keeps only the final path component so a server-supplied name cannot
/// escape the download directory.
pub fn safe_file_name(raw: &str) -> Option<String> {
    let name = Path::new(raw.trim()).file_name()?.to_str()?.trim();
    if name.is_empty() || name == "." || name == ".." {
        None
    } else {
        Some(name.to_string())
    }
}

/// `report.pdf`, then `report (1).pdf`, `report (2).pdf`, ...
async fn unused_path(directory: &Path, name: &str) -> PathBuf {
    let candidate = directory.join(name);
    if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
        return candidate;
    }

    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    let extension = path.extension().and_then(|e| e.to_str());
    let mut n = 1u32;
    loop {
        let numbered = match extension {
            Some(ext) => format!("{stem} ({n}).{ext}"),
            None => format!("{stem} ({n})"),
        };
        let candidate = directory.join(numbered);
        if !tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
            return candidate;
        }
        n += 1;
    }
}
