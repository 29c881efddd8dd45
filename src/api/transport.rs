// ABOUTME: Transport trait describing every backend call the client makes
// Injected into the request controllers so tests can substitute a fake backend

use super::TransportError;
use crate::models::{
    AccessCode, BoxAuthMode, BoxCredentials, BoxFile, BoxListing, FilePackage, UploadFile, UploadRequest,
    UploadSummary, WorkspaceSummary,
};
use std::future::Future;
use std::path::Path;

/// Asynchronous access to the FylShare REST API.
///
/// Implementations report any non-2xx response as
/// [`TransportError::Status`], carrying the server's `message` field when the
/// body has one.
pub trait Transport: Send + Sync + 'static {
    /// `POST /api/uploads` as multipart `name`, `code`, `size`, `files`.
    fn upload_package(
        &self,
        request: &UploadRequest,
        code: &AccessCode,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// `GET /api/uploads/{code}`.
    fn fetch_package(&self, code: &str) -> impl Future<Output = Result<FilePackage, TransportError>> + Send;

    /// `POST /api/box/login` or `POST /api/box/create`.
    fn authenticate_box(
        &self,
        credentials: &BoxCredentials,
        mode: BoxAuthMode,
    ) -> impl Future<Output = Result<BoxListing, TransportError>> + Send;

    /// `GET /api/workspaces/{boxName}?pin={pin}`.
    fn list_box_files(
        &self,
        credentials: &BoxCredentials,
    ) -> impl Future<Output = Result<Vec<BoxFile>, TransportError>> + Send;

    /// `POST /api/workspaces/upload` as multipart `boxName`, `pin`, `files`.
    fn upload_box_files(
        &self,
        credentials: &BoxCredentials,
        files: &[UploadFile],
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// `DELETE /api/workspaces/{boxName}/files/{code}` with `{ pin }`.
    fn delete_box_file(
        &self,
        credentials: &BoxCredentials,
        code: &str,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// `GET /api/uploads`.
    fn list_uploads(&self) -> impl Future<Output = Result<Vec<UploadSummary>, TransportError>> + Send;

    /// `DELETE /api/uploads/{code}`.
    fn delete_upload(&self, code: &str) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// `GET /api/admin/workspaces`.
    fn list_workspaces(&self) -> impl Future<Output = Result<Vec<WorkspaceSummary>, TransportError>> + Send;

    /// `DELETE /api/admin/workspaces/{boxName}`.
    fn delete_workspace(&self, box_name: &str) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Streams the file at `url` into `destination`, returning the bytes written.
    fn download(&self, url: &str, destination: &Path) -> impl Future<Output = Result<u64, TransportError>> + Send;
}
