// ABOUTME: Request lifecycle: attempts, failure classification and the generic controller
// Each screen action is a RequestController parameterized by its Operation

pub mod attempt;
pub mod controller;
pub mod error;
pub mod operation;
pub mod operations;

pub use attempt::{Phase, RequestAttempt, RequestKind};
pub use controller::{Attempt, RequestController};
pub use error::FailureReason;
pub use operation::Operation;
pub use operations::{
    safe_file_name, AdminCatalog, AdminDeleteOperation, AdminListOperation, AdminListing, AdminTarget,
    BoxAuthOperation, BoxFileDeleteOperation, BoxUploadOperation, DownloadOperation, DownloadRequest, DownloadedFile,
    SearchOperation, UploadOperation,
};
