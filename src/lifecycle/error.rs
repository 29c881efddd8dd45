// ABOUTME: Failure taxonomy for request attempts and its user-facing wording
// Local validation failures and classified transport errors share one enum

use super::RequestKind;
use crate::api::TransportError;
use crate::notification::Severity;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureReason {
    #[error("access code must be exactly six digits")]
    InvalidCode,

    #[error("required fields are missing")]
    MissingFields,

    #[error("total upload size exceeds the limit")]
    SizeLimitExceeded,

    #[error("not found")]
    NotFound,

    #[error("authentication failed")]
    AuthFailed(Option<String>),

    #[error("transport error: {0}")]
    TransportError(String),

    #[error("server error")]
    ServerError(Option<u16>),
}

impl FailureReason {
    /// Maps a transport failure for the given kind. 404 is always NotFound;
    /// box authentication turns any other rejection into AuthFailed.
    pub fn classify(kind: RequestKind, err: &TransportError) -> Self {
        match err {
            TransportError::Status { status: 404, .. } => FailureReason::NotFound,
            TransportError::Status { message, .. } if kind == RequestKind::BoxAuth => {
                FailureReason::AuthFailed(message.clone())
            }
            TransportError::Status { status, .. } => FailureReason::ServerError(Some(*status)),
            TransportError::Decode(_) => FailureReason::ServerError(None),
            TransportError::Network(detail) | TransportError::Local(detail) | TransportError::InvalidUrl(detail) => {
                FailureReason::TransportError(detail.clone())
            }
        }
    }

    /// "Not found" is an expected outcome, not a hard failure.
    pub fn severity(&self) -> Severity {
        match self {
            FailureReason::NotFound => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn user_message(&self, kind: RequestKind) -> String {
        use RequestKind as K;

        let text = match (self, kind) {
            (FailureReason::InvalidCode, _) => "Enter a valid 6-digit code",

            (FailureReason::MissingFields, K::Upload) => "Please enter your name and upload at least one file",
            (FailureReason::MissingFields, K::BoxAuth) => "Please enter Box Name and PIN",
            (FailureReason::MissingFields, K::BoxUpload) => "Select at least one file to upload",
            (FailureReason::MissingFields, _) => "Required fields are missing",

            (FailureReason::SizeLimitExceeded, _) => "Total size exceeds 1GB",

            (FailureReason::NotFound, K::Search) => "No file found for this code.",
            (FailureReason::NotFound, _) => "Not found",

            (FailureReason::AuthFailed(Some(message)), _) if !message.trim().is_empty() => return message.clone(),
            (FailureReason::AuthFailed(_), _) => "Authentication failed",

            (FailureReason::TransportError(_), K::Search) => "Error searching for file",
            (FailureReason::TransportError(_), K::Upload) => "Upload error",
            (FailureReason::TransportError(_), K::BoxUpload) => "Upload failed",
            (FailureReason::TransportError(_), K::BoxFileDelete | K::AdminDelete) => "Error deleting file",
            (FailureReason::TransportError(_), K::Download) => "Download failed",
            (FailureReason::TransportError(_), _) => "Network error",

            (FailureReason::ServerError(_), K::Search) => "Error searching for file",
            (FailureReason::ServerError(_), K::Upload) => "Upload failed",
            (FailureReason::ServerError(_), K::BoxUpload) => "Failed to save file metadata",
            (FailureReason::ServerError(_), K::BoxFileDelete | K::AdminDelete) => "Failed to delete",
            (FailureReason::ServerError(_), K::Download) => "Download failed",
            (FailureReason::ServerError(_), _) => "Request failed",
        };
        text.to_string()
    }
}
