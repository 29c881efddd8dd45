// ABOUTME: Core data models for anonymous uploads, boxes (workspaces) and admin listings

pub mod code;
pub mod upload;
pub mod workspace;

pub use code::AccessCode;
pub use upload::{
    format_size, total_size, FileBody, FilePackage, PackageFile, UploadFile, UploadReceipt, UploadRequest,
    UploadSummary, MAX_FILES_PER_UPLOAD, MAX_TOTAL_UPLOAD_BYTES,
};
pub use workspace::{
    BoxAuthMode, BoxAuthRequest, BoxCredentials, BoxFile, BoxFileDeleteRequest, BoxListing, BoxUploadRequest,
    WorkspaceSummary,
};

use chrono::{DateTime, Utc};

/// Renders a server timestamp as a calendar date, falling back to the raw text.
pub(crate) fn date_label(raw: Option<&str>) -> String {
    match raw {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|d| d.with_timezone(&Utc).format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| raw.to_string()),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_label_formats_rfc3339_and_keeps_unknown_text() {
        assert_eq!(date_label(Some("2024-05-01T10:20:30.000Z")), "2024-05-01");
        assert_eq!(date_label(Some("yesterday")), "yesterday");
        assert_eq!(date_label(None), "-");
    }
}
