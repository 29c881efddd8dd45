// ABOUTME: Error types raised at the HTTP transport boundary
// Classified into user-facing failure reasons by the lifecycle controller

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("Server responded with HTTP {status}")]
    Status { status: u16, message: Option<String> },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Local failure: {0}")]
    Local(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TransportError {
    pub fn status(status: u16) -> Self {
        TransportError::Status { status, message: None }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            TransportError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            TransportError::status(status.as_u16())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}
