// ABOUTME: HTTP access to the FylShare backend
// Transport trait for injection plus the reqwest implementation used by the app

pub mod error;
pub mod http;
pub mod transport;

pub use error::TransportError;
pub use http::HttpTransport;
pub use transport::Transport;
