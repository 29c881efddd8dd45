// ABOUTME: reqwest-backed Transport talking to the FylShare REST API
// Builds endpoint URLs from the configured base URL and maps failures to TransportError

use super::{Transport, TransportError};
use crate::config::ApiConfig;
use crate::models::{
    AccessCode, BoxAuthMode, BoxCredentials, BoxFile, BoxListing, FileBody, FilePackage, UploadFile,
    UploadRequest, UploadSummary, WorkspaceSummary,
};
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("fylshare/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct PinBody<'a> {
    pin: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(config: &ApiConfig) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends path segments to the base URL, percent-encoding each one so
    /// box names with spaces or slashes stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, TransportError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Resolves file links that the server may return relative to the API host.
    fn resolve(&self, url: &str) -> Result<Url, TransportError> {
        match Url::parse(url) {
            Ok(url) => Ok(url),
            Err(_) => self
                .base_url
                .join(url)
                .map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url, e))),
        }
    }

    async fn check(response: Response) -> Result<Response, TransportError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();
        let message = response.json::<ErrorBody>().await.ok().and_then(|b| b.message);
        warn!("Request to {} failed with HTTP {}", url.path(), status.as_u16());
        Err(TransportError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn file_part(file: &UploadFile) -> Result<Part, TransportError> {
        let part = match &file.body {
            FileBody::Path(path) => {
                let handle = tokio::fs::File::open(path)
                    .await
                    .map_err(|e| TransportError::Local(format!("{}: {}", path.display(), e)))?;
                Part::stream_with_length(reqwest::Body::from(handle), file.size)
            }
            FileBody::Memory(bytes) => Part::bytes(bytes.to_vec()),
        };
        Ok(part.file_name(file.name.clone()))
    }

    async fn attach_files(mut form: Form, files: &[UploadFile]) -> Result<Form, TransportError> {
        for file in files {
            form = form.part("files", Self::file_part(file).await?);
        }
        Ok(form)
    }

    async fn write_body(response: Response, partial: &Path, destination: &Path) -> Result<u64, TransportError> {
        let local = |e: std::io::Error| TransportError::Local(format!("{}: {}", destination.display(), e));

        let mut file = tokio::fs::File::create(partial).await.map_err(local)?;
        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(local)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(local)?;
        drop(file);

        tokio::fs::rename(partial, destination).await.map_err(local)?;
        Ok(written)
    }

    async fn send_delete(&self, url: Url) -> Result<(), TransportError> {
        debug!("DELETE {}", url);
        let response = self.client.delete(url).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}

impl Transport for HttpTransport {
    async fn upload_package(&self, request: &UploadRequest, code: &AccessCode) -> Result<(), TransportError> {
        let url = self.endpoint(&["api", "uploads"])?;
        let form = Form::new()
            .text("name", request.name.clone())
            .text("code", code.to_string())
            .text("size", request.total_size().to_string());
        let form = Self::attach_files(form, &request.files).await?;

        debug!("POST {} with {} files", url, request.files.len());
        let response = self.client.post(url).multipart(form).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn fetch_package(&self, code: &str) -> Result<FilePackage, TransportError> {
        let url = self.endpoint(&["api", "uploads", code])?;
        debug!("GET {}", url);
        let response = Self::check(self.client.get(url).send().await?).await?;
        Ok(response.json::<FilePackage>().await?)
    }

    async fn authenticate_box(
        &self,
        credentials: &BoxCredentials,
        mode: BoxAuthMode,
    ) -> Result<BoxListing, TransportError> {
        let url = self.endpoint(&["api", "box", mode.endpoint()])?;
        debug!("POST {} for box {}", url, credentials.box_name);
        let response = Self::check(self.client.post(url).json(credentials).send().await?).await?;

        // Some deployments answer with an empty body on success.
        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(BoxListing::default());
        }
        serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }

    async fn list_box_files(&self, credentials: &BoxCredentials) -> Result<Vec<BoxFile>, TransportError> {
        let url = self.endpoint(&["api", "workspaces", &credentials.box_name])?;
        debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .query(&[("pin", credentials.pin.as_str())])
            .send()
            .await?;
        let listing = Self::check(response).await?.json::<BoxListing>().await?;
        Ok(listing.files.unwrap_or_default())
    }

    async fn upload_box_files(&self, credentials: &BoxCredentials, files: &[UploadFile]) -> Result<(), TransportError> {
        let url = self.endpoint(&["api", "workspaces", "upload"])?;
        let form = Form::new()
            .text("boxName", credentials.box_name.clone())
            .text("pin", credentials.pin.clone());
        let form = Self::attach_files(form, files).await?;

        debug!("POST {} with {} files", url, files.len());
        let response = self.client.post(url).multipart(form).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_box_file(&self, credentials: &BoxCredentials, code: &str) -> Result<(), TransportError> {
        let url = self.endpoint(&["api", "workspaces", &credentials.box_name, "files", code])?;
        debug!("DELETE {}", url);
        let response = self
            .client
            .delete(url)
            .json(&PinBody { pin: &credentials.pin })
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list_uploads(&self) -> Result<Vec<UploadSummary>, TransportError> {
        let url = self.endpoint(&["api", "uploads"])?;
        debug!("GET {}", url);
        let response = Self::check(self.client.get(url).send().await?).await?;
        Ok(response.json::<Vec<UploadSummary>>().await?)
    }

    async fn delete_upload(&self, code: &str) -> Result<(), TransportError> {
        let url = self.endpoint(&["api", "uploads", code])?;
        self.send_delete(url).await
    }

    async fn list_workspaces(&self) -> Result<Vec<WorkspaceSummary>, TransportError> {
        let url = self.endpoint(&["api", "admin", "workspaces"])?;
        debug!("GET {}", url);
        let response = Self::check(self.client.get(url).send().await?).await?;
        Ok(response.json::<Vec<WorkspaceSummary>>().await?)
    }

    async fn delete_workspace(&self, box_name: &str) -> Result<(), TransportError> {
        let url = self.endpoint(&["api", "admin", "workspaces", box_name])?;
        self.send_delete(url).await
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<u64, TransportError> {
        let url = self.resolve(url)?;
        debug!("Downloading {} to {}", url, destination.display());
        let response = Self::check(self.client.get(url).send().await?).await?;

        // The body lands in a sibling `.part` file that only takes the real name once complete.
        let partial = partial_path(destination);
        let result = Self::write_body(response, &partial, destination).await;
        if result.is_err() {
            if let Err(e) = tokio::fs::remove_file(&partial).await {
                warn!("Could not remove {}: {}", partial.display(), e);
            }
        }
        result
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn transport(base: &str) -> HttpTransport {
        HttpTransport::new(&ApiConfig {
            base_url: base.to_string(),
            timeout_secs: 5,
        })
        .expect("valid base url")
    }

    #[test]
    fn endpoint_appends_segments_to_base() {
        let t = transport("http://localhost:5001");
        let url = t.endpoint(&["api", "uploads", "123456"]).expect("url");
        assert_eq!(url.as_str(), "http://localhost:5001/api/uploads/123456");
    }

    #[test]
    fn endpoint_keeps_base_path_and_trailing_slash() {
        let t = transport("https://files.example.com/backend/");
        let url = t.endpoint(&["api", "box", "login"]).expect("url");
        assert_eq!(url.as_str(), "https://files.example.com/backend/api/box/login");
    }

    #[test]
    fn endpoint_encodes_box_names() {
        let t = transport("http://localhost:5001");
        let url = t.endpoint(&["api", "workspaces", "My Box/1"]).expect("url");
        assert_eq!(url.as_str(), "http://localhost:5001/api/workspaces/My%20Box%2F1");
    }

    #[test]
    fn resolve_joins_relative_links() {
        let t = transport("http://localhost:5001");
        let url = t.resolve("/uploads/report.pdf").expect("url");
        assert_eq!(url.as_str(), "http://localhost:5001/uploads/report.pdf");
        let absolute = t.resolve("https://cdn.example.com/a.bin").expect("url");
        assert_eq!(absolute.as_str(), "https://cdn.example.com/a.bin");
    }

    /// Serves one canned HTTP response on a local port and returns its base URL.
    async fn serve_once(response: &'static [u8]) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.expect("accept");
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.expect("read");
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(response).await.expect("write");
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn download_writes_the_body_under_the_final_name() {
        let base = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello").await;
        let dir = tempfile::tempdir().expect("temp dir");
        let dest = dir.path().join("report.pdf");

        let written = transport(&base).download("/report.pdf", &dest).await.expect("download");

        assert_eq!(written, 5);
        assert_eq!(std::fs::read(&dest).expect("read"), b"hello");
        assert!(!partial_path(&dest).exists());
    }

    #[tokio::test]
    async fn truncated_download_leaves_no_file_behind() {
        let base = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\nConnection: close\r\n\r\nhello").await;
        let dir = tempfile::tempdir().expect("temp dir");
        let dest = dir.path().join("report.pdf");

        let result = transport(&base).download("/report.pdf", &dest).await;

        assert!(result.is_err());
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
        assert_eq!(std::fs::read_dir(dir.path()).expect("list").count(), 0);
    }

    #[test]
    fn partial_path_appends_a_suffix() {
        assert_eq!(
            partial_path(Path::new("/tmp/report.pdf")),
            PathBuf::from("/tmp/report.pdf.part")
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = HttpTransport::new(&ApiConfig {
            base_url: "not a url".to_string(),
            timeout_secs: 5,
        });
        assert!(matches!(result, Err(TransportError::InvalidUrl(_))));
    }
}
