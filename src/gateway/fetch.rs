use crate::gateway::error::{GatewayError, GatewayResult};
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

const DEFAULT_FILENAME: &str = "image";
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A remote payload pulled into memory, named after the URL it came from.
/// This is the single representation handed to the provider's multipart
/// endpoints.
#[derive(Debug, Clone)]
pub struct RemoteFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

impl RemoteFile {
    pub fn into_part(self) -> GatewayResult<reqwest::multipart::Part> {
        let part = reqwest::multipart::Part::bytes(self.bytes.to_vec())
            .file_name(self.filename)
            .mime_str(&self.content_type)
            .map_err(|e| GatewayError::internal(format!("Invalid content type: {}", e)))?;
        Ok(part)
    }
}

/// Fetches caller-supplied URLs. One GET per call, no retries, no caching;
/// any failure propagates to the dispatcher.
#[derive(Debug, Clone)]
pub struct ResourceFetcher {
    client: Client,
}

impl ResourceFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> GatewayResult<RemoteFile> {
        debug!("Fetching remote resource: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::fetch(
                url,
                format!("unexpected status {}", status),
            ));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::fetch(url, e))?;

        debug!(
            "Fetched {} bytes ({}) from {}",
            bytes.len(),
            content_type,
            url
        );

        Ok(RemoteFile {
            filename: filename_from_url(url),
            content_type,
            bytes,
        })
    }
}

/// Derive a filename from the URL's last path segment.
pub fn filename_from_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let path = without_query
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(without_query);
    match path.trim_end_matches('/').rsplit_once('/') {
        Some((_, segment)) if !segment.is_empty() => segment.to_string(),
        _ => DEFAULT_FILENAME.to_string(),
    }
}
