//! MetaDefender Cloud backend.
//!
//! This module implements [`ScanService`] over the MetaDefender Cloud v4
//! REST API:
//!
//! 1. `GET  /hash/{sha1}` looks up previous results
//! 2. `POST /file` uploads a file and returns a `data_id`
//! 3. `GET  /file/{data_id}` retrieves an uploaded scan's progress
//!
//! Every request carries the API key in the `apikey` header.

use crate::config::ClientConfig;
use crate::core::{
    ContentHash, LookupOutcome, Result, ScanError, ScanRecord, ScanService, ScanTarget, TrackingId,
};

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode};
use serde_json::Value;

/// Error code the hash endpoint uses for "never scanned".
pub const HASH_NOT_FOUND_CODE: i64 = 404003;

/// MetaDefender Cloud client.
///
/// # Example
///
/// ```rust,ignore
/// use metascan::backends::MetaDefenderClient;
/// use metascan::config::{ClientConfig, KeyFile};
///
/// let key = KeyFile::load("keys.json".as_ref())?;
/// let client = MetaDefenderClient::new(ClientConfig::new(key))?;
/// ```
#[derive(Debug)]
pub struct MetaDefenderClient {
    config: ClientConfig,
    client: reqwest::Client,
}

impl MetaDefenderClient {
    /// Creates a client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ScanError::configuration(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.header("apikey", self.config.api_key.expose())
    }

    /// Sends a request and returns the status with the raw body.
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<(StatusCode, Vec<u8>)> {
        let response = self
            .authorized(request)
            .send()
            .await
            .map_err(|e| ScanError::connection_failed(endpoint, e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| ScanError::connection_failed(endpoint, e.to_string()))?;

        tracing::debug!(
            endpoint = %endpoint,
            status = status.as_u16(),
            body_len = bytes.len(),
            "MetaDefender response"
        );

        Ok((status, bytes.to_vec()))
    }
}

/// Parses a response body as JSON.
///
/// A non-JSON body on a failure status is reported as that status rather
/// than as a parse error.
fn parse_body(endpoint: &str, status: StatusCode, bytes: &[u8]) -> Result<Value> {
    match serde_json::from_slice::<Value>(bytes) {
        Ok(body) => Ok(body),
        Err(_) if !status.is_success() => Err(ScanError::http_status(
            endpoint,
            status.as_u16(),
            status.canonical_reason().unwrap_or("unknown status"),
        )),
        Err(e) => Err(ScanError::malformed(endpoint, format!("invalid JSON: {}", e))),
    }
}

/// Returns `error.code` from a response body.
fn error_code(body: &Value) -> Option<i64> {
    body.get("error")
        .and_then(|e| e.get("code"))
        .and_then(Value::as_i64)
}

/// Returns the service's error messages joined, if any.
fn error_message(body: &Value) -> Option<String> {
    let messages = body.get("error")?.get("messages")?.as_array()?;
    let joined = messages
        .iter()
        .filter_map(Value::as_str)
        .collect::<Vec<_>>()
        .join("; ");
    (!joined.is_empty()).then_some(joined)
}

/// Fails on a non-success status or an `error` object in the body.
fn ensure_success(endpoint: &str, status: StatusCode, body: &Value) -> Result<()> {
    if status.is_success() && body.get("error").is_none() {
        return Ok(());
    }

    let message = error_message(body)
        .or_else(|| error_code(body).map(|code| format!("error code {}", code)))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown status").to_string());

    Err(ScanError::http_status(endpoint, status.as_u16(), message))
}

/// Interprets a hash lookup response.
///
/// Error code 404003 means "never scanned" whatever the status; any other
/// error code or failure status is an error.
fn classify_lookup(endpoint: &str, status: StatusCode, bytes: &[u8]) -> Result<LookupOutcome> {
    let body = parse_body(endpoint, status, bytes)?;
    if error_code(&body) == Some(HASH_NOT_FOUND_CODE) {
        return Ok(LookupOutcome::NotFound);
    }
    ensure_success(endpoint, status, &body)?;

    Ok(LookupOutcome::Found(ScanRecord::from_json(body)))
}

/// Extracts `data_id` from an upload response.
fn classify_upload(endpoint: &str, status: StatusCode, bytes: &[u8]) -> Result<TrackingId> {
    let body = parse_body(endpoint, status, bytes)?;
    ensure_success(endpoint, status, &body)?;

    body.get("data_id")
        .and_then(Value::as_str)
        .map(TrackingId::new)
        .ok_or_else(|| ScanError::malformed(endpoint, "missing 'data_id'"))
}

/// Interprets a by-identifier retrieval response.
fn classify_record(endpoint: &str, status: StatusCode, bytes: &[u8]) -> Result<ScanRecord> {
    let body = parse_body(endpoint, status, bytes)?;
    ensure_success(endpoint, status, &body)?;

    Ok(ScanRecord::from_json(body))
}

#[async_trait]
impl ScanService for MetaDefenderClient {
    fn name(&self) -> &str {
        "metadefender"
    }

    async fn lookup_hash(&self, hash: &ContentHash) -> Result<LookupOutcome> {
        let endpoint = format!("/hash/{}", hash.as_str());
        let request = self.client.get(self.url(&endpoint));
        let (status, bytes) = self.send(&endpoint, request).await?;

        classify_lookup(&endpoint, status, &bytes)
    }

    async fn upload(&self, target: &ScanTarget) -> Result<TrackingId> {
        let endpoint = "/file";
        let filename = target.filename().unwrap_or("upload").to_string();
        let data = tokio::fs::read(target.path()).await.map_err(ScanError::Io)?;

        tracing::debug!(filename = %filename, size = data.len(), "uploading file");

        let form = Form::new().part("file", Part::bytes(data).file_name(filename.clone()));
        let request = self
            .client
            .post(self.url(endpoint))
            .header("filename", filename)
            .multipart(form);
        let (status, bytes) = self.send(endpoint, request).await?;

        classify_upload(endpoint, status, &bytes)
    }

    async fn fetch_by_id(&self, id: &TrackingId) -> Result<ScanRecord> {
        let endpoint = format!("/file/{}", id.as_str());
        let request = self.client.get(self.url(&endpoint));
        let (status, bytes) = self.send(&endpoint, request).await?;

        classify_record(&endpoint, status, &bytes)
    }
}
