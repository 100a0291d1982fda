//! HTTP client for the contacts service.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client handles error mapping, the
//! multipart upload, and the binary spreadsheet download.

mod async_wrapper;
pub use async_wrapper::{AsyncContactsClient, AsyncContactsClientImpl};

use crate::config::Config;
use crate::domain::{ContactId, Field};
use crate::error::{StoreError, StoreResult};
use crate::metrics::{Counter, Metrics};
use crate::models::{Contact, ContactPage, SearchResults, UploadSummary, ValidationPage};
use serde::Deserialize;
use std::io::Read;
use std::sync::Arc;
use std::time::{Duration, Instant};

const MULTIPART_BOUNDARY_PREFIX: &str = "----contact-audit-7d4a1f0c9e3b52a8";

/// `{ "data": T }` wrapper used by single-record responses.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

/// `{ "error": "..." }` body returned with failing status codes.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the contacts service.
///
/// This client uses `ureq` for synchronous HTTP requests and can be called
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct ContactsClient {
    /// Base URL, e.g. `http://localhost:8080/api/v1`
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Metrics collector
    metrics: Metrics,
}

impl ContactsClient {
    /// Create a new ContactsClient from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_url.clone(),
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Create a ContactsClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Run a prepared request, timing it and mapping failures.
    fn execute(
        &self,
        method: &str,
        url: &str,
        send: impl FnOnce() -> Result<ureq::Response, ureq::Error>,
    ) -> StoreResult<ureq::Response> {
        tracing::debug!("{} {}", method, url);
        let started = Instant::now();
        self.metrics.add(Counter::Requests, 1);

        match send() {
            Ok(response) => {
                tracing::debug!(
                    "{} {} - status {} in {:?}",
                    method,
                    url,
                    response.status(),
                    started.elapsed()
                );
                Ok(response)
            }
            Err(e) => {
                self.metrics.add(Counter::Errors, 1);
                let error = Self::map_error(e);
                tracing::warn!("{} {} - {} after {:?}", method, url, error, started.elapsed());
                Err(error)
            }
        }
    }

    /// Execute a GET request.
    fn get(&self, path: &str) -> StoreResult<ureq::Response> {
        let url = self.build_url(path);
        self.execute("GET", &url, || {
            self.agent
                .get(&url)
                .set("Accept", "application/json")
                .call()
        })
    }

    /// Execute a PUT request with a JSON body.
    fn put(&self, path: &str, body: &serde_json::Value) -> StoreResult<ureq::Response> {
        let url = self.build_url(path);
        self.execute("PUT", &url, || {
            self.agent
                .put(&url)
                .set("Content-Type", "application/json")
                .send_json(body)
        })
    }

    /// Execute a POST request with a raw body.
    fn post_bytes(&self, path: &str, content_type: &str, body: &[u8]) -> StoreResult<ureq::Response> {
        let url = self.build_url(path);
        self.execute("POST", &url, || {
            self.agent
                .post(&url)
                .set("Content-Type", content_type)
                .send_bytes(body)
        })
    }

    /// Map a ureq error to a StoreError.
    fn map_error(error: ureq::Error) -> StoreError {
        match error {
            ureq::Error::Status(code, response) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());
                let message = serde_json::from_str::<ErrorBody>(&body)
                    .map(|b| b.error)
                    .unwrap_or(body);

                match code {
                    400 | 422 => StoreError::InvalidRequest(message),
                    404 => StoreError::NotFound(message),
                    _ => StoreError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    StoreError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    StoreError::Timeout
                } else {
                    StoreError::HttpError(transport.to_string())
                }
            }
        }
    }

    fn read_body(response: ureq::Response) -> StoreResult<String> {
        response
            .into_string()
            .map_err(|e| StoreError::HttpError(e.to_string()))
    }

    // ========================= Contact Operations =========================

    /// Get one page of contacts.
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    /// * `page_size` - Contacts per page
    pub fn list_contacts(&self, page: usize, page_size: usize) -> StoreResult<ContactPage> {
        let path = format!("/contacts?page={}&limit={}", page, page_size);
        let body = Self::read_body(self.get(&path)?)?;

        let page: ContactPage = serde_json::from_str(&body).map_err(StoreError::JsonError)?;
        self.metrics.add(Counter::ContactsFetched, page.data.len());
        Ok(page)
    }

    /// Search contacts whose `field` matches `value`. Returns the full match set.
    pub fn search_contacts(&self, field: Field, value: &str) -> StoreResult<Vec<Contact>> {
        let path = format!(
            "/contacts/search?field={}&value={}",
            field.as_str(),
            urlencoding::encode(value)
        );
        let body = Self::read_body(self.get(&path)?)?;

        let results: SearchResults = serde_json::from_str(&body).map_err(StoreError::JsonError)?;
        self.metrics.add(Counter::ContactsFetched, results.data.len());
        Ok(results.data)
    }

    /// Replace a contact's fields.
    ///
    /// The store may answer with `{data: contact}`, a bare contact, or a plain
    /// acknowledgement; in the last case the submitted contact is returned.
    pub fn update_contact(&self, id: &ContactId, contact: &Contact) -> StoreResult<Contact> {
        let body = serde_json::to_value(contact).map_err(StoreError::JsonError)?;
        let path = format!("/contacts/{}", urlencoding::encode(id.as_str()));
        let response_body = Self::read_body(self.put(&path, &body)?)?;

        self.metrics.add(Counter::ContactsUpdated, 1);

        if let Ok(envelope) = serde_json::from_str::<DataEnvelope<Contact>>(&response_body) {
            return Ok(envelope.data);
        }
        if let Ok(updated) = serde_json::from_str::<Contact>(&response_body) {
            return Ok(updated);
        }

        tracing::debug!("Update of {} acknowledged without a contact body", id);
        Ok(contact.clone())
    }

    // ======================= Validation Operations ========================

    /// Get one page of server-side validation results plus collection stats.
    pub fn validate_contacts(&self, page: usize, page_size: usize) -> StoreResult<ValidationPage> {
        let path = format!("/contacts/validate?page={}&limit={}", page, page_size);
        let body = Self::read_body(self.get(&path)?)?;

        let page: ValidationPage = serde_json::from_str(&body).map_err(StoreError::JsonError)?;
        self.metrics.add(Counter::ValidationsFetched, page.data.len());
        Ok(page)
    }

    // ======================= Spreadsheet Operations =======================

    /// Upload a spreadsheet as `multipart/form-data` (part name `file`).
    pub fn upload_spreadsheet(&self, file_name: &str, bytes: &[u8]) -> StoreResult<UploadSummary> {
        let boundary = multipart_boundary(bytes);
        let body = multipart_body(&boundary, file_name, bytes);
        let content_type = format!("multipart/form-data; boundary={}", boundary);

        let response = self.post_bytes("/contacts/upload", &content_type, &body)?;
        let response_body = Self::read_body(response)?;

        serde_json::from_str(&response_body).map_err(StoreError::JsonError)
    }

    /// Download the corrected spreadsheet.
    pub fn download_spreadsheet(&self) -> StoreResult<Vec<u8>> {
        let response = self.get("/contacts/download")?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| StoreError::HttpError(e.to_string()))?;

        if bytes.is_empty() {
            return Err(StoreError::EmptyPayload);
        }

        self.metrics.add(Counter::BytesDownloaded, bytes.len());
        Ok(bytes)
    }
}

/// MIME type for a spreadsheet file name.
fn spreadsheet_mime(file_name: &str) -> &'static str {
    if file_name.to_lowercase().ends_with(".xls") {
        "application/vnd.ms-excel"
    } else {
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    }
}

/// A boundary that does not occur anywhere in `bytes`.
fn multipart_boundary(bytes: &[u8]) -> String {
    let mut attempt = 0u32;
    loop {
        let candidate = format!("{}{:x}", MULTIPART_BOUNDARY_PREFIX, attempt);
        if !bytes
            .windows(candidate.len())
            .any(|window| window == candidate.as_bytes())
        {
            return candidate;
        }
        attempt += 1;
    }
}

fn multipart_body(boundary: &str, file_name: &str, bytes: &[u8]) -> Vec<u8> {
    let file_name = file_name.replace('"', "");
    let mut body = Vec::with_capacity(bytes.len() + 256);
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", spreadsheet_mime(&file_name)).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body
}
