use async_trait::async_trait;
use contact_audit::domain::{ContactId, Field};
use contact_audit::error::{StoreError, StoreResult};
use contact_audit::models::{
    Contact, ContactPage, UploadSummary, ValidationPage, ValidationStats,
};
use contact_audit::repositories::ContactStore;
use contact_audit::validation;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock contacts store for testing.
///
/// Holds an ordered in-memory collection, tracks method calls, and can be
/// told to delay individual pages or fail individual methods. Responses are
/// computed when a call starts, so a delayed page reflects the collection as
/// it was when requested.
#[allow(dead_code)]
#[derive(Clone)]
pub struct MockContactStore {
    contacts: Arc<Mutex<Vec<Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    page_delays: Arc<Mutex<HashMap<usize, Duration>>>,
    search_delay: Arc<Mutex<Option<Duration>>>,
    download_delay: Arc<Mutex<Option<Duration>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
    upload_replacement: Arc<Mutex<Option<Vec<Contact>>>>,
    uploads: Arc<Mutex<Vec<(String, usize)>>>,
    spreadsheet: Arc<Mutex<Vec<u8>>>,
    report_stats: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockContactStore {
    /// Create a new empty MockContactStore.
    pub fn new() -> Self {
        Self {
            contacts: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            page_delays: Arc::new(Mutex::new(HashMap::new())),
            search_delay: Arc::new(Mutex::new(None)),
            download_delay: Arc::new(Mutex::new(None)),
            failures: Arc::new(Mutex::new(HashMap::new())),
            upload_replacement: Arc::new(Mutex::new(None)),
            uploads: Arc::new(Mutex::new(Vec::new())),
            spreadsheet: Arc::new(Mutex::new(b"PK\x03\x04corrected".to_vec())),
            report_stats: Arc::new(Mutex::new(true)),
        }
    }

    /// Create a store holding `contacts` in order.
    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        let store = Self::new();
        *store.contacts.lock().unwrap() = contacts;
        store
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.contacts.lock().unwrap().clone()
    }

    /// Delay every list/validate response for `page`.
    pub fn set_page_delay(&self, page: usize, delay: Duration) {
        self.page_delays.lock().unwrap().insert(page, delay);
    }

    pub fn set_search_delay(&self, delay: Duration) {
        *self.search_delay.lock().unwrap() = Some(delay);
    }

    pub fn set_download_delay(&self, delay: Duration) {
        *self.download_delay.lock().unwrap() = Some(delay);
    }

    /// Make every call to `method` fail with a 500 and `message`.
    pub fn fail_on(&self, method: &str, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(method.to_string(), message.to_string());
    }

    pub fn clear_failures(&self) {
        self.failures.lock().unwrap().clear();
    }

    /// Collection that the next upload installs.
    pub fn set_upload_result(&self, contacts: Vec<Contact>) {
        *self.upload_replacement.lock().unwrap() = Some(contacts);
    }

    /// File names and sizes received by `upload_spreadsheet`.
    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().unwrap().clone()
    }

    /// Whether validation pages carry collection stats.
    pub fn set_report_stats(&self, report: bool) {
        *self.report_stats.lock().unwrap() = report;
    }

    pub fn set_spreadsheet(&self, bytes: Vec<u8>) {
        *self.spreadsheet.lock().unwrap() = bytes;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Reset all call counts.
    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match self.failures.lock().unwrap().get(method) {
            Some(message) => Err(StoreError::ApiError {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn page_slice(&self, page: usize, page_size: usize) -> (Vec<Contact>, usize, usize) {
        let contacts = self.contacts.lock().unwrap();
        let total = contacts.len();
        let total_pages = total.div_ceil(page_size);
        let data = contacts
            .iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect();
        (data, total, total_pages)
    }

    async fn delay_page(&self, page: usize) {
        let delay = self.page_delays.lock().unwrap().get(&page).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for MockContactStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContactStore for MockContactStore {
    async fn list_contacts(&self, page: usize, page_size: usize) -> StoreResult<ContactPage> {
        let outcome = self.track_call("list_contacts");
        let (data, total, total_pages) = self.page_slice(page, page_size);

        self.delay_page(page).await;
        outcome?;

        Ok(ContactPage {
            data,
            total,
            total_pages,
        })
    }

    async fn search_contacts(&self, field: Field, value: &str) -> StoreResult<Vec<Contact>> {
        let outcome = self.track_call("search_contacts");
        let needle = value.to_lowercase();
        let matches: Vec<Contact> = self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.field(field).to_lowercase().contains(&needle))
            .cloned()
            .collect();

        let delay = *self.search_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        outcome?;

        Ok(matches)
    }

    async fn update_contact(&self, id: &ContactId, contact: &Contact) -> StoreResult<Contact> {
        self.track_call("update_contact")?;

        let mut contacts = self.contacts.lock().unwrap();
        let row = contacts
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| StoreError::NotFound(format!("Contact {} not found", id)))?;
        *row = contact.clone();
        Ok(row.clone())
    }

    async fn validate_contacts(
        &self,
        page: usize,
        page_size: usize,
    ) -> StoreResult<ValidationPage> {
        let outcome = self.track_call("validate_contacts");
        let (data, _, total_pages) = self.page_slice(page, page_size);
        let all = validation::validate_all(&self.contacts());
        let stats: ValidationStats = validation::summarize(&all);
        let report_stats = *self.report_stats.lock().unwrap();

        self.delay_page(page).await;
        outcome?;

        Ok(ValidationPage {
            data: validation::validate_all(&data),
            total_pages,
            stats: report_stats.then_some(stats),
        })
    }

    async fn upload_spreadsheet(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> StoreResult<UploadSummary> {
        self.track_call("upload_spreadsheet")?;
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), bytes.len()));

        if let Some(replacement) = self.upload_replacement.lock().unwrap().take() {
            *self.contacts.lock().unwrap() = replacement;
        }

        Ok(UploadSummary {
            message: "File processed successfully".to_string(),
            count: self.contacts.lock().unwrap().len(),
        })
    }

    async fn download_spreadsheet(&self) -> StoreResult<Vec<u8>> {
        self.track_call("download_spreadsheet")?;

        let delay = *self.download_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let bytes = self.spreadsheet.lock().unwrap().clone();
        if bytes.is_empty() {
            return Err(StoreError::EmptyPayload);
        }
        Ok(bytes)
    }
}
