use crate::domain::{ContactId, Field};
use crate::error::StoreResult;
use crate::models::*;
use async_trait::async_trait;

/// The contacts store the view layer talks to.
///
/// Provides abstraction over listing, search, write-back and the spreadsheet
/// codec, enabling different implementations (HTTP service, in-memory mock).
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Retrieve one page of contacts (1-based page number).
    async fn list_contacts(&self, page: usize, page_size: usize) -> StoreResult<ContactPage>;

    /// Search contacts by field. Returns the full, unpaginated match set.
    async fn search_contacts(&self, field: Field, value: &str) -> StoreResult<Vec<Contact>>;

    /// Replace an existing contact. Fails if `id` is unknown.
    async fn update_contact(&self, id: &ContactId, contact: &Contact) -> StoreResult<Contact>;

    /// Retrieve one page of validation results with collection-wide stats.
    async fn validate_contacts(&self, page: usize, page_size: usize)
        -> StoreResult<ValidationPage>;

    /// Import a spreadsheet into the collection.
    async fn upload_spreadsheet(&self, file_name: &str, bytes: Vec<u8>)
        -> StoreResult<UploadSummary>;

    /// Export the current, corrected collection as a spreadsheet.
    async fn download_spreadsheet(&self) -> StoreResult<Vec<u8>>;
}
