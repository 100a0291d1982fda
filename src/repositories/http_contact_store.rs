use crate::client::AsyncContactsClient;
use crate::domain::{ContactId, Field};
use crate::error::{StoreError, StoreResult};
use crate::models::*;
use crate::repositories::traits::ContactStore;
use async_trait::async_trait;
use std::sync::Arc;

/// Contact store backed by the contacts HTTP service.
///
/// Delegates to the AsyncContactsClient, rejecting requests the service
/// would only answer with garbage and checking that write-backs keep the
/// record's identity.
pub struct HttpContactStore {
    client: Arc<dyn AsyncContactsClient>,
}

impl HttpContactStore {
    /// Create a new HttpContactStore with the given client.
    pub fn new(client: Arc<dyn AsyncContactsClient>) -> Self {
        Self { client }
    }

    fn check_page(page: usize, page_size: usize) -> StoreResult<()> {
        if page == 0 || page_size == 0 {
            return Err(StoreError::InvalidRequest(format!(
                "page and page size must be positive (page={}, size={})",
                page, page_size
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ContactStore for HttpContactStore {
    async fn list_contacts(&self, page: usize, page_size: usize) -> StoreResult<ContactPage> {
        Self::check_page(page, page_size)?;
        self.client.list_contacts(page, page_size).await
    }

    async fn search_contacts(&self, field: Field, value: &str) -> StoreResult<Vec<Contact>> {
        self.client.search_contacts(field, value.trim()).await
    }

    async fn update_contact(&self, id: &ContactId, contact: &Contact) -> StoreResult<Contact> {
        let updated = self.client.update_contact(id, contact).await?;

        if &updated.id != id {
            return Err(StoreError::Other(format!(
                "store returned contact {} for an update of {}",
                updated.id, id
            )));
        }
        Ok(updated)
    }

    async fn validate_contacts(
        &self,
        page: usize,
        page_size: usize,
    ) -> StoreResult<ValidationPage> {
        Self::check_page(page, page_size)?;
        self.client.validate_contacts(page, page_size).await
    }

    async fn upload_spreadsheet(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> StoreResult<UploadSummary> {
        self.client.upload_spreadsheet(file_name, bytes).await
    }

    async fn download_spreadsheet(&self) -> StoreResult<Vec<u8>> {
        self.client.download_spreadsheet().await
    }
}
