//! Async wrapper around synchronous ContactsClient.
//!
//! This module provides an async interface to the synchronous ContactsClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime.

use crate::client::ContactsClient;
use crate::domain::{ContactId, Field};
use crate::error::{StoreError, StoreResult};
use crate::models::*;
use async_trait::async_trait;
use std::sync::Arc;

/// Async wrapper trait for contacts service operations.
#[async_trait]
pub trait AsyncContactsClient: Send + Sync {
    async fn list_contacts(&self, page: usize, page_size: usize) -> StoreResult<ContactPage>;
    async fn search_contacts(&self, field: Field, value: &str) -> StoreResult<Vec<Contact>>;
    async fn update_contact(&self, id: &ContactId, contact: &Contact) -> StoreResult<Contact>;
    async fn validate_contacts(&self, page: usize, page_size: usize)
        -> StoreResult<ValidationPage>;
    async fn upload_spreadsheet(&self, file_name: &str, bytes: Vec<u8>)
        -> StoreResult<UploadSummary>;
    async fn download_spreadsheet(&self) -> StoreResult<Vec<u8>>;
}

/// Async wrapper around synchronous ContactsClient.
///
/// Uses `tokio::task::spawn_blocking` to run synchronous HTTP
/// operations on a dedicated thread pool.
#[derive(Clone)]
pub struct AsyncContactsClientImpl {
    client: Arc<ContactsClient>,
}

impl AsyncContactsClientImpl {
    pub fn new(client: ContactsClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// The wrapped client's metrics.
    pub fn metrics(&self) -> &crate::metrics::Metrics {
        self.client.metrics()
    }
}

fn join_error(e: tokio::task::JoinError) -> StoreError {
    StoreError::HttpError(format!("Task join error: {}", e))
}

#[async_trait]
impl AsyncContactsClient for AsyncContactsClientImpl {
    async fn list_contacts(&self, page: usize, page_size: usize) -> StoreResult<ContactPage> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.list_contacts(page, page_size))
            .await
            .map_err(join_error)?
    }

    async fn search_contacts(&self, field: Field, value: &str) -> StoreResult<Vec<Contact>> {
        let client = self.client.clone();
        let value = value.to_string();

        tokio::task::spawn_blocking(move || client.search_contacts(field, &value))
            .await
            .map_err(join_error)?
    }

    async fn update_contact(&self, id: &ContactId, contact: &Contact) -> StoreResult<Contact> {
        let client = self.client.clone();
        let id = id.clone();
        let contact = contact.clone();

        tokio::task::spawn_blocking(move || client.update_contact(&id, &contact))
            .await
            .map_err(join_error)?
    }

    async fn validate_contacts(
        &self,
        page: usize,
        page_size: usize,
    ) -> StoreResult<ValidationPage> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.validate_contacts(page, page_size))
            .await
            .map_err(join_error)?
    }

    async fn upload_spreadsheet(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> StoreResult<UploadSummary> {
        let client = self.client.clone();
        let file_name = file_name.to_string();

        tokio::task::spawn_blocking(move || client.upload_spreadsheet(&file_name, &bytes))
            .await
            .map_err(join_error)?
    }

    async fn download_spreadsheet(&self) -> StoreResult<Vec<u8>> {
        let client = self.client.clone();

        tokio::task::spawn_blocking(move || client.download_spreadsheet())
            .await
            .map_err(join_error)?
    }
}
