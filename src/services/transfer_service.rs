//! Spreadsheet transfer service.
//!
//! Upload of a local spreadsheet into the store and export of the corrected
//! collection back to disk.

use crate::error::{TransferError, TransferResult};
use crate::models::UploadSummary;
use crate::repositories::ContactStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// File extensions accepted for upload.
pub const SPREADSHEET_EXTENSIONS: [&str; 2] = ["xlsx", "xls"];

/// Where an export landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub bytes: usize,
    pub saved_at: DateTime<Utc>,
}

/// Transfer service trait for spreadsheet import/export.
#[async_trait]
pub trait TransferService: Send + Sync {
    /// Upload a local `.xlsx`/`.xls` file. Other files are rejected without a request.
    async fn upload(&self, path: &Path) -> TransferResult<UploadSummary>;

    /// Download the corrected spreadsheet. Only one download runs at a time.
    async fn download(&self) -> TransferResult<Vec<u8>>;

    /// Download and save the spreadsheet into `dir` under the export file name.
    async fn export_to(&self, dir: &Path) -> TransferResult<ExportReceipt>;
}

/// Default implementation of TransferService.
pub struct TransferServiceImpl {
    store: Arc<dyn ContactStore>,
    export_file_name: String,
    downloading: AtomicBool,
}

/// Clears the in-progress flag when the download ends, however it ends.
struct DownloadGuard<'a>(&'a AtomicBool);

impl Drop for DownloadGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl TransferServiceImpl {
    pub fn new(store: Arc<dyn ContactStore>, export_file_name: impl Into<String>) -> Self {
        Self {
            store,
            export_file_name: export_file_name.into(),
            downloading: AtomicBool::new(false),
        }
    }

    pub fn is_downloading(&self) -> bool {
        self.downloading.load(Ordering::Acquire)
    }

    /// File name of `path` if it names a spreadsheet.
    fn spreadsheet_name(path: &Path) -> TransferResult<String> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TransferError::UnsupportedFile(path.display().to_string()))?;

        let accepted = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| SPREADSHEET_EXTENSIONS.contains(&e.to_lowercase().as_str()))
            .unwrap_or(false);

        if !accepted {
            return Err(TransferError::UnsupportedFile(name.to_string()));
        }
        Ok(name.to_string())
    }
}

#[async_trait]
impl TransferService for TransferServiceImpl {
    async fn upload(&self, path: &Path) -> TransferResult<UploadSummary> {
        let file_name = Self::spreadsheet_name(path)?;

        let owned = path.to_path_buf();
        let bytes = tokio::task::spawn_blocking(move || std::fs::read(owned))
            .await
            .map_err(|e| TransferError::Io(std::io::Error::other(e)))??;

        tracing::info!("Uploading {} ({} bytes)", file_name, bytes.len());
        let summary = self.store.upload_spreadsheet(&file_name, bytes).await?;
        tracing::info!("Upload of {} accepted: {}", file_name, summary.message);
        Ok(summary)
    }

    async fn download(&self) -> TransferResult<Vec<u8>> {
        if self
            .downloading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(TransferError::DownloadInProgress);
        }
        let _guard = DownloadGuard(&self.downloading);

        let bytes = self.store.download_spreadsheet().await?;
        tracing::info!("Downloaded corrected spreadsheet ({} bytes)", bytes.len());
        Ok(bytes)
    }

    async fn export_to(&self, dir: &Path) -> TransferResult<ExportReceipt> {
        let bytes = self.download().await?;
        let path = dir.join(&self.export_file_name);
        let size = bytes.len();

        let target = path.clone();
        tokio::task::spawn_blocking(move || std::fs::write(target, bytes))
            .await
            .map_err(|e| TransferError::Io(std::io::Error::other(e)))??;

        tracing::info!("Saved {} ({} bytes)", path.display(), size);
        Ok(ExportReceipt {
            path,
            bytes: size,
            saved_at: Utc::now(),
        })
    }
}
