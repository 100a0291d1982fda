//! Error types for the contact audit engine.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field-level rule violations are *not* errors: they are data (`FieldError`) carried
//! inside a `ValidationResult`.

use thiserror::Error;

/// Errors that can occur when talking to the contacts store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Store returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Store rejected the request payload
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Download returned no bytes
    #[error("Downloaded file is empty")]
    EmptyPayload,

    /// Generic store error with context
    #[error("Store error: {0}")]
    Other(String),
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Other(String),
}

/// Errors surfaced by the paginated view and the edit reconciler.
#[derive(Error, Debug)]
pub enum ViewError {
    /// A fetch or write against the store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// User-entered form data was rejected before any write was attempted.
    #[error("Invalid input for {field}: {reason}")]
    Input { field: String, reason: String },

    /// The view was torn down.
    #[error("View is closed")]
    Closed,
}

/// Errors raised by spreadsheet upload and download.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The selected file is not a spreadsheet.
    #[error("Unsupported file type: {0} (expected .xlsx or .xls)")]
    UnsupportedFile(String),

    /// Reading or writing the local file failed.
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// A download is already outstanding.
    #[error("A download is already in progress")]
    DownloadInProgress,
}

/// Convenience type alias for Results with StoreError
pub type StoreResult<T> = Result<T, StoreError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Convenience type alias for Results with ViewError
pub type ViewResult<T> = Result<T, ViewError>;

/// Convenience type alias for Results with TransferError
pub type TransferResult<T> = Result<T, TransferError>;
