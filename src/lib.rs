//! Contact Audit - validation and pagination engine for spreadsheet-imported client contacts.
//!
//! This library reviews the contacts held by a remote contacts store: it pages
//! through them, searches and filters them, flags every field that breaks a
//! business rule, writes corrections back, and moves spreadsheets in and out
//! of the store. An MCP server exposes all of it over stdio.
//!
//! # Architecture
//!
//! - **domain**: Field rules (client key, name, email, phone) and error vocabulary
//! - **models**: Contacts, validation results and store response envelopes
//! - **validation**: Per-record validation and scoped summary counts
//! - **client**: HTTP client for the contacts service
//! - **repositories**: The `ContactStore` seam and its HTTP implementation
//! - **view**: Paginated view controller and edit reconciliation
//! - **services**: Spreadsheet upload and export
//! - **server**: MCP protocol server
//! - **metrics**: HTTP and payload counters
//! - **config** / **error**: Environment configuration and error types

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;
pub mod validation;
pub mod view;

pub use client::ContactsClient;
pub use config::{Config, ReconcileStrategy};
pub use error::{ConfigError, StoreError, TransferError, ViewError};
pub use metrics::{Counter, Metrics};
pub use models::{Contact, ContactDraft, ValidationResult, ValidationStats};
pub use server::ContactAuditServer;
pub use validation::{summarize, validate, Summary};
pub use view::{
    EditForm, EditReconciler, PageState, StatusFilter, Transition, ViewController, ViewEvent,
    ViewMode,
};
