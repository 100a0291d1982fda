//! Data models for contacts, validation results and store envelopes.

pub mod contact;
pub mod page;
pub mod validation;

pub use contact::{Contact, ContactDraft};
pub use page::{ContactPage, SearchResults, UploadSummary, ValidationPage};
pub use validation::{ValidationResult, ValidationStats};
