//! Response envelopes returned by the contacts store.

use super::contact::{null_as_default, Contact};
use super::validation::{ValidationResult, ValidationStats};
use serde::{Deserialize, Serialize};

/// One page of the contact listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Contact>,

    /// Total number of contacts across all pages
    #[serde(default)]
    pub total: usize,

    #[serde(default)]
    pub total_pages: usize,
}

/// Full, unpaginated match set of a field search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<Contact>,
}

/// One page of server-side validation results.
///
/// `stats` describes the whole collection, not this page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationPage {
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: Vec<ValidationResult>,

    #[serde(default)]
    pub total_pages: usize,

    #[serde(default)]
    pub stats: Option<ValidationStats>,
}

/// Acknowledgement of a spreadsheet upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSummary {
    #[serde(default)]
    pub message: String,

    /// Number of contacts read from the file
    #[serde(default)]
    pub count: usize,
}
