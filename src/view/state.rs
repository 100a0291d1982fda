//! Serializable view state owned by a [`ViewController`](super::ViewController).

use crate::domain::{ContactId, Field};
use crate::models::{Contact, ValidationResult, ValidationStats};
use crate::validation::{self, Summary};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Restricts the visible rows by validity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Valid,
    Invalid,
}

impl StatusFilter {
    pub fn admits(&self, result: &ValidationResult) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Valid => result.is_valid,
            StatusFilter::Invalid => !result.is_valid,
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "valid" => Ok(Self::Valid),
            "invalid" => Ok(Self::Invalid),
            other => Err(format!("unknown filter: {}", other)),
        }
    }
}

/// Which store listing backs the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Plain contact pages; validity is computed locally.
    Contacts,
    /// Server-validated pages with collection-wide stats.
    Validation,
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Contacts => f.write_str("contacts"),
            ViewMode::Validation => f.write_str("validation"),
        }
    }
}

/// An active field search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub field: Field,
    pub value: String,
}

/// Rows currently held by the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum PageItems {
    Contacts(Vec<Contact>),
    Validations(Vec<ValidationResult>),
}

impl PageItems {
    pub fn empty(mode: ViewMode) -> Self {
        match mode {
            ViewMode::Contacts => PageItems::Contacts(Vec::new()),
            ViewMode::Validation => PageItems::Validations(Vec::new()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            PageItems::Contacts(rows) => rows.len(),
            PageItems::Validations(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Validation results for every row, computing them for plain contacts.
    pub fn results(&self) -> Vec<ValidationResult> {
        match self {
            PageItems::Contacts(rows) => validation::validate_all(rows),
            PageItems::Validations(rows) => rows.clone(),
        }
    }

    pub fn contact(&self, id: &ContactId) -> Option<&Contact> {
        match self {
            PageItems::Contacts(rows) => rows.iter().find(|c| &c.id == id),
            PageItems::Validations(rows) => rows.iter().map(|r| &r.contact).find(|c| &c.id == id),
        }
    }

    /// Replace the row whose id matches `contact`, revalidating it.
    ///
    /// Returns the row's validity before and after, or `None` when the
    /// contact is not on this page.
    pub fn replace(&mut self, contact: &Contact) -> Option<(bool, bool)> {
        match self {
            PageItems::Contacts(rows) => {
                let row = rows.iter_mut().find(|c| c.id == contact.id)?;
                let was_valid = validation::validate(row).is_valid;
                *row = contact.clone();
                Some((was_valid, validation::validate(row).is_valid))
            }
            PageItems::Validations(rows) => {
                let row = rows.iter_mut().find(|r| r.contact.id == contact.id)?;
                let was_valid = row.is_valid;
                *row = validation::validate(contact);
                Some((was_valid, row.is_valid))
            }
        }
    }
}

/// Fetch lifecycle of the view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadStatus {
    Loading,
    Loaded,
    Error(String),
}

/// Everything a presentation layer needs to render one view.
///
/// Listing pages hold at most `page_size` rows. A search holds its whole
/// match set as a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    pub mode: ViewMode,
    pub items: PageItems,
    pub current_page: usize,
    /// Zero means the result is empty
    pub total_pages: usize,
    pub total_count: usize,
    pub page_size: usize,
    pub filter: StatusFilter,
    pub query: Option<SearchQuery>,
    pub status: LoadStatus,
    /// Store-reported counts for the whole collection
    pub collection_stats: Option<ValidationStats>,
}

impl PageState {
    /// Initial state: page 1, no filter, no query, loading.
    pub fn new(mode: ViewMode, page_size: usize) -> Self {
        Self {
            mode,
            items: PageItems::empty(mode),
            current_page: 1,
            total_pages: 0,
            total_count: 0,
            page_size,
            filter: StatusFilter::All,
            query: None,
            status: LoadStatus::Loading,
            collection_stats: None,
        }
    }

    /// Whether `page` lies within `[1, total_pages]`.
    pub fn contains_page(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Rows that pass the active filter, as validation results.
    pub fn visible(&self) -> Vec<ValidationResult> {
        self.items
            .results()
            .into_iter()
            .filter(|r| self.filter.admits(r))
            .collect()
    }

    /// Page, query and collection counts, kept apart.
    pub fn summary(&self) -> Summary {
        let page = validation::summarize(&self.items.results());
        Summary {
            page,
            query: self.query.as_ref().map(|_| page),
            collection: self.collection_stats,
        }
    }
}
