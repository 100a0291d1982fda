//! Summary counts over validation results.

use crate::models::{ValidationResult, ValidationStats};
use serde::{Deserialize, Serialize};

/// Count total, valid and invalid results.
pub fn summarize(results: &[ValidationResult]) -> ValidationStats {
    let valid = results.iter().filter(|r| r.is_valid).count();
    ValidationStats::from_counts(results.len(), valid)
}

/// What a set of counts describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsScope {
    /// Only the rows of the current page.
    Page,
    /// The full match set of the active search.
    Query,
    /// The whole collection, as reported by the store.
    Collection,
}

/// Counts tagged with the scope they were computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopedStats {
    pub scope: StatsScope,
    pub stats: ValidationStats,
}

/// Every count the view knows about, kept apart by scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Recomputed locally from the rows on screen
    pub page: ValidationStats,

    /// Recomputed locally from the search match set, if a search is active
    pub query: Option<ValidationStats>,

    /// Authoritative counts supplied by the store
    pub collection: Option<ValidationStats>,
}

impl Summary {
    /// The counts a user should see as "the" totals.
    ///
    /// An active search wins, then store-supplied collection counts, then
    /// the page's own counts. The scope travels with the numbers.
    pub fn preferred(&self) -> ScopedStats {
        if let Some(stats) = self.query {
            return ScopedStats {
                scope: StatsScope::Query,
                stats,
            };
        }
        if let Some(stats) = self.collection {
            return ScopedStats {
                scope: StatsScope::Collection,
                stats,
            };
        }
        ScopedStats {
            scope: StatsScope::Page,
            stats: self.page,
        }
    }
}
