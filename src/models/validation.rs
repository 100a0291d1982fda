//! Validation result and summary count models.

use super::contact::{null_as_default, Contact};
use crate::domain::FieldError;
use serde::{Deserialize, Serialize};

/// The outcome of applying every field rule to one contact snapshot.
///
/// `contact` is a copy taken when the result was computed; editing the
/// record later does not touch an existing result until it is recomputed.
/// `is_valid` always equals `errors.is_empty()`, including for results
/// received from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ValidationResultWire")]
pub struct ValidationResult {
    pub contact: Contact,
    pub is_valid: bool,
    pub errors: Vec<FieldError>,
}

impl ValidationResult {
    pub fn new(contact: Contact, errors: Vec<FieldError>) -> Self {
        Self {
            contact,
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

// Store payloads may carry a stale or missing `is_valid`; it is recomputed.
#[derive(Deserialize)]
struct ValidationResultWire {
    contact: Contact,
    #[serde(default, deserialize_with = "null_as_default")]
    errors: Vec<FieldError>,
}

impl From<ValidationResultWire> for ValidationResult {
    fn from(wire: ValidationResultWire) -> Self {
        ValidationResult::new(wire.contact, wire.errors)
    }
}

/// Total / valid / invalid counts over some set of results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total: usize,
    pub valid: usize,
    pub invalid: usize,
}

impl ValidationStats {
    /// Build counts from a total and the number of valid entries.
    pub fn from_counts(total: usize, valid: usize) -> Self {
        let valid = valid.min(total);
        Self {
            total,
            valid,
            invalid: total - valid,
        }
    }

    /// Move one record between the valid and invalid buckets.
    ///
    /// Used when a single record is revalidated in place; the total is
    /// unchanged and counts never underflow.
    pub fn shift(&mut self, was_valid: bool, is_valid: bool) {
        match (was_valid, is_valid) {
            (false, true) if self.invalid > 0 => {
                self.invalid -= 1;
                self.valid += 1;
            }
            (true, false) if self.valid > 0 => {
                self.valid -= 1;
                self.invalid += 1;
            }
            _ => {}
        }
    }
}
