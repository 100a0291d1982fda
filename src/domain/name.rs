//! Name rule: required, Latin letters (accents included) and spaces.

use super::field_error::{ErrorKind, Field, FieldError};
use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[[\p{Latin}&&\p{L}] ]+$").expect("name pattern is valid"));

/// Validate a contact name.
pub fn validate(value: &str) -> Vec<FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return vec![FieldError::required(Field::Name, value)];
    }

    // Spreadsheets saved on macOS often carry decomposed accents
    let composed: String = trimmed.nfc().collect();
    if !NAME_PATTERN.is_match(&composed) {
        return vec![FieldError::new(
            Field::Name,
            ErrorKind::InvalidCharacter,
            "name may only contain letters and spaces",
            value,
        )];
    }

    Vec::new()
}
