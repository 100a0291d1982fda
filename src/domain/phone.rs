//! Phone rule: required, ten raw digits, allowed area code.

use super::field_error::{ErrorKind, Field, FieldError};

/// Number of digits in a valid phone number.
pub const PHONE_LENGTH: usize = 10;

/// Accepted three-digit area codes.
pub const AREA_CODES: [&str; 9] = ["961", "962", "963", "964", "965", "966", "967", "968", "994"];

/// Validate a phone number.
///
/// Formatting characters are not stripped: the value must already be
/// digits only. Checks run character class, then length, then area code.
pub fn validate(value: &str) -> Vec<FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return vec![FieldError::required(Field::Phone, value)];
    }

    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return vec![FieldError::new(
            Field::Phone,
            ErrorKind::InvalidCharacter,
            "phone may only contain digits",
            value,
        )];
    }

    if trimmed.len() != PHONE_LENGTH {
        return vec![FieldError::new(
            Field::Phone,
            ErrorKind::InvalidLength,
            format!(
                "phone must have exactly {} digits, found {}",
                PHONE_LENGTH,
                trimmed.len()
            ),
            value,
        )];
    }

    let area_code = &trimmed[..3];
    if !AREA_CODES.contains(&area_code) {
        return vec![FieldError::new(
            Field::Phone,
            ErrorKind::InvalidAreaCode,
            format!("area code {} is not allowed", area_code),
            value,
        )];
    }

    Vec::new()
}
