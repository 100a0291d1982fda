//! Client key rule: required, ASCII digits only.

use super::field_error::{ErrorKind, Field, FieldError};

/// Validate a client key.
///
/// Surrounding whitespace is ignored; any character other than `0-9`
/// left after trimming is an `INVALID_CHARACTER` violation.
pub fn validate(value: &str) -> Vec<FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return vec![FieldError::required(Field::ClientKey, value)];
    }

    if !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return vec![FieldError::new(
            Field::ClientKey,
            ErrorKind::InvalidCharacter,
            "client_key may only contain digits",
            value,
        )];
    }

    Vec::new()
}
