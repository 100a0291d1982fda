//! Email rule: required, `local@domain.tld` shape, recognised provider domain.

use super::field_error::{ErrorKind, Field, FieldError};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@([A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,})$")
        .expect("email pattern is valid")
});

/// Mail provider domains accepted by the email rule (lowercase).
pub const RECOGNIZED_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "yahoo.com.mx",
    "hotmail.com",
    "hotmail.es",
    "outlook.com",
    "outlook.es",
    "live.com",
    "live.com.mx",
    "icloud.com",
    "me.com",
    "msn.com",
    "aol.com",
    "protonmail.com",
    "proton.me",
];

/// Validate an email address.
///
/// Shape is checked first; the domain allow-list only applies to
/// structurally valid addresses and is case-insensitive.
pub fn validate(value: &str) -> Vec<FieldError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return vec![FieldError::required(Field::Email, value)];
    }

    let Some(captures) = EMAIL_PATTERN.captures(trimmed) else {
        return vec![FieldError::new(
            Field::Email,
            ErrorKind::InvalidFormat,
            "email must look like user@domain.com",
            value,
        )];
    };

    let domain = captures[1].to_lowercase();
    if !RECOGNIZED_DOMAINS.contains(&domain.as_str()) {
        return vec![FieldError::new(
            Field::Email,
            ErrorKind::InvalidDomain,
            format!("email domain '{}' is not a recognized provider", domain),
            value,
        )];
    }

    Vec::new()
}
