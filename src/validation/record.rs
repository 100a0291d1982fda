//! Per-contact verdict built from the field rules.

use crate::domain::{client_key, email, name, phone, FieldError};
use crate::models::{Contact, ValidationResult};

/// Validate one contact.
///
/// Field rules run in a fixed order (client key, name, email, phone) and
/// their errors are concatenated in that order.
pub fn validate(contact: &Contact) -> ValidationResult {
    let errors: Vec<FieldError> = client_key::validate(&contact.client_key)
        .into_iter()
        .chain(name::validate(&contact.name))
        .chain(email::validate(&contact.email))
        .chain(phone::validate(&contact.phone))
        .collect();

    ValidationResult::new(contact.clone(), errors)
}

/// Validate a sequence of contacts, preserving order.
pub fn validate_all(contacts: &[Contact]) -> Vec<ValidationResult> {
    contacts.iter().map(validate).collect()
}
