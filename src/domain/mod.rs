//! Domain value objects and field rules.
//!
//! This module contains the closed field-error taxonomy, the `ContactId`
//! value object, and one pure validator per contact attribute. Validators
//! never fail: every violation is reported as a [`FieldError`] value.

pub mod client_key;
pub mod contact_id;
pub mod email;
pub mod errors;
pub mod field_error;
pub mod name;
pub mod phone;

pub use contact_id::ContactId;
pub use errors::ValidationError;
pub use field_error::{BadgeTone, ErrorKind, Field, FieldError};
