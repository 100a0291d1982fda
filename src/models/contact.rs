//! Contact model representing one row of the uploaded client spreadsheet.

use crate::domain::{ContactId, Field};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize a spreadsheet cell into text without ever failing.
///
/// Missing or `null` cells become empty strings, numeric cells keep their
/// decimal text (`9611234567`, not `9611234567.0`), and anything else is kept
/// as its JSON text so the field rules can report it.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => {
                format!("{}", f as i64)
            }
            _ => n.to_string(),
        },
        Some(other) => other.to_string(),
    })
}

/// Deserialize a possibly-`null` value into its default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A client contact as held by the store.
///
/// The core only ever holds read-through copies: two contacts with the same
/// `id` are the same record, whatever their field values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    /// Store-assigned identifier, immutable once created
    pub id: ContactId,

    #[serde(default, deserialize_with = "lenient_string")]
    pub client_key: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub email: String,

    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: String,
}

impl Contact {
    pub fn new(
        id: ContactId,
        client_key: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id,
            client_key: client_key.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Raw value of a validated attribute.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::ClientKey => &self.client_key,
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }
}

/// Editable fields of a contact, as entered in the edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    #[serde(default)]
    pub client_key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl ContactDraft {
    /// Pre-fill a draft from the contact being edited.
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            client_key: contact.client_key.clone(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }

    /// Fields left blank (empty or whitespace only), in validation order.
    pub fn blank_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.value(*field).trim().is_empty())
            .collect()
    }

    /// The edited contact: same identity, draft values.
    pub fn apply_to(&self, contact: &Contact) -> Contact {
        Contact {
            id: contact.id.clone(),
            client_key: self.client_key.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    fn value(&self, field: Field) -> &str {
        match field {
            Field::ClientKey => &self.client_key,
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
        }
    }
}
