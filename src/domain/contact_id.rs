//! ContactId value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A type-safe wrapper for store-assigned contact IDs.
///
/// IDs are opaque: the store may hand out strings or integers, and both
/// are held as their textual form. An ID can never be empty.
///
/// # Example
///
/// ```
/// use contact_audit::domain::ContactId;
///
/// let id = ContactId::new("42").unwrap();
/// assert_eq!(id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContactId(String);

impl ContactId {
    /// Create a new ContactId, validating that it's not blank.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the provided ID is empty or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for ContactId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Accepts both `"abc"` and `17`
impl<'de> Deserialize<'de> for ContactId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        let id = match raw {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(serde::de::Error::custom(ValidationError::InvalidId(
                    other.to_string(),
                )))
            }
        };
        ContactId::new(id).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_id_valid() {
        let id = ContactId::new("contact_123").unwrap();
        assert_eq!(id.as_str(), "contact_123");
    }

    #[test]
    fn test_contact_id_rejects_blank() {
        assert_eq!(ContactId::new(""), Err(ValidationError::EmptyId));
        assert_eq!(ContactId::new("   "), Err(ValidationError::EmptyId));
    }

    #[test]
    fn test_contact_id_serialization() {
        let id = ContactId::new("7").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"7\"");
    }

    #[test]
    fn test_contact_id_deserializes_numbers() {
        let id: ContactId = serde_json::from_str("17").unwrap();
        assert_eq!(id.as_str(), "17");

        let id: ContactId = serde_json::from_str("\"a1\"").unwrap();
        assert_eq!(id.as_str(), "a1");
    }

    #[test]
    fn test_contact_id_deserialization_rejects_other_types() {
        assert!(serde_json::from_str::<ContactId>("\"\"").is_err());
        assert!(serde_json::from_str::<ContactId>("null").is_err());
        assert!(serde_json::from_str::<ContactId>("true").is_err());
    }
}
