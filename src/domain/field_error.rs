//! Field error taxonomy shared by every validator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The validated attributes of a contact, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    ClientKey,
    Name,
    Email,
    Phone,
}

impl Field {
    /// Every field in validation order.
    pub const ALL: [Field; 4] = [Field::ClientKey, Field::Name, Field::Email, Field::Phone];

    /// Wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ClientKey => "client_key",
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s.trim())
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// Closed set of rule violations.
///
/// Adding a variant forces every exhaustive match (badge tone, filters)
/// to decide how to treat it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Required,
    InvalidFormat,
    InvalidCharacter,
    InvalidDomain,
    InvalidAreaCode,
    InvalidLength,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 6] = [
        ErrorKind::Required,
        ErrorKind::InvalidFormat,
        ErrorKind::InvalidCharacter,
        ErrorKind::InvalidDomain,
        ErrorKind::InvalidAreaCode,
        ErrorKind::InvalidLength,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Required => "REQUIRED",
            ErrorKind::InvalidFormat => "INVALID_FORMAT",
            ErrorKind::InvalidCharacter => "INVALID_CHARACTER",
            ErrorKind::InvalidDomain => "INVALID_DOMAIN",
            ErrorKind::InvalidAreaCode => "INVALID_AREA_CODE",
            ErrorKind::InvalidLength => "INVALID_LENGTH",
        }
    }

    /// Badge tone a presentation layer renders this kind with.
    pub fn badge_tone(&self) -> BadgeTone {
        match self {
            ErrorKind::Required => BadgeTone::Red,
            ErrorKind::InvalidFormat => BadgeTone::Orange,
            ErrorKind::InvalidCharacter => BadgeTone::Yellow,
            ErrorKind::InvalidDomain => BadgeTone::Purple,
            ErrorKind::InvalidAreaCode => BadgeTone::Blue,
            ErrorKind::InvalidLength => BadgeTone::Gray,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeTone {
    Red,
    Orange,
    Yellow,
    Purple,
    Blue,
    Gray,
}

/// A single rule violation on one contact attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The attribute that failed
    pub field: Field,

    /// Violation kind
    #[serde(rename = "type")]
    pub kind: ErrorKind,

    /// Human-readable explanation
    pub message: String,

    /// The offending raw value (may be empty)
    #[serde(default)]
    pub value: String,
}

impl FieldError {
    pub fn new(field: Field, kind: ErrorKind, message: impl Into<String>, value: &str) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
            value: value.to_string(),
        }
    }

    /// The `REQUIRED` error for a blank field.
    pub fn required(field: Field, value: &str) -> Self {
        Self::new(
            field,
            ErrorKind::Required,
            format!("{} is required", field),
            value,
        )
    }
}
