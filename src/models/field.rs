//! Record field catalogue.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fields every record carries, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// Numeric identifier, unique across the store.
    Id,
    /// Employee name.
    Name,
    /// Employee address.
    Address,
    /// Phone number.
    Phone,
}

impl RecordField {
    /// Returns all fields in canonical order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Id, Self::Name, Self::Address, Self::Phone]
    }

    /// Returns the field names in canonical order.
    ///
    /// This is the CSV header and the key order of a stored record.
    #[must_use]
    pub const fn names() -> [&'static str; 4] {
        ["id", "name", "address", "phone"]
    }

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Address => "address",
            Self::Phone => "phone",
        }
    }

    /// Parses a field name, ignoring case and surrounding whitespace.
    ///
    /// Returns `None` if the field name is not recognized.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "address" => Some(Self::Address),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
