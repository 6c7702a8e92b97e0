//! Record types and field sanitization.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use super::RecordField;

static NON_DIGIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("static regex: non-digit pattern"));

static DISALLOWED_TEXT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9 \n.]").expect("static regex: disallowed text pattern")
});

/// Strips every character that is not an ASCII decimal digit.
#[must_use]
pub fn sanitize_digits(raw: &str) -> String {
    NON_DIGIT_REGEX.replace_all(raw, "").into_owned()
}

/// Cleans a name.
///
/// Characters outside `[A-Za-z0-9 \n.]` become spaces, then whitespace runs
/// collapse to a single space and the ends are trimmed.
#[must_use]
pub fn sanitize_name(raw: &str) -> String {
    let replaced = DISALLOWED_TEXT_REGEX.replace_all(raw, " ");
    replaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans an address.
///
/// Characters outside `[A-Za-z0-9 \n.]` become spaces. Interior runs of
/// whitespace are kept as they are; only the ends are trimmed.
#[must_use]
pub fn sanitize_address(raw: &str) -> String {
    DISALLOWED_TEXT_REGEX
        .replace_all(raw, " ")
        .trim()
        .to_string()
}

/// A record as it arrives from an external file, before sanitization.
///
/// Every field is optional: decoders report what they found and leave the
/// decision about missing ids to validation. Scalar values that are not
/// strings (numbers, booleans) are accepted and stringified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// Raw identifier.
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    /// Raw name.
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    /// Raw address.
    #[serde(default, deserialize_with = "lenient_string")]
    pub address: Option<String>,
    /// Raw phone number.
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
}

impl RawRecord {
    /// Creates a raw record with all four fields present.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            address: Some(address.into()),
            phone: Some(phone.into()),
        }
    }
}

/// A sanitized employee record.
///
/// Construction never fails: offending characters are stripped or replaced.
/// Deserializing a `Record` goes through [`RawRecord`], so a record read
/// back from the store is sanitized the same way.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawRecord")]
pub struct Record {
    id: String,
    name: String,
    address: String,
    phone: String,
}

impl Record {
    /// Creates a record from four raw strings, sanitizing each field.
    #[must_use]
    pub fn new(id: &str, name: &str, address: &str, phone: &str) -> Self {
        Self {
            id: sanitize_digits(id),
            name: sanitize_name(name),
            address: sanitize_address(address),
            phone: sanitize_digits(phone),
        }
    }

    /// Returns the identifier (digits only, possibly empty).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Returns the phone number (digits only).
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Returns the value of a single field.
    #[must_use]
    pub fn get(&self, field: RecordField) -> &str {
        match field {
            RecordField::Id => &self.id,
            RecordField::Name => &self.name,
            RecordField::Address => &self.address,
            RecordField::Phone => &self.phone,
        }
    }

    /// Returns the record as an ordered field mapping (`id, name, address, phone`).
    #[must_use]
    pub fn fields(&self) -> [(RecordField, &str); 4] {
        [
            (RecordField::Id, self.id.as_str()),
            (RecordField::Name, self.name.as_str()),
            (RecordField::Address, self.address.as_str()),
            (RecordField::Phone, self.phone.as_str()),
        ]
    }

    /// Returns the field values in canonical order.
    #[must_use]
    pub fn values(&self) -> [&str; 4] {
        [&self.id, &self.name, &self.address, &self.phone]
    }
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Self::new(
            raw.id.as_deref().unwrap_or_default(),
            raw.name.as_deref().unwrap_or_default(),
            raw.address.as_deref().unwrap_or_default(),
            raw.phone.as_deref().unwrap_or_default(),
        )
    }
}

/// Deserializes any scalar into an optional string.
///
/// `null` maps to `None`; sequences and mappings are rejected.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = Option<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number, boolean or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
            Ok(Some(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            deserializer.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}
