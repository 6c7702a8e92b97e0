//! On-disk store document.

use crate::models::Record;
use serde::{Deserialize, Serialize};

/// The backing store document: `{"data_records": [...]}`.
///
/// Records keep insertion order. Reading a document sanitizes every record
/// again, so a hand-edited store still yields clean records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    /// Stored records in insertion order.
    #[serde(default)]
    pub data_records: Vec<Record>,
}

impl StoreDocument {
    /// Creates a document holding the given records.
    #[must_use]
    pub const fn new(data_records: Vec<Record>) -> Self {
        Self { data_records }
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data_records.len()
    }

    /// Returns true if the document holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data_records.is_empty()
    }
}
