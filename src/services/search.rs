//! Record search.

use crate::config::RecorderConfig;
use crate::models::{Record, RecordField};
use crate::storage::JsonFileStore;
use crate::{Error, Result};
use tracing::debug;

/// Returns the records whose `field` contains `needle`, ignoring case, in
/// store order. An empty needle matches every record.
#[must_use]
pub fn search_records<'a>(
    records: &'a [Record],
    field: RecordField,
    needle: &str,
) -> Vec<&'a Record> {
    let needle = needle.to_lowercase();
    records
        .iter()
        .filter(|record| record.get(field).to_lowercase().contains(&needle))
        .collect()
}

/// Linear substring search over the store.
#[derive(Debug, Clone)]
pub struct SearchService {
    store: JsonFileStore,
}

impl SearchService {
    /// Creates a search service.
    #[must_use]
    pub const fn new(store: JsonFileStore) -> Self {
        Self { store }
    }

    /// Creates a search service from configuration.
    #[must_use]
    pub fn from_config(config: &RecorderConfig) -> Self {
        Self::new(JsonFileStore::from_config(config))
    }

    /// Searches one field of every stored record.
    ///
    /// # Errors
    ///
    /// Returns a store error if the store cannot be loaded.
    pub fn search(&self, field: RecordField, needle: &str) -> Result<Vec<Record>> {
        let doc = self.store.load_all()?;
        let matches: Vec<Record> = search_records(&doc.data_records, field, needle)
            .into_iter()
            .cloned()
            .collect();
        debug!(%field, needle, matches = matches.len(), "Search complete");
        Ok(matches)
    }

    /// Searches a field given by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the field name is unknown, or a
    /// store error.
    pub fn search_field(&self, field: &str, needle: &str) -> Result<Vec<Record>> {
        let parsed = RecordField::parse(field).ok_or_else(|| {
            Error::InvalidInput(format!(
                "Unknown field: {field} (expected one of: {})",
                RecordField::names().join(", ")
            ))
        })?;
        self.search(parsed, needle)
    }
}
