//! Manual record entry.

use crate::config::RecorderConfig;
use crate::io::validation::RecordValidator;
use crate::models::RawRecord;
use crate::storage::JsonFileStore;
use crate::{Error, Result};
use tracing::{info, warn};

/// Result of a manual add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddResult {
    /// Records written to the store.
    pub added: usize,
    /// Entries rejected by validation, with the reason.
    pub rejected: Vec<String>,
    /// Ids rejected as duplicates.
    pub duplicate_ids: Vec<String>,
}

/// Adds records typed in by hand, up to a fixed capacity.
#[derive(Debug, Clone)]
pub struct AddService {
    store: JsonFileStore,
    capacity: usize,
    validator: RecordValidator,
}

impl AddService {
    /// Creates an add service.
    #[must_use]
    pub const fn new(store: JsonFileStore, capacity: usize) -> Self {
        Self {
            store,
            capacity,
            validator: RecordValidator::new(),
        }
    }

    /// Creates an add service from configuration.
    #[must_use]
    pub fn from_config(config: &RecorderConfig) -> Self {
        Self::new(JsonFileStore::from_config(config), config.capacity)
    }

    /// Number of records that can still be added.
    ///
    /// # Errors
    ///
    /// Returns a store error if the store cannot be loaded.
    pub fn remaining(&self) -> Result<usize> {
        Ok(self.capacity.saturating_sub(self.store.len()?))
    }

    /// Sanitizes and appends the given entries.
    ///
    /// The batch is refused as a whole if it would not fit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CapacityExceeded`] if the batch does not fit, or a
    /// store error.
    pub fn add(&self, entries: Vec<RawRecord>) -> Result<AddResult> {
        let current = self.store.len()?;
        if current + entries.len() > self.capacity {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
                current,
                requested: entries.len(),
            });
        }

        let mut result = AddResult::default();
        let mut records = Vec::with_capacity(entries.len());
        for (index, raw) in entries.iter().enumerate() {
            let validation = self.validator.validate(raw);
            match validation.error_message() {
                Some(message) => {
                    warn!(position = index + 1, reason = message, "Rejecting entry");
                    result.rejected.push(format!("Record {}: {message}", index + 1));
                },
                None => records.push(validation.record),
            }
        }

        let outcome = self.store.append(records)?;
        result.added = outcome.appended;
        result.duplicate_ids = outcome.duplicate_ids;

        info!(added = result.added, rejected = result.rejected.len(), "Add complete");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn service(dir: &TempDir, capacity: usize) -> AddService {
        AddService::new(JsonFileStore::new(dir.path().join("main.json")), capacity)
    }

    #[test]
    fn test_add_sanitizes() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, 10);

        let result = service
            .add(vec![RawRecord::new("#12", "Anne@Rice", "23 Vampire Ave,", "555-1234")])
            .unwrap();
        assert_eq!(result.added, 1);

        let doc = JsonFileStore::new(dir.path().join("main.json")).load_all().unwrap();
        let record = &doc.data_records[0];
        assert_eq!(record.id(), "12");
        assert_eq!(record.name(), "Anne Rice");
        assert_eq!(record.address(), "23 Vampire Ave");
        assert_eq!(record.phone(), "5551234");
    }

    #[test]
    fn test_add_respects_capacity() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, 2);
        service.add(vec![RawRecord::new("1", "A", "B", "1")]).unwrap();
        assert_eq!(service.remaining().unwrap(), 1);

        let err = service
            .add(vec![
                RawRecord::new("2", "A", "B", "1"),
                RawRecord::new("3", "A", "B", "1"),
            ])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::CapacityExceeded {
                capacity: 2,
                current: 1,
                requested: 2
            }
        ));
        assert_eq!(service.remaining().unwrap(), 1);
    }

    #[test]
    fn test_add_rejects_duplicates_and_bad_ids() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir, 10);
        service.add(vec![RawRecord::new("1", "A", "B", "1")]).unwrap();

        let result = service
            .add(vec![
                RawRecord::new("1", "Again", "B", "1"),
                RawRecord::new("none", "No Id", "B", "1"),
            ])
            .unwrap();
        assert_eq!(result.added, 0);
        assert_eq!(result.duplicate_ids, ["1"]);
        assert_eq!(result.rejected.len(), 1);
        assert!(result.rejected[0].starts_with("Record 2:"));
    }
}
