//! JSON file store.
//!
//! The whole store is one pretty-printed JSON document. Every mutation is a
//! read-modify-write of that file; single-process access is assumed.

use crate::config::RecorderConfig;
use crate::io::formats::json::to_pretty_json;
use crate::models::Record;
use crate::storage::StoreDocument;
use crate::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Incoming records split into those to keep and the duplicate ids dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplicated {
    /// Records whose id is new, in incoming order.
    pub accepted: Vec<Record>,
    /// Ids that were dropped, in incoming order.
    pub duplicate_ids: Vec<String>,
}

/// Drops incoming records whose id is already stored or already seen earlier
/// in the same batch.
#[must_use]
pub fn dedupe(existing: &[Record], incoming: Vec<Record>) -> Deduplicated {
    let mut seen: HashSet<String> = existing.iter().map(|r| r.id().to_string()).collect();
    let mut result = Deduplicated::default();

    for record in incoming {
        if seen.insert(record.id().to_string()) {
            result.accepted.push(record);
        } else {
            warn!(id = record.id(), "Duplicate ID {} skipped", record.id());
            result.duplicate_ids.push(record.id().to_string());
        }
    }

    result
}

/// Outcome of [`JsonFileStore::append`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppendOutcome {
    /// Records written to the store.
    pub appended: usize,
    /// Ids rejected as duplicates.
    pub duplicate_ids: Vec<String>,
    /// Both the store and the batch were empty; nothing was written.
    pub nothing_to_upload: bool,
}

/// The record store, backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store for the given file. Nothing is read or written yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the configured path.
    #[must_use]
    pub fn from_config(config: &RecorderConfig) -> Self {
        Self::new(&config.store_path)
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the whole store.
    ///
    /// A missing file is created with an empty document. A `null` document
    /// reads as empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the file is not a store document,
    /// or [`Error::OperationFailed`] if it cannot be read or created.
    pub fn load_all(&self) -> Result<StoreDocument> {
        if let Some(doc) = self.read_existing()? {
            return Ok(doc);
        }
        debug!(path = %self.path.display(), "Store not found, creating empty store");
        let doc = StoreDocument::default();
        self.persist(&doc)?;
        Ok(doc)
    }

    /// Reads the store without creating it. `None` if the file is missing.
    fn read_existing(&self) -> Result<Option<StoreDocument>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::io("read_store", e)),
        };

        let doc: Option<StoreDocument> =
            serde_json::from_slice(&bytes).map_err(|e| Error::CorruptStore {
                path: self.path.display().to_string(),
                cause: e.to_string(),
            })?;
        let doc = doc.unwrap_or_default();

        debug!(path = %self.path.display(), records = doc.len(), "Loaded store");
        Ok(Some(doc))
    }

    /// Number of stored records.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_all`].
    pub fn len(&self) -> Result<usize> {
        self.load_all().map(|doc| doc.len())
    }

    /// Returns true if the store holds no records.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load_all`].
    pub fn is_empty(&self) -> Result<bool> {
        self.load_all().map(|doc| doc.is_empty())
    }

    /// Computes what [`Self::append`] would do without writing anything.
    /// A missing store is treated as empty and is not created.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the store cannot be parsed, or
    /// [`Error::OperationFailed`] if it cannot be read.
    pub fn preview_append(&self, incoming: &[Record]) -> Result<AppendOutcome> {
        let doc = self.read_existing()?.unwrap_or_default();
        if doc.is_empty() && incoming.is_empty() {
            return Ok(nothing_to_upload());
        }
        let deduped = dedupe(&doc.data_records, incoming.to_vec());
        Ok(AppendOutcome {
            appended: deduped.accepted.len(),
            duplicate_ids: deduped.duplicate_ids,
            nothing_to_upload: false,
        })
    }

    /// Appends records whose ids are not stored yet, then rewrites the file.
    ///
    /// The file is only written when at least one record is appended. If
    /// the store cannot be loaded the file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CorruptStore`] if the existing store cannot be
    /// parsed, or [`Error::OperationFailed`] on I/O failure.
    pub fn append(&self, incoming: Vec<Record>) -> Result<AppendOutcome> {
        let mut doc = self.load_all()?;
        if doc.is_empty() && incoming.is_empty() {
            return Ok(nothing_to_upload());
        }

        let deduped = dedupe(&doc.data_records, incoming);
        let appended = deduped.accepted.len();
        if appended > 0 {
            doc.data_records.extend(deduped.accepted);
            self.persist(&doc)?;
        }

        Ok(AppendOutcome {
            appended,
            duplicate_ids: deduped.duplicate_ids,
            nothing_to_upload: false,
        })
    }

    /// Writes the whole document, creating parent directories as needed.
    fn persist(&self, doc: &StoreDocument) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io("create_store_dir", e))?;
        }
        let bytes = to_pretty_json(doc)?;
        fs::write(&self.path, bytes).map_err(|e| Error::io("write_store", e))?;
        debug!(path = %self.path.display(), records = doc.len(), "Wrote store");
        Ok(())
    }
}

const fn nothing_to_upload() -> AppendOutcome {
    AppendOutcome {
        appended: 0,
        duplicate_ids: Vec::new(),
        nothing_to_upload: true,
    }
}
