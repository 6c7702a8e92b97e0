//! Record download service.

use crate::io::formats::Format;
use crate::storage::JsonFileStore;
use crate::{Error, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Result of a download written to a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    /// Format written.
    pub format: Format,
    /// Number of records written.
    pub records: usize,
    /// Output path.
    pub output_path: String,
}

/// Encodes the store into external formats.
#[derive(Debug, Clone)]
pub struct DownloadService {
    store: JsonFileStore,
}

impl DownloadService {
    /// Creates a download service reading from the given store.
    #[must_use]
    pub const fn new(store: JsonFileStore) -> Self {
        Self { store }
    }

    /// Returns the source store.
    #[must_use]
    pub const fn store(&self) -> &JsonFileStore {
        &self.store
    }

    /// Encodes every stored record in the given format.
    ///
    /// # Errors
    ///
    /// Returns a store error or an encoding error.
    pub fn download(&self, format: Format) -> Result<Vec<u8>> {
        self.encode_store(format).map(|(bytes, _)| bytes)
    }

    /// Writes every stored record to a file, detecting the format from the
    /// extension unless one is given.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the format cannot be determined,
    /// a store error, or [`Error::OperationFailed`] if the file cannot be
    /// written.
    pub fn download_file(&self, path: &Path, format: Option<Format>) -> Result<DownloadResult> {
        let format = match format {
            Some(format) => format,
            None => Format::from_path(path)?,
        };

        let (bytes, records) = self.encode_store(format)?;
        fs::write(path, bytes).map_err(|e| Error::io("write_download_file", e))?;

        info!(%format, records, path = %path.display(), "Download complete");
        Ok(DownloadResult {
            format,
            records,
            output_path: path.display().to_string(),
        })
    }

    fn encode_store(&self, format: Format) -> Result<(Vec<u8>, usize)> {
        let doc = self.store.load_all()?;
        let bytes = format.codec().encode(&doc.data_records)?;
        Ok((bytes, doc.len()))
    }
}
