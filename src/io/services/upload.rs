//! Record upload service.
//!
//! Decodes an external file, validates each entry and appends the clean
//! records to the store.

use crate::io::formats::Format;
use crate::io::validation::RecordValidator;
use crate::storage::JsonFileStore;
use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, warn};

/// Options for an upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadOptions {
    /// File format. When unset, file uploads detect it from the extension.
    pub format: Option<Format>,
    /// Validate and dedupe without creating or writing the store.
    pub dry_run: bool,
}

impl UploadOptions {
    /// Sets the format explicitly.
    #[must_use]
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Enables or disables dry run mode.
    #[must_use]
    pub const fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Result of an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadResult {
    /// Entries found in the file, including skipped ones.
    pub decoded: usize,
    /// Records appended to the store (or that would be, on a dry run).
    pub appended: usize,
    /// Entries skipped because they could not be read or had no usable id.
    pub skipped_invalid: usize,
    /// Entries skipped because their id was already taken.
    pub skipped_duplicates: usize,
    /// One human-readable line per skipped entry.
    pub warnings: Vec<String>,
    /// Both the store and the file were empty.
    pub nothing_to_upload: bool,
    /// Whether the store was left untouched on purpose.
    pub dry_run: bool,
}

/// Uploads external files into the store.
#[derive(Debug, Clone)]
pub struct UploadService {
    store: JsonFileStore,
    validator: RecordValidator,
}

impl UploadService {
    /// Creates an upload service writing to the given store.
    #[must_use]
    pub const fn new(store: JsonFileStore) -> Self {
        Self {
            store,
            validator: RecordValidator::new(),
        }
    }

    /// Returns the target store.
    #[must_use]
    pub const fn store(&self) -> &JsonFileStore {
        &self.store
    }

    /// Uploads file bytes in the given format.
    ///
    /// # Errors
    ///
    /// Returns the decode error if the file cannot be used as a whole
    /// ([`Error::CorruptFile`], [`Error::FormatMismatch`],
    /// [`Error::EmptyFile`]), or a store error. The store is not modified
    /// when an error is returned.
    pub fn upload(&self, format: Format, bytes: &[u8]) -> Result<UploadResult> {
        self.upload_with(format, bytes, &UploadOptions::default())
    }

    /// Uploads file bytes with explicit options.
    ///
    /// # Errors
    ///
    /// Same as [`Self::upload`].
    pub fn upload_with(
        &self,
        format: Format,
        bytes: &[u8],
        options: &UploadOptions,
    ) -> Result<UploadResult> {
        let batch = format.codec().decode(bytes)?;

        let mut result = UploadResult {
            decoded: batch.total(),
            skipped_invalid: batch.skipped.len(),
            warnings: batch.skipped.iter().map(ToString::to_string).collect(),
            dry_run: options.dry_run,
            ..UploadResult::default()
        };

        let mut records = Vec::with_capacity(batch.entries.len());
        for entry in &batch.entries {
            let validation = self.validator.validate(&entry.raw);
            if let Some(message) = validation.error_message() {
                warn!(%format, position = entry.position, reason = message, "Skipping entry");
                result.skipped_invalid += 1;
                result
                    .warnings
                    .push(format!("Record {}: {message}", entry.position));
                continue;
            }
            for issue in &validation.issues {
                debug!(position = entry.position, field = %issue.field, "{}", issue.message);
            }
            records.push(validation.record);
        }

        let outcome = if options.dry_run {
            self.store.preview_append(&records)?
        } else {
            self.store.append(records)?
        };

        result.appended = outcome.appended;
        result.nothing_to_upload = outcome.nothing_to_upload;
        result.skipped_duplicates = outcome.duplicate_ids.len();
        result.warnings.extend(
            outcome
                .duplicate_ids
                .iter()
                .map(|id| format!("Duplicate ID {id} skipped")),
        );

        info!(
            %format,
            decoded = result.decoded,
            appended = result.appended,
            skipped_invalid = result.skipped_invalid,
            skipped_duplicates = result.skipped_duplicates,
            dry_run = result.dry_run,
            "Upload complete"
        );
        Ok(result)
    }

    /// Uploads a file, detecting the format from its extension unless one
    /// is given in `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the file does not exist or its
    /// format cannot be determined, otherwise the same as [`Self::upload`].
    pub fn upload_file(&self, path: &Path, options: &UploadOptions) -> Result<UploadResult> {
        let format = match options.format {
            Some(format) => format,
            None => Format::from_path(path)?,
        };

        let bytes = fs::read(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                Error::InvalidInput(format!("{} does not exist", path.display()))
            } else {
                Error::io("read_upload_file", e)
            }
        })?;

        self.upload_with(format, &bytes, options)
    }
}
