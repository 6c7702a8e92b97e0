//! # Datarec
//!
//! A personal record keeper for employee records.
//!
//! Records (`id`, `name`, `address`, `phone`) live in a single JSON document
//! on disk and can be uploaded from, or downloaded to, JSON, CSV, YAML and XML
//! files.
//!
//! ## Features
//!
//! - Per-format codecs that reject malformed files as a whole and skip bad
//!   entries one at a time
//! - Field sanitization at the decode boundary, so every in-memory
//!   [`Record`] is clean
//! - Duplicate-id rejection on every write to the store
//! - Manual entry with a configurable capacity and linear substring search
//!
//! ## Example
//!
//! ```rust,ignore
//! use datarec::{Format, Pipeline, RecorderConfig};
//!
//! let pipeline = Pipeline::new(&RecorderConfig::default());
//! let result = pipeline.upload().upload(Format::Csv, csv_bytes)?;
//! println!("Stored {} new records", result.appended);
//!
//! let yaml = pipeline.download().download(Format::Yaml)?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

pub mod config;
pub mod io;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;

pub use config::RecorderConfig;
pub use io::{
    DownloadService, Format, FormatCodec, Pipeline, UploadOptions, UploadResult, UploadService,
};
pub use models::{RawRecord, Record, RecordField};
pub use services::{AddService, SearchService};
pub use storage::{JsonFileStore, StoreDocument};

/// Error type for datarec operations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `InvalidInput` | Unknown format tag or extension, unknown search field |
/// | `OperationFailed` | File I/O or serializer failures |
/// | `CorruptStore` | The backing store file is not a valid store document |
/// | `CorruptFile` | An upload file cannot be parsed at all |
/// | `FormatMismatch` | An upload file parses but has the wrong shape |
/// | `EmptyFile` | An upload file has the right shape but no entries |
/// | `CapacityExceeded` | A manual add would overflow the configured capacity |
#[derive(Debug, ThisError)]
pub enum Error {
    /// Invalid input was provided.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    ///
    /// Raised when:
    /// - A file cannot be opened, read or written
    /// - A serializer fails while encoding records
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },

    /// The backing store exists but could not be parsed.
    ///
    /// The store file is never rewritten after this error.
    #[error("store at {path} might be corrupted: {cause}")]
    CorruptStore {
        /// Path of the store file.
        path: String,
        /// The underlying parse error.
        cause: String,
    },

    /// An upload file could not be parsed.
    #[error("{format} file is corrupted: {cause}")]
    CorruptFile {
        /// Format tag of the file.
        format: String,
        /// The underlying parse error.
        cause: String,
    },

    /// An upload file does not follow the expected layout.
    #[error("{format} file does not follow the expected layout: {expected}")]
    FormatMismatch {
        /// Format tag of the file.
        format: String,
        /// Description of the expected layout.
        expected: String,
    },

    /// An upload file contains no entries.
    #[error("{format} file contains no records")]
    EmptyFile {
        /// Format tag of the file.
        format: String,
    },

    /// Adding records would exceed the store capacity.
    #[error("adding {requested} records exceeds capacity of {capacity} ({current} already stored)")]
    CapacityExceeded {
        /// Configured capacity.
        capacity: usize,
        /// Records currently stored.
        current: usize,
        /// Records requested.
        requested: usize,
    },
}

impl Error {
    /// Returns whether this error is reported at warning level.
    ///
    /// An empty upload file is not a failure of the program; the caller may
    /// carry on with zero entries.
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self, Self::EmptyFile { .. })
    }

    pub(crate) fn io(operation: &str, cause: impl std::fmt::Display) -> Self {
        Self::OperationFailed {
            operation: operation.to_string(),
            cause: cause.to_string(),
        }
    }
}

/// Result type alias for datarec operations.
pub type Result<T> = std::result::Result<T, Error>;
