//! Upload/download I/O subsystem.
//!
//! Moves records between the store and external files in four formats.
//!
//! # Architecture
//!
//! - **Format adapters** implement [`FormatCodec`]; [`Format::codec`] picks one
//! - **Validation layer** sanitizes decoded entries and rejects unusable ids
//! - **Services** orchestrate decode, validation, dedupe and persistence
//!
//! # Supported Formats
//!
//! | Format | Upload shape | Download shape |
//! |--------|--------------|----------------|
//! | JSON | `{"data_records": [..]}` | same |
//! | CSV | `id,name,address,phone` header + rows | same |
//! | YAML | `data_records:` mapping keyed by id | sequence of single-key mappings |
//! | XML | `<data_records>` of `<employee .../>` | same |
//!
//! # Example
//!
//! ```rust,ignore
//! use datarec::io::{Format, Pipeline, UploadOptions};
//!
//! let result = pipeline
//!     .upload()
//!     .upload_file(Path::new("staff.csv"), &UploadOptions::default())?;
//! println!("Uploaded {} records", result.appended);
//! ```

pub mod formats;
pub mod services;
pub mod traits;
pub mod validation;

pub use formats::Format;
pub use services::{
    ConvertResult, DownloadResult, DownloadService, Pipeline, UploadOptions, UploadResult,
    UploadService, convert,
};
pub use traits::{DecodedBatch, DecodedEntry, FormatCodec, SkippedEntry};
pub use validation::{RecordValidator, ValidationIssue, ValidationResult, ValidationSeverity};
