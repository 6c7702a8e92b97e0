//! Core traits for upload/download operations.
//!
//! Defines the [`FormatCodec`] trait that every format adapter implements,
//! and the [`DecodedBatch`] value a decoder hands to validation.

use crate::Result;
use crate::io::formats::Format;
use crate::models::{RawRecord, Record};
use std::fmt;

/// A decoded entry together with its 1-indexed position in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEntry {
    /// Position of the entry in the source (data row for CSV).
    pub position: usize,
    /// The raw field values.
    pub raw: RawRecord,
}

/// An entry the decoder dropped without failing the whole file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position of the entry in the source.
    pub position: usize,
    /// Why the entry was dropped.
    pub reason: String,
}

impl fmt::Display for SkippedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Record {}: {}", self.position, self.reason)
    }
}

/// Output of a successful decode.
///
/// Decoding succeeds at the file level; individual entries that could not be
/// read end up in `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedBatch {
    /// Entries in source order.
    pub entries: Vec<DecodedEntry>,
    /// Entries dropped by the decoder.
    pub skipped: Vec<SkippedEntry>,
}

impl DecodedBatch {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            skipped: Vec::new(),
        }
    }

    /// Appends a decoded entry.
    pub fn push(&mut self, position: usize, raw: RawRecord) {
        self.entries.push(DecodedEntry { position, raw });
    }

    /// Records a skipped entry and emits a warning.
    pub fn skip(&mut self, format: Format, position: usize, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(%format, position, reason = %reason, "Skipping entry");
        self.skipped.push(SkippedEntry { position, reason });
    }

    /// Total entries seen by the decoder, kept or skipped.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len() + self.skipped.len()
    }
}

/// Encoder/decoder pair for one file format.
///
/// Codecs are stateless; [`Format::codec`] hands out a shared instance.
///
/// # Errors
///
/// `decode` fails with [`crate::Error::CorruptFile`],
/// [`crate::Error::FormatMismatch`] or [`crate::Error::EmptyFile`] when the
/// file as a whole cannot be used. `encode` fails only on serializer errors.
pub trait FormatCodec: Send + Sync {
    /// The format this codec handles.
    fn format(&self) -> Format;

    /// Decodes file bytes into raw entries.
    fn decode(&self, bytes: &[u8]) -> Result<DecodedBatch>;

    /// Encodes records into file bytes.
    fn encode(&self, records: &[Record]) -> Result<Vec<u8>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_counts_skipped_entries() {
        let mut batch = DecodedBatch::new();
        batch.push(1, RawRecord::new("1", "Anne", "Here", "5"));
        batch.skip(Format::Csv, 2, "missing a field");

        assert_eq!(batch.entries.len(), 1);
        assert_eq!(batch.total(), 2);
        assert_eq!(batch.skipped[0].to_string(), "Record 2: missing a field");
    }
}
