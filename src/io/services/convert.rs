//! File-to-file conversion.
//!
//! Runs the upload validation on the source and encodes the result in the
//! target format. The store is never touched.

use crate::io::formats::Format;
use crate::io::validation::RecordValidator;
use crate::storage::dedupe;
use crate::Result;
use tracing::{info, warn};

/// Result of a conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertResult {
    /// Encoded output.
    pub output: Vec<u8>,
    /// Records written to the output.
    pub records: usize,
    /// One line per entry left out.
    pub warnings: Vec<String>,
}

/// Converts file bytes from one format to another.
///
/// Entries without a usable id are dropped, and so are later entries that
/// repeat an id.
///
/// # Errors
///
/// Returns the decode error of the source format, or an encoding error.
pub fn convert(from: Format, bytes: &[u8], to: Format) -> Result<ConvertResult> {
    let batch = from.codec().decode(bytes)?;
    let validator = RecordValidator::new();

    let mut warnings: Vec<String> = batch.skipped.iter().map(ToString::to_string).collect();
    let mut records = Vec::with_capacity(batch.entries.len());
    for entry in &batch.entries {
        let validation = validator.validate(&entry.raw);
        match validation.error_message() {
            Some(message) => {
                warn!(
                    format = %from,
                    position = entry.position,
                    reason = message,
                    "Skipping entry"
                );
                warnings.push(format!("Record {}: {message}", entry.position));
            },
            None => records.push(validation.record),
        }
    }

    let deduped = dedupe(&[], records);
    warnings.extend(
        deduped
            .duplicate_ids
            .iter()
            .map(|id| format!("Duplicate ID {id} skipped")),
    );

    let output = to.codec().encode(&deduped.accepted)?;
    info!(%from, %to, records = deduped.accepted.len(), "Conversion complete");
    Ok(ConvertResult {
        output,
        records: deduped.accepted.len(),
        warnings,
    })
}
