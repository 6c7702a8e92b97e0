//! CSV format adapter.
//!
//! The first row must be the header `id,name,address,phone`. Header cells
//! are compared case-insensitively after stripping quotes and whitespace.

use crate::io::formats::Format;
use crate::io::traits::{DecodedBatch, FormatCodec};
use crate::models::{RawRecord, Record, RecordField};
use crate::{Error, Result};

const EXPECTED_HEADER: &str = "a header row of id,name,address,phone";

/// CSV codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

/// Checks a header row against the canonical field names.
fn header_matches(header: &csv::StringRecord) -> bool {
    let names = RecordField::names();
    header.len() == names.len()
        && header
            .iter()
            .zip(names)
            .all(|(cell, name)| cell.replace('"', "").trim().to_lowercase() == name)
}

impl FormatCodec for CsvCodec {
    fn format(&self) -> Format {
        Format::Csv
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedBatch> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // Row width is checked per row
            .trim(csv::Trim::All)
            .from_reader(bytes);
        let mut rows = reader.records();

        let header = match rows.next() {
            None => return Err(Format::Csv.empty()),
            Some(header) => header.map_err(|e| Format::Csv.corrupt(e))?,
        };
        if !header_matches(&header) {
            return Err(Format::Csv.mismatch(EXPECTED_HEADER));
        }

        let mut batch = DecodedBatch::new();
        for (index, row) in rows.enumerate() {
            let row = row.map_err(|e| Format::Csv.corrupt(e))?;
            let position = index + 1;
            if row.len() != RecordField::all().len() {
                batch.skip(
                    Format::Csv,
                    position,
                    format!("expected 4 fields, found {}", row.len()),
                );
                continue;
            }
            batch.push(position, RawRecord::new(&row[0], &row[1], &row[2], &row[3]));
        }

        if batch.total() == 0 {
            return Err(Format::Csv.empty());
        }
        Ok(batch)
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false) // We write headers manually
            .from_writer(Vec::new());

        writer
            .write_record(RecordField::names())
            .map_err(|e| Error::io("write_csv_headers", e))?;
        for record in records {
            writer
                .write_record(record.values())
                .map_err(|e| Error::io("write_csv", e))?;
        }

        writer.into_inner().map_err(|e| Error::io("flush_csv", e))
    }
}
