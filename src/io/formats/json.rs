//! JSON format adapter.
//!
//! Uploads and downloads use the same shape as the backing store:
//! `{"data_records": [{"id": .., "name": .., "address": .., "phone": ..}]}`.

use crate::io::formats::Format;
use crate::io::traits::{DecodedBatch, FormatCodec};
use crate::models::{RawRecord, Record};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;

const EXPECTED_LAYOUT: &str = "a top-level object with a \"data_records\" array";

/// Borrowed view of a store document, used for encoding.
#[derive(Serialize)]
struct DocumentView<'a> {
    data_records: &'a [Record],
}

/// Serializes a value as JSON indented by four spaces, with a trailing newline.
pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| Error::io("write_json", e))?;
    out.push(b'\n');
    Ok(out)
}

/// JSON codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl FormatCodec for JsonCodec {
    fn format(&self) -> Format {
        Format::Json
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedBatch> {
        let value: Value = serde_json::from_slice(bytes).map_err(|e| Format::Json.corrupt(e))?;
        let Value::Object(mut root) = value else {
            return Err(Format::Json.mismatch(EXPECTED_LAYOUT));
        };

        let items = match root.remove("data_records") {
            None | Some(Value::Null) => return Err(Format::Json.empty()),
            Some(Value::Array(items)) => items,
            Some(_) => return Err(Format::Json.mismatch(EXPECTED_LAYOUT)),
        };
        if items.is_empty() {
            return Err(Format::Json.empty());
        }

        let mut batch = DecodedBatch::new();
        for (index, item) in items.into_iter().enumerate() {
            let position = index + 1;
            match serde_json::from_value::<RawRecord>(item) {
                Ok(raw) if raw.id.is_some() => batch.push(position, raw),
                Ok(_) => batch.skip(Format::Json, position, "missing id"),
                Err(e) => batch.skip(Format::Json, position, format!("not a record: {e}")),
            }
        }

        Ok(batch)
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        to_pretty_json(&DocumentView {
            data_records: records,
        })
    }
}
