//! YAML format adapter.
//!
//! Uploads expect `data_records` to map each id to its fields:
//!
//! ```yaml
//! data_records:
//!   1:
//!     name: Anne Rice
//!     address: 23 Vampire Ave
//!     phone: '66666666'
//! ```
//!
//! Downloads emit a sequence of single-key mappings instead:
//!
//! ```yaml
//! data_records:
//! - '1':
//!     name: Anne Rice
//!     address: 23 Vampire Ave
//!     phone: '66666666'
//! ```
//!
//! The download shape is accepted on upload as well, so a downloaded file
//! can be uploaded again.

use crate::io::formats::Format;
use crate::io::traits::{DecodedBatch, FormatCodec};
use crate::models::{RawRecord, Record, RecordField};
use crate::{Error, Result};
use serde_yaml_ng::{Mapping, Value};

const EXPECTED_LAYOUT: &str = "a top-level \"data_records\" mapping of id to name/address/phone";

/// YAML codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

/// Stringifies a scalar key or value.
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Decodes one `id -> fields` pair.
fn decode_entry(batch: &mut DecodedBatch, position: usize, key: &Value, fields: &Value) {
    let Some(id) = scalar_string(key) else {
        batch.skip(Format::Yaml, position, "missing id");
        return;
    };
    match serde_yaml_ng::from_value::<RawRecord>(fields.clone()) {
        Ok(mut raw) => {
            raw.id = Some(id);
            batch.push(position, raw);
        },
        Err(e) => batch.skip(Format::Yaml, position, format!("entry {id} is not a record: {e}")),
    }
}

impl FormatCodec for YamlCodec {
    fn format(&self) -> Format {
        Format::Yaml
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedBatch> {
        let content = std::str::from_utf8(bytes).map_err(|e| Format::Yaml.corrupt(e))?;
        if content.trim().is_empty() {
            return Err(Format::Yaml.empty());
        }

        let root: Value = serde_yaml_ng::from_str(content).map_err(|e| Format::Yaml.corrupt(e))?;
        let Some(data) = root.get("data_records") else {
            return Err(Format::Yaml.mismatch(EXPECTED_LAYOUT));
        };

        let mut batch = DecodedBatch::new();
        match data {
            Value::Null => return Err(Format::Yaml.empty()),
            Value::Mapping(entries) => {
                // Mapping iteration follows document order
                for (index, (key, fields)) in entries.iter().enumerate() {
                    decode_entry(&mut batch, index + 1, key, fields);
                }
            },
            Value::Sequence(items) => {
                for (index, item) in items.iter().enumerate() {
                    let position = index + 1;
                    match item.as_mapping() {
                        Some(single) if single.len() == 1 => {
                            if let Some((key, fields)) = single.iter().next() {
                                decode_entry(&mut batch, position, key, fields);
                            }
                        },
                        _ => batch.skip(
                            Format::Yaml,
                            position,
                            "expected a single id mapping to its fields",
                        ),
                    }
                }
            },
            _ => return Err(Format::Yaml.mismatch(EXPECTED_LAYOUT)),
        }

        if batch.total() == 0 {
            return Err(Format::Yaml.empty());
        }
        Ok(batch)
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let entries = records
            .iter()
            .map(|record| {
                let mut fields = Mapping::new();
                for field in &RecordField::all()[1..] {
                    fields.insert(
                        Value::String(field.as_str().to_string()),
                        Value::String(record.get(*field).to_string()),
                    );
                }
                let mut entry = Mapping::new();
                entry.insert(
                    Value::String(record.id().to_string()),
                    Value::Mapping(fields),
                );
                Value::Mapping(entry)
            })
            .collect();

        let mut root = Mapping::new();
        root.insert(
            Value::String("data_records".to_string()),
            Value::Sequence(entries),
        );

        serde_yaml_ng::to_string(&Value::Mapping(root))
            .map(String::into_bytes)
            .map_err(|e| Error::io("write_yaml", e))
    }
}
