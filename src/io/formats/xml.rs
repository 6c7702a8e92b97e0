//! XML format adapter.
//!
//! Records are `<employee>` elements carrying the fields as attributes,
//! inside a `<data_records>` root:
//!
//! ```xml
//! <data_records>
//!   <employee id="1" name="Anne Rice" address="23 Vampire Ave" phone="66666666"/>
//! </data_records>
//! ```
//!
//! Encoding writes `\n`, `\r` and `\t` in attribute values as character
//! references so that other parsers do not normalize them to spaces.

use crate::io::formats::Format;
use crate::io::traits::{DecodedBatch, FormatCodec};
use crate::models::{RawRecord, Record};
use crate::{Error, Result};
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::{Reader, Writer};
use std::borrow::Cow;

const ROOT_TAG: &str = "data_records";
const ENTRY_TAG: &str = "employee";

/// XML codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

/// Reads the record attributes of an `<employee>` element.
fn read_attributes(element: &BytesStart<'_>) -> Result<RawRecord> {
    let mut raw = RawRecord::default();
    for attribute in element.attributes() {
        let attribute = attribute.map_err(|e| Format::Xml.corrupt(e))?;
        let value = attribute
            .unescape_value()
            .map_err(|e| Format::Xml.corrupt(e))?
            .into_owned();
        match attribute.key.as_ref() {
            b"id" => raw.id = Some(value),
            b"name" => raw.name = Some(value),
            b"address" => raw.address = Some(value),
            b"phone" => raw.phone = Some(value),
            _ => {},
        }
    }
    Ok(raw)
}

/// Escapes an attribute value, including whitespace that attribute value
/// normalization would otherwise turn into spaces.
fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in quick_xml::escape::escape(value).chars() {
        match c {
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Tracks where the reader is relative to the `<data_records>` root.
#[derive(Default)]
struct DecodeState {
    found_root: bool,
    root_depth: usize,
    employees: usize,
    batch: DecodedBatch,
}

impl DecodeState {
    fn on_element(&mut self, element: &BytesStart<'_>, has_children: bool) -> Result<()> {
        let name = element.name();
        if name.as_ref() == ROOT_TAG.as_bytes() {
            self.found_root = true;
            if has_children {
                self.root_depth += 1;
            }
        } else if self.root_depth > 0 && name.as_ref() == ENTRY_TAG.as_bytes() {
            self.employees += 1;
            let position = self.employees;
            let raw = read_attributes(element)?;
            if raw.id.is_some() {
                self.batch.push(position, raw);
            } else {
                self.batch.skip(Format::Xml, position, "employee without id attribute");
            }
        }
        Ok(())
    }

    fn on_end(&mut self, element: &BytesEnd<'_>) {
        if element.name().as_ref() == ROOT_TAG.as_bytes() {
            self.root_depth = self.root_depth.saturating_sub(1);
        }
    }
}

impl FormatCodec for XmlCodec {
    fn format(&self) -> Format {
        Format::Xml
    }

    fn decode(&self, bytes: &[u8]) -> Result<DecodedBatch> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();
        let mut state = DecodeState::default();

        loop {
            match reader
                .read_event_into(&mut buf)
                .map_err(|e| Format::Xml.corrupt(e))?
            {
                Event::Start(element) => state.on_element(&element, true)?,
                Event::Empty(element) => state.on_element(&element, false)?,
                Event::End(element) => state.on_end(&element),
                Event::Eof => break,
                _ => {},
            }
            buf.clear();
        }

        if !state.found_root {
            return Err(Format::Xml.mismatch("a <data_records> root element"));
        }
        if state.employees == 0 {
            return Err(Format::Xml.empty());
        }
        Ok(state.batch)
    }

    fn encode(&self, records: &[Record]) -> Result<Vec<u8>> {
        let mut writer = Writer::new(Vec::new());

        if records.is_empty() {
            writer
                .write_event(Event::Empty(BytesStart::new(ROOT_TAG)))
                .map_err(|e| Error::io("write_xml", e))?;
            return Ok(writer.into_inner());
        }

        writer
            .write_event(Event::Start(BytesStart::new(ROOT_TAG)))
            .map_err(|e| Error::io("write_xml", e))?;
        for record in records {
            let mut element = BytesStart::new(ENTRY_TAG);
            for (field, value) in record.fields() {
                element.push_attribute(Attribute {
                    key: QName(field.as_str().as_bytes()),
                    value: Cow::Owned(escape_attribute(value).into_bytes()),
                });
            }
            writer
                .write_event(Event::Empty(element))
                .map_err(|e| Error::io("write_xml", e))?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(ROOT_TAG)))
            .map_err(|e| Error::io("write_xml", e))?;

        Ok(writer.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_employees() {
        let input = br#"<?xml version="1.0" encoding="UTF-8"?>
<data_records>
    <employee id="1" name="Anne Rice" address="23 Vampire Ave NY 12512" phone="66666666"/>
    <employee id="56" name="Becky &amp; Co" address="Block 25 LA" phone="36553232"></employee>
</data_records>"#;
        let batch = XmlCodec.decode(input).unwrap();

        assert_eq!(batch.entries.len(), 2);
        assert_eq!(
            batch.entries[0].raw,
            RawRecord::new("1", "Anne Rice", "23 Vampire Ave NY 12512", "66666666")
        );
        assert_eq!(batch.entries[1].raw.name.as_deref(), Some("Becky & Co"));
        assert_eq!(batch.entries[1].position, 2);
    }

    #[test]
    fn test_decode_without_root_is_mismatch() {
        let input = br#"<records><employee id="1" name="Anne"/></records>"#;
        let err = XmlCodec.decode(input).unwrap_err();
        assert!(matches!(err, Error::FormatMismatch { .. }));
    }

    #[test]
    fn test_decode_root_without_employees_is_empty() {
        assert!(matches!(
            XmlCodec.decode(b"<data_records></data_records>").unwrap_err(),
            Error::EmptyFile { .. }
        ));
        assert!(matches!(
            XmlCodec.decode(b"<data_records/>").unwrap_err(),
            Error::EmptyFile { .. }
        ));
    }

    #[test]
    fn test_decode_skips_employee_without_id() {
        let input =
            br#"<data_records><employee name="No Id"/><employee id="2" name="Kept"/></data_records>"#;
        let batch = XmlCodec.decode(input).unwrap();

        assert_eq!(batch.entries.len(), 1);
        assert_eq!(batch.entries[0].position, 2);
        assert_eq!(batch.skipped.len(), 1);
        assert_eq!(batch.skipped[0].position, 1);
    }

    #[test]
    fn test_decode_mismatched_tags_is_corrupt() {
        let err = XmlCodec
            .decode(b"<data_records><employee id=\"1\"></data_records>")
            .unwrap_err();
        assert!(matches!(err, Error::CorruptFile { .. }));
    }

    #[test]
    fn test_encode_attributes_in_field_order() {
        let records = vec![Record::new("1", "Anne Rice", "23 Vampire Ave", "66666666")];
        let output = String::from_utf8(XmlCodec.encode(&records).unwrap()).unwrap();

        assert_eq!(
            output,
            concat!(
                r#"<data_records><employee id="1" name="Anne Rice" "#,
                r#"address="23 Vampire Ave" phone="66666666"/></data_records>"#
            )
        );
    }

    #[test]
    fn test_encode_escapes_newline_in_address() {
        let records = vec![Record::new("1", "A", "Line1\nLine2", "5")];
        let output = String::from_utf8(XmlCodec.encode(&records).unwrap()).unwrap();

        assert!(output.contains(r#"address="Line1&#10;Line2""#));
        assert!(!output.contains('\n'));

        let batch = XmlCodec.decode(output.as_bytes()).unwrap();
        assert_eq!(batch.entries[0].raw.address.as_deref(), Some("Line1\nLine2"));
        assert_eq!(Record::from(batch.entries[0].raw.clone()), records[0]);
    }

    #[test]
    fn test_escape_attribute() {
        assert_eq!(escape_attribute("a&b\r\n\t\"c\""), "a&amp;b&#13;&#10;&#9;&quot;c&quot;");
        assert_eq!(escape_attribute("plain"), "plain");
    }

    #[test]
    fn test_encode_empty() {
        let output = String::from_utf8(XmlCodec.encode(&[]).unwrap()).unwrap();
        assert_eq!(output, "<data_records/>");
    }

    #[test]
    fn test_roundtrip_through_decode() {
        let records = vec![
            Record::new("3", "Mary Kate", "22 Twins Ave", "2222"),
            Record::new("4", "Toto Ro", "The Banana Leaf", "3456"),
        ];
        let output = XmlCodec.encode(&records).unwrap();
        let decoded: Vec<Record> = XmlCodec
            .decode(&output)
            .unwrap()
            .entries
            .into_iter()
            .map(|e| Record::from(e.raw))
            .collect();
        assert_eq!(decoded, records);
    }
}
