//! Data models for datarec.
//!
//! This module contains the record value type and its field catalogue.

mod field;
mod record;

pub use field::RecordField;
pub use record::{RawRecord, Record, sanitize_address, sanitize_digits, sanitize_name};
