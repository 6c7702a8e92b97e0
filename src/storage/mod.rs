//! Record storage.
//!
//! The store is a single JSON document on disk, owned exclusively by
//! [`JsonFileStore`]. Nothing else in the crate reads or writes that file.

mod document;
mod json_store;

pub use document::StoreDocument;
pub use json_store::{AppendOutcome, Deduplicated, JsonFileStore, dedupe};
