//! Format adapters for upload/download.
//!
//! Each format implements [`FormatCodec`]. [`Format::codec`] is the only
//! place a format tag is turned into behaviour.

pub mod csv;
pub mod json;
pub mod xml;
pub mod yaml;

use crate::{Error, Result};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::traits::FormatCodec;

/// Supported file formats for upload/download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON document with a `data_records` array.
    Json,
    /// CSV with an `id,name,address,phone` header.
    Csv,
    /// YAML document with a `data_records` key.
    Yaml,
    /// XML with a `<data_records>` root of `<employee>` elements.
    Xml,
}

impl Format {
    /// Returns all supported formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Json, Self::Csv, Self::Yaml, Self::Xml]
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
            Self::Yaml => "yaml",
            Self::Xml => "xml",
        }
    }

    /// Returns the codec for this format.
    #[must_use]
    pub fn codec(self) -> &'static dyn FormatCodec {
        match self {
            Self::Json => &json::JsonCodec,
            Self::Csv => &csv::CsvCodec,
            Self::Yaml => &yaml::YamlCodec,
            Self::Xml => &xml::XmlCodec,
        }
    }

    /// Detects format from file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is missing or not supported.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match ext.as_deref() {
            Some(ext) => ext.parse::<Self>().map_err(|_| {
                Error::InvalidInput(format!(
                    "Unsupported file extension: .{ext} (supported: {})",
                    supported_list()
                ))
            }),
            None => Err(Error::InvalidInput(format!(
                "Cannot determine format: {} has no extension",
                path.display()
            ))),
        }
    }

    pub(crate) fn corrupt(self, cause: impl fmt::Display) -> Error {
        Error::CorruptFile {
            format: self.to_string(),
            cause: cause.to_string(),
        }
    }

    pub(crate) fn mismatch(self, expected: &str) -> Error {
        Error::FormatMismatch {
            format: self.to_string(),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn empty(self) -> Error {
        Error::EmptyFile {
            format: self.to_string(),
        }
    }
}

fn supported_list() -> String {
    Format::all()
        .iter()
        .map(Format::extension)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().trim_start_matches('.').to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            "yaml" | "yml" => Ok(Self::Yaml),
            "xml" => Ok(Self::Xml),
            _ => Err(Error::InvalidInput(format!(
                "Unknown format: {s} (supported: {})",
                supported_list()
            ))),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
