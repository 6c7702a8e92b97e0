//! Upload and download services.
//!
//! [`Pipeline`] bundles both directions over one store; it is what the CLI
//! talks to.

pub mod convert;
pub mod download;
pub mod upload;

pub use convert::{ConvertResult, convert};
pub use download::{DownloadResult, DownloadService};
pub use upload::{UploadOptions, UploadResult, UploadService};

use crate::config::RecorderConfig;
use crate::storage::JsonFileStore;

/// Upload and download over a single store.
#[derive(Debug, Clone)]
pub struct Pipeline {
    upload: UploadService,
    download: DownloadService,
}

impl Pipeline {
    /// Creates a pipeline over the configured store.
    #[must_use]
    pub fn new(config: &RecorderConfig) -> Self {
        Self::with_store(JsonFileStore::from_config(config))
    }

    /// Creates a pipeline over an explicit store.
    #[must_use]
    pub fn with_store(store: JsonFileStore) -> Self {
        Self {
            upload: UploadService::new(store.clone()),
            download: DownloadService::new(store),
        }
    }

    /// Returns the upload direction.
    #[must_use]
    pub const fn upload(&self) -> &UploadService {
        &self.upload
    }

    /// Returns the download direction.
    #[must_use]
    pub const fn download(&self) -> &DownloadService {
        &self.download
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::formats::Format;
    use tempfile::TempDir;

    #[test]
    fn test_pipeline_shares_store() {
        let dir = TempDir::new().unwrap();
        let pipeline = Pipeline::with_store(JsonFileStore::new(dir.path().join("main.json")));

        pipeline
            .upload()
            .upload(
                Format::Json,
                br#"{"data_records": [{"id": "4", "name": "Toto", "address": "Leaf", "phone": "1"}]}"#,
            )
            .unwrap();
        let output = String::from_utf8(pipeline.download().download(Format::Csv).unwrap()).unwrap();
        assert!(output.contains("4,Toto,Leaf,1"));
    }
}
