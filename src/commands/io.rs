//! Upload, download and convert command handlers.

use std::path::Path;

use datarec::config::RecorderConfig;
use datarec::io::{Format, Pipeline, UploadOptions, UploadResult, convert};
use datarec::{Error, Result};

use super::{print_lines, print_warnings, warning_lines};

/// Parses an explicit `--format` value, if given.
fn parse_format(format: Option<&str>) -> Result<Option<Format>> {
    format.map(str::parse::<Format>).transpose()
}

/// Executes the upload command.
pub fn cmd_upload(
    config: &RecorderConfig,
    file: &Path,
    format: Option<&str>,
    dry_run: bool,
) -> Result<()> {
    let options = UploadOptions {
        format: parse_format(format)?,
        dry_run,
    };

    println!("Uploading data from: {}...", file.display());
    let pipeline = Pipeline::new(config);
    let result = pipeline.upload().upload_file(file, &options)?;

    print_lines(&upload_report(&result));
    Ok(())
}

/// Renders the upload summary followed by the skipped-entry warnings.
fn upload_report(result: &UploadResult) -> Vec<String> {
    let mut lines = if result.nothing_to_upload {
        vec!["Nothing to upload.".to_string()]
    } else {
        let heading = if result.dry_run {
            "Dry run completed (no changes made):"
        } else {
            "Upload completed:"
        };
        vec![
            String::new(),
            heading.to_string(),
            format!("  Uploaded:          {}", result.appended),
            format!("  Skipped (dupe):    {}", result.skipped_duplicates),
            format!("  Skipped (invalid): {}", result.skipped_invalid),
            format!("  Total in file:     {}", result.decoded),
        ]
    };
    lines.extend(warning_lines(&result.warnings));
    lines
}

/// Executes the download command.
pub fn cmd_download(config: &RecorderConfig, file: &Path, format: Option<&str>) -> Result<()> {
    println!("Downloading data to: {}...", file.display());
    let pipeline = Pipeline::new(config);
    let result = pipeline
        .download()
        .download_file(file, parse_format(format)?)?;

    println!();
    println!("Download completed:");
    println!("  Records: {}", result.records);
    println!("  Format:  {}", result.format);
    println!("  Output:  {}", result.output_path);
    Ok(())
}

/// Executes the convert command.
pub fn cmd_convert(
    source: &Path,
    target: &Path,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let from = match parse_format(from)? {
        Some(format) => format,
        None => Format::from_path(source)?,
    };
    let to = match parse_format(to)? {
        Some(format) => format,
        None => Format::from_path(target)?,
    };

    let bytes = std::fs::read(source).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::InvalidInput(format!("{} does not exist", source.display()))
        } else {
            Error::OperationFailed {
                operation: "read_convert_source".to_string(),
                cause: e.to_string(),
            }
        }
    })?;

    let result = convert(from, &bytes, to)?;
    std::fs::write(target, &result.output).map_err(|e| Error::OperationFailed {
        operation: "write_convert_target".to_string(),
        cause: e.to_string(),
    })?;

    println!(
        "Converted {} records from {from} to {to}: {}",
        result.records,
        target.display()
    );
    print_warnings(&result.warnings);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format(None).unwrap(), None);
        assert_eq!(parse_format(Some("YML")).unwrap(), Some(Format::Yaml));
        assert!(parse_format(Some("parquet")).is_err());
    }

    #[test]
    fn test_report_lists_warnings_when_nothing_uploaded() {
        let result = UploadResult {
            decoded: 2,
            skipped_invalid: 2,
            warnings: vec![
                "Record 1: expected 4 fields, found 2".to_string(),
                "Record 2: id has no digits".to_string(),
            ],
            nothing_to_upload: true,
            ..UploadResult::default()
        };

        let lines = upload_report(&result);

        assert_eq!(lines[0], "Nothing to upload.");
        assert!(lines.contains(&"Warnings (2):".to_string()));
        assert!(lines.contains(&"  - Record 1: expected 4 fields, found 2".to_string()));
        assert!(lines.contains(&"  - Record 2: id has no digits".to_string()));
    }

    #[test]
    fn test_report_summary_counts() {
        let result = UploadResult {
            decoded: 3,
            appended: 2,
            skipped_duplicates: 1,
            warnings: vec!["Duplicate ID 1 skipped".to_string()],
            dry_run: true,
            ..UploadResult::default()
        };

        let lines = upload_report(&result);

        assert_eq!(lines[1], "Dry run completed (no changes made):");
        assert_eq!(lines[2], "  Uploaded:          2");
        assert_eq!(lines.last().unwrap(), "  - Duplicate ID 1 skipped");
    }
}
