//! Integration tests for datarec.
//!
//! End-to-end scenarios through the public API: upload, download, add and
//! search against a store in a temporary directory.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use datarec::config::RecorderConfig;
use datarec::io::{Format, Pipeline, UploadOptions};
use datarec::models::{Record, RecordField};
use datarec::services::{AddService, SearchService};
use datarec::storage::JsonFileStore;
use datarec::{Error, RawRecord};
use std::fs;
use tempfile::TempDir;
use test_case::test_case;

fn setup() -> (TempDir, RecorderConfig) {
    let dir = TempDir::new().unwrap();
    let config = RecorderConfig::default().with_store_path(dir.path().join("main.json"));
    (dir, config)
}

fn stored(config: &RecorderConfig) -> Vec<Record> {
    JsonFileStore::from_config(config)
        .load_all()
        .unwrap()
        .data_records
}

const ANNE_CSV: &str = "id,name,address,phone\n\
                        1,Anne Rice,\"23 Vampire Ave, NY-12512\",dgj66666666dgjf\n";

#[test]
fn test_csv_upload_sanitizes_fields() {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);

    let result = pipeline
        .upload()
        .upload(Format::Csv, ANNE_CSV.as_bytes())
        .unwrap();
    assert_eq!(result.appended, 1);

    let records = stored(&config);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), "1");
    assert_eq!(records[0].name(), "Anne Rice");
    assert_eq!(records[0].address(), "23 Vampire Ave  NY 12512");
    assert_eq!(records[0].phone(), "66666666");
}

#[test]
fn test_second_upload_with_same_id_is_skipped() {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);
    pipeline
        .upload()
        .upload(Format::Csv, ANNE_CSV.as_bytes())
        .unwrap();

    let again =
        br#"{"data_records": [{"id": "1", "name": "Someone Else", "address": "X", "phone": "1"}]}"#;
    let result = pipeline.upload().upload(Format::Json, again).unwrap();

    assert_eq!(result.appended, 0);
    assert_eq!(result.skipped_duplicates, 1);
    let records = stored(&config);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name(), "Anne Rice");
}

#[test]
fn test_xml_without_root_does_not_touch_store() {
    let (_dir, config) = setup();
    let pipeline = Pipeline::new(&config);
    pipeline
        .upload()
        .upload(Format::Csv, ANNE_CSV.as_bytes())
        .unwrap();
    let before = fs::read(&config.store_path).unwrap();

    let err = pipeline
        .upload()
        .upload(
            Format::Xml,
            br#"<employees><employee id="2" name="Becky"/></employees>"#,
        )
        .unwrap_err();

    assert!(matches!(err, Error::FormatMismatch { .. }));
    assert_eq!(fs::read(&config.store_path).unwrap(), before);
}

#[test]
fn test_empty_store_downloads_header_only_csv() {
    let (dir, config) = setup();
    let pipeline = Pipeline::new(&config);
    let out = dir.path().join("out.csv");

    let result = pipeline.download().download_file(&out, None).unwrap();

    assert_eq!(result.records, 0);
    let content = fs::read_to_string(&out).unwrap();
    assert_eq!(content.lines().collect::<Vec<_>>(), ["id,name,address,phone"]);
}

#[test]
fn test_corrupt_store_aborts_upload() {
    let (_dir, config) = setup();
    fs::write(&config.store_path, "{\"data_records\": [").unwrap();

    let err = Pipeline::new(&config)
        .upload()
        .upload(Format::Csv, ANNE_CSV.as_bytes())
        .unwrap_err();

    assert!(matches!(err, Error::CorruptStore { .. }));
    assert_eq!(
        fs::read_to_string(&config.store_path).unwrap(),
        "{\"data_records\": ["
    );
}

#[test]
fn test_empty_upload_is_warning() {
    let (_dir, config) = setup();
    let err = Pipeline::new(&config)
        .upload()
        .upload(Format::Csv, b"id,name,address,phone\n")
        .unwrap_err();

    assert!(err.is_warning());
    assert!(stored(&config).is_empty());
}

#[test]
fn test_all_invalid_upload_still_reports_each_entry() {
    let (_dir, config) = setup();
    let result = Pipeline::new(&config)
        .upload()
        .upload(Format::Csv, b"id,name,address,phone\n1,Anne\nabc,No Digits,X,1\n")
        .unwrap();

    assert!(result.nothing_to_upload);
    assert_eq!(result.skipped_invalid, 2);
    assert_eq!(result.warnings.len(), 2);
    assert!(result.warnings[0].starts_with("Record 1:"));
    assert!(result.warnings[1].starts_with("Record 2:"));
}

#[test_case("json", r#"{"data_records": [{"id": "7", "name": "Toto Ro", "address": "The Banana Leaf", "phone": "3456"}]}"#; "json")]
#[test_case("csv", "id,name,address,phone\n7,Toto Ro,The Banana Leaf,3456\n"; "csv")]
#[test_case("yaml", "data_records:\n  7:\n    name: Toto Ro\n    address: The Banana Leaf\n    phone: '3456'\n"; "yaml")]
#[test_case("xml", r#"<data_records><employee id="7" name="Toto Ro" address="The Banana Leaf" phone="3456"/></data_records>"#; "xml")]
fn test_upload_file_each_format(extension: &str, content: &str) {
    let (dir, config) = setup();
    let path = dir.path().join(format!("upload.{extension}"));
    fs::write(&path, content).unwrap();

    let result = Pipeline::new(&config)
        .upload()
        .upload_file(&path, &UploadOptions::default())
        .unwrap();

    assert_eq!(result.appended, 1);
    assert_eq!(
        stored(&config),
        [Record::new("7", "Toto Ro", "The Banana Leaf", "3456")]
    );
}

#[test_case(Format::Json; "json")]
#[test_case(Format::Csv; "csv")]
#[test_case(Format::Yaml; "yaml")]
#[test_case(Format::Xml; "xml")]
fn test_download_then_upload_into_fresh_store(format: Format) {
    let (_dir, config) = setup();
    let source = Pipeline::new(&config);
    source
        .upload()
        .upload(
            Format::Csv,
            b"id,name,address,phone\n3,Mary Kate,22 Twins Ave,2222\n4,Toto Ro,The Banana Leaf,3456\n",
        )
        .unwrap();
    let bytes = source.download().download(format).unwrap();

    let (_other_dir, other) = setup();
    let result = Pipeline::new(&other)
        .upload()
        .upload(format, &bytes)
        .unwrap();

    assert_eq!(result.appended, 2);
    assert_eq!(stored(&other), stored(&config));
}

#[test]
fn test_yaml_upload_keeps_document_order() {
    let (_dir, config) = setup();
    let yaml = "data_records:\n  56:\n    name: Becky\n    address: Block 25\n    phone: 1\n  1:\n    name: Anne\n    address: Here\n    phone: 2\n";

    Pipeline::new(&config)
        .upload()
        .upload(Format::Yaml, yaml.as_bytes())
        .unwrap();

    let ids: Vec<String> = stored(&config)
        .iter()
        .map(|r| r.id().to_string())
        .collect();
    assert_eq!(ids, ["56", "1"]);
}

#[test]
fn test_add_then_search() {
    let (_dir, config) = setup();
    let add = AddService::from_config(&config.clone().with_capacity(3));

    add.add(vec![
        RawRecord::new("1", "Anne Rice", "23 Vampire Ave", "66666666"),
        RawRecord::new("2", "Becky", "Block 25 LA", "36553232"),
    ])
    .unwrap();
    assert_eq!(add.remaining().unwrap(), 1);

    let search = SearchService::from_config(&config);
    let found = search.search(RecordField::Address, "vampire").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), "1");

    let err = add
        .add(vec![
            RawRecord::new("3", "C", "D", "1"),
            RawRecord::new("4", "E", "F", "2"),
        ])
        .unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded { .. }));
}
