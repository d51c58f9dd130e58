//! Integration tests for openseoul-dataset
//!
//! The scripted tests run offline. The live-portal test requires network
//! access and is marked #[ignore] by default; run with:
//! SEOUL_OPENAPI_URL=<dataset url> cargo test -p openseoul-dataset --test integration -- --ignored

use std::cell::RefCell;

use indicatif::ProgressBar;
use serde_json::{json, Value};
use tempfile::TempDir;

use openseoul_core::HttpError;
use openseoul_dataset::{collect_all, write_csv, PageSource, Status, SORT_COLUMN};

/// Serves a fixed script of responses in order.
struct Scripted(RefCell<Vec<Result<Value, HttpError>>>);

impl Scripted {
    fn new(responses: Vec<Result<Value, HttpError>>) -> Self {
        Self(RefCell::new(responses))
    }
}

impl PageSource for Scripted {
    fn fetch_page(&self, start: u64, end: u64) -> Result<Value, HttpError> {
        let mut responses = self.0.borrow_mut();
        if responses.is_empty() {
            panic!("unexpected fetch of {start}..={end}");
        }
        responses.remove(0)
    }
}

fn page(total: u64, quarters: &[&str]) -> Value {
    let rows: Vec<Value> = quarters
        .iter()
        .map(|q| json!({ "STDR_YYQU_CD": q, "TRDAR_CD": format!("D{q}"), "SELNG_AMT": 1000 }))
        .collect();
    json!({ "VwsmTrdarSelngQq": { "list_total_count": total, "row": rows } })
}

#[test]
fn fetch_then_export_round_trip() {
    let source = Scripted::new(vec![
        Ok(page(4, &["20242", "20234"])),
        Ok(page(4, &["20241", "20233"])),
    ]);
    let harvest = collect_all(&source, None, 2, &ProgressBar::hidden());
    assert_eq!(harvest.status, Status::Complete);
    assert_eq!(harvest.records.len(), 4);

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("sales.csv");
    assert!(write_csv(&harvest.records, &path).expect("export should succeed"));

    // BOM, then parseable CSV sorted by quarter code
    let bytes = std::fs::read(&path).expect("Should read file back");
    assert!(bytes.starts_with(b"\xef\xbb\xbf"));

    let mut reader = csv::Reader::from_reader(&bytes[3..]);
    let header: Vec<String> = reader
        .headers()
        .expect("Should have a header row")
        .iter()
        .map(String::from)
        .collect();
    assert!(header.contains(&SORT_COLUMN.to_string()));
    assert!(header.contains(&"TRDAR_CD".to_string()));
    assert!(header.contains(&"SELNG_AMT".to_string()));

    let quarter_idx = header.iter().position(|c| c == SORT_COLUMN).expect("sort column");
    let quarters: Vec<String> = reader
        .records()
        .map(|r| r.expect("row")[quarter_idx].to_string())
        .collect();
    assert_eq!(quarters, vec!["20233", "20234", "20241", "20242"]);
}

#[test]
fn partial_harvest_still_exports() {
    let source = Scripted::new(vec![
        Ok(page(6, &["20241", "20242"])),
        Err(HttpError {
            status: Some(500),
            message: "server error".to_string(),
        }),
    ]);
    let harvest = collect_all(&source, None, 2, &ProgressBar::hidden());
    assert_eq!(harvest.status, Status::Partial);
    assert_eq!(harvest.records.len(), 2);

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("partial.csv");
    assert!(write_csv(&harvest.records, &path).expect("export should succeed"));
    assert!(path.exists());
}

#[test]
fn failed_harvest_exports_nothing() {
    let source = Scripted::new(vec![Err(HttpError {
        status: Some(404),
        message: "not found".to_string(),
    })]);
    let harvest = collect_all(&source, None, 1000, &ProgressBar::hidden());
    assert_eq!(harvest.status, Status::Failed);

    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("failed.csv");
    assert!(!write_csv(&harvest.records, &path).expect("no-op export should succeed"));
    assert!(!path.exists());
}

/// Fetch a real dataset end to end.
/// Run with: SEOUL_OPENAPI_URL=<dataset url> cargo test -p openseoul-dataset --test integration -- --ignored
#[test]
#[ignore]
fn live_portal_fetch() {
    let base_url = match std::env::var("SEOUL_OPENAPI_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("SEOUL_OPENAPI_URL not set, skipping");
            return;
        }
    };

    let dir = TempDir::new().expect("Failed to create temp dir");
    let config = openseoul_dataset::Config {
        base_url,
        output_dir: dir.path().to_path_buf(),
        ..Default::default()
    };

    let summary = openseoul_dataset::run(
        &config,
        "live.csv",
        &openseoul_core::ProgressContext::new(),
    )
    .expect("Run should succeed");

    assert!(summary.fetched_records > 0);
    assert_eq!(summary.fetched_records as u64, summary.expected_records);
    assert!(summary.written.is_some());
}
