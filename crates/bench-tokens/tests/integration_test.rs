//! End-to-end tests for the token reporter over on-disk corpora.

use mcp_bench_tokens::export::{export_csv, read_csv};
use mcp_bench_tokens::scan::{RESERVED_DIR, scan};
use mcp_bench_tokens::{ScanOptions, TiktokenCounter, TokenCounter, TokenReport};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Builds a small corpus resembling captured CRM tool responses.
fn corpus() -> TempDir {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("data").join("raw");

    write(
        &root,
        "arcade/01_list_companies.json",
        r#"[{"name":"Apple Inc.","domain":"apple.com"},{"name":"Intel","domain":"intel.com"}]"#,
    );
    write(
        &root,
        "composio/01_list_companies.json",
        r#"{"data":[{"id":{"record_id":"a1"},"values":{"name":[{"value":"Apple Inc."}],"domains":[{"domain":"apple.com"}],"description":[{"value":"Consumer electronics, software, and services company."}]}},{"id":{"record_id":"b2"},"values":{"name":[{"value":"Intel"}],"domains":[{"domain":"intel.com"}],"description":[{"value":"Semiconductor manufacturer producing processors."}]}}]}"#,
    );
    write(&root, "composio/08_highest_value_deal.json", r#"{"name":"Berkshire","value":480000}"#);
    write(&root, "arcade/99_error.json", "upstream timeout");
    write(&root, &format!("{RESERVED_DIR}/company.json"), r#"{"type":"object"}"#);

    temp
}

#[test]
fn test_full_report_over_corpus() {
    let temp = corpus();
    let options = ScanOptions::discover(temp.path()).unwrap();
    let counter = TiktokenCounter::new(&options.encoding).unwrap();

    let results = scan(&options, &counter).unwrap();
    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.toolkit.as_str() != RESERVED_DIR));

    let arcade = &results[0];
    assert_eq!(arcade.toolkit.as_str(), "arcade");
    assert_eq!(arcade.scenario.as_str(), "01_list_companies");
    assert_eq!((arcade.records, arcade.fields_per_record), (2, 2));

    let error_row = &results[1];
    assert_eq!(error_row.scenario.as_str(), "99_error");
    assert_eq!((error_row.records, error_row.fields_per_record), (0, 0));
    assert_eq!(error_row.bytes, "upstream timeout".len());

    let envelope = &results[2];
    assert_eq!((envelope.records, envelope.fields_per_record), (2, 2));

    let mapping = &results[3];
    assert_eq!((mapping.records, mapping.fields_per_record), (1, 2));

    let report = TokenReport::new(counter.name(), results);
    let row = report.comparison.row("01_list_companies").unwrap();
    let ratio = row.ratio().unwrap();
    assert!(ratio > 1.0, "envelope response should cost more tokens");
    assert!(report.comparison.row("08_highest_value_deal").unwrap().ratio().is_none());

    let rendered = report.render();
    assert!(rendered.contains("Comparison Summary"));
    assert!(rendered.contains("01_list_companies"));
}

#[test]
fn test_token_counts_are_stable_across_runs() {
    let temp = corpus();
    let options = ScanOptions::discover(temp.path()).unwrap();
    let counter = TiktokenCounter::new(&options.encoding).unwrap();

    let first = scan(&options, &counter).unwrap();
    let second = scan(&options, &counter).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_csv_export_round_trips_every_row() {
    let temp = corpus();
    let options = ScanOptions::discover(temp.path()).unwrap();
    let counter = TiktokenCounter::new(&options.encoding).unwrap();
    let results = scan(&options, &counter).unwrap();

    let csv_path = temp.path().join("data").join("token-counts-verified.csv");
    export_csv(&csv_path, &results).unwrap();

    let restored = read_csv(&csv_path).unwrap();
    assert_eq!(restored, results);
    assert_eq!(restored[0].file, "raw/arcade/01_list_companies.json");
}
