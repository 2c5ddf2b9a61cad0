// tests/export_csv.rs
use std::fs;
use std::path::PathBuf;

use az_cost::config::options::{ExportFormat, ExportOptions};
use az_cost::file;

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("az_cost_e2e_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn owned(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[test]
fn writes_summary_csv_with_headers() {
    let dir = tmp_dir("summary");
    let mut export = ExportOptions::default();
    export.set_path(dir.join("cost.csv").to_str().unwrap());

    let headers = owned(&["Region", "SKU", "Total Cost ($)"]);
    let rows = vec![owned(&["eastus", "Standard_B2s", "1.02"])];

    let path = file::write_export(&export, Some(headers.as_slice()), &rows).unwrap();
    assert!(path.to_string_lossy().ends_with("cost.csv"));

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "Region,SKU,Total Cost ($)\neastus,Standard_B2s,1.02\n");
}

#[test]
fn extension_follows_format() {
    let dir = tmp_dir("format");
    let mut export = ExportOptions::default();
    export.set_path(dir.join("cost.csv").to_str().unwrap());
    export.format = ExportFormat::Tsv;

    let headers = owned(&["a", "b"]);
    let rows = vec![owned(&["1", "2"])];

    let path = file::write_export(&export, Some(headers.as_slice()), &rows).unwrap();
    assert!(path.to_string_lossy().ends_with("cost.tsv"));

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "a\tb\n1\t2\n");
}

#[test]
fn header_row_can_be_omitted() {
    let dir = tmp_dir("no_headers");
    let mut export = ExportOptions::default();
    export.set_path(dir.join("bare.csv").to_str().unwrap());
    export.include_headers = false;

    let headers = owned(&["a", "b"]);
    let rows = vec![owned(&["1", "2"])];

    let path = file::write_export(&export, Some(headers.as_slice()), &rows).unwrap();
    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, "1,2\n");
}

#[test]
fn creates_missing_parent_directories() {
    let dir = tmp_dir("nested");
    let mut export = ExportOptions::default();
    export.set_path(dir.join("deep/out.csv").to_str().unwrap());

    let rows = vec![owned(&["x"])];
    let path = file::write_export(&export, None, &rows).unwrap();
    assert!(path.exists());
}
