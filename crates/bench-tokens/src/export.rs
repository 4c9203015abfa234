//! CSV export of scan results.

use crate::scan::ScenarioResult;
use mcp_bench_core::{Error, Result};
use std::path::Path;

/// Column order of the exported file.
pub const CSV_HEADER: [&str; 7] = [
    "scenario",
    "toolkit",
    "tokens",
    "bytes",
    "records",
    "fields_per_record",
    "file",
];

/// File name used next to the corpus root when no destination is given.
pub const DEFAULT_CSV_NAME: &str = "token-counts-verified.csv";

/// Writes one row per result, replacing any existing file.
///
/// # Errors
///
/// Returns [`Error::ExportError`] if the file cannot be created or written.
pub fn export_csv(path: &Path, results: &[ScenarioResult]) -> Result<()> {
    let export_err = |message: String| Error::ExportError {
        path: path.to_path_buf(),
        message,
    };

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| export_err(e.to_string()))?;
    // Header written by hand so an empty slice still produces a valid file.
    writer
        .write_record(CSV_HEADER)
        .map_err(|e| export_err(e.to_string()))?;
    for result in results {
        writer
            .serialize(result)
            .map_err(|e| export_err(e.to_string()))?;
    }
    writer.flush().map_err(|e| export_err(e.to_string()))?;

    tracing::info!(path = %path.display(), rows = results.len(), "wrote CSV");
    Ok(())
}

/// Reads a file produced by [`export_csv`].
///
/// # Errors
///
/// Returns [`Error::ExportError`] if the file cannot be opened or a row does
/// not match the expected columns.
pub fn read_csv(path: &Path) -> Result<Vec<ScenarioResult>> {
    let export_err = |message: String| Error::ExportError {
        path: path.to_path_buf(),
        message,
    };

    let mut reader = csv::Reader::from_path(path).map_err(|e| export_err(e.to_string()))?;
    let header = reader.headers().map_err(|e| export_err(e.to_string()))?;
    if header.iter().ne(CSV_HEADER) {
        return Err(export_err(format!("unexpected header: {header:?}")));
    }

    reader
        .deserialize()
        .map(|row| row.map_err(|e| export_err(e.to_string())))
        .collect()
}
