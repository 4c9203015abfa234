//! Command implementations for the benchmark CLI.
//!
//! Each command module parses its arguments, runs the library operation, and
//! formats output according to the requested format. Fatal library errors are
//! reported on stderr and turned into an exit code here.

pub mod completions;
pub mod seed;
pub mod tokens;
pub mod validate;

use mcp_bench_core::cli::ExitCode;
use mcp_bench_seeder::Dataset;
use std::error::Error as _;
use std::path::Path;

/// Logs a fatal error with its source chain and picks the exit code.
pub(crate) fn report_failure(err: &mcp_bench_core::Error) -> ExitCode {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    tracing::error!(error = %message, "command failed");
    eprintln!("Error: {message}");
    ExitCode::for_error(err)
}

/// Bundled dataset, or the one at `path`.
pub(crate) fn load_dataset(path: Option<&Path>) -> mcp_bench_core::Result<Dataset> {
    path.map_or_else(Dataset::bundled, Dataset::from_path)
}
