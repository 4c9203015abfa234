//! Dataset coverage command.
//!
//! Evaluates the scenario coverage checks the `seed` command gates on, with
//! no credential and no network access.

use crate::formatters::{format_output, pretty};
use anyhow::Result;
use mcp_bench_core::cli::{ExitCode, OutputFormat};
use mcp_bench_seeder::CoverageReport;
use std::path::Path;

/// Runs the validate command.
///
/// Exits with [`ExitCode::INVALID_INPUT`] when any check fails.
pub async fn run(dataset: Option<&Path>, output_format: OutputFormat) -> Result<ExitCode> {
    let report = match super::load_dataset(dataset) {
        Ok(dataset) => CoverageReport::evaluate(&dataset),
        Err(err) => return Ok(super::report_failure(&err)),
    };

    let rendered = format_output(&report, output_format, |r| pretty::status_marks(&r.render()))?;
    println!("{rendered}");

    Ok(if report.passed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::INVALID_INPUT
    })
}
