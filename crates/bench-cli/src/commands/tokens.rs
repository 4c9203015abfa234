//! Token accounting command.
//!
//! Scans the response corpus, prints the detail and comparison tables, and
//! exports the rows to CSV.

use crate::formatters::{format_output, pretty};
use anyhow::Result;
use mcp_bench_core::cli::{ExitCode, OutputFormat};
use mcp_bench_tokens::export::{DEFAULT_CSV_NAME, export_csv};
use mcp_bench_tokens::{ScanOptions, TiktokenCounter, TokenCounter, TokenReport, scan};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments of the `tokens` subcommand.
#[derive(Debug, Clone)]
pub struct TokensArgs {
    /// Explicit corpus root
    pub root: Option<PathBuf>,
    /// Directory searched when no root is given
    pub base: PathBuf,
    /// CSV destination
    pub output: Option<PathBuf>,
    /// Tokenizer encoding
    pub encoding: String,
    /// Subdirectory excluded from toolkit discovery
    pub reserved: String,
    /// Skip the CSV export
    pub no_export: bool,
}

/// Report plus where the CSV went.
#[derive(Debug, Serialize)]
pub struct TokensOutput {
    /// Scan results and comparison
    #[serde(flatten)]
    pub report: TokenReport,
    /// CSV destination, if exported
    pub csv_path: Option<PathBuf>,
}

/// Runs the tokens command.
pub async fn run(args: TokensArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let output = match execute(&args) {
        Ok(output) => output,
        Err(err) => return Ok(super::report_failure(&err)),
    };

    let rendered = format_output(&output, output_format, render)?;
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

/// Scans, reports, and exports without printing.
///
/// # Errors
///
/// Fails if the root cannot be found, the encoding cannot be loaded, the
/// corpus is empty, or the CSV cannot be written.
pub fn execute(args: &TokensArgs) -> mcp_bench_core::Result<TokensOutput> {
    let mut options = match &args.root {
        Some(root) => ScanOptions::new(root),
        None => ScanOptions::discover(&args.base)?,
    };
    options.encoding.clone_from(&args.encoding);
    options.reserved_dir.clone_from(&args.reserved);
    info!(root = %options.root.display(), encoding = %options.encoding, "counting tokens");

    let counter = TiktokenCounter::new(&options.encoding)?;
    let results = scan::scan(&options, &counter)?;
    let report = TokenReport::new(counter.name(), results);

    let csv_path = if args.no_export {
        None
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_csv_path(&options.root));
        export_csv(&path, &report.results)?;
        Some(path)
    };

    Ok(TokensOutput { report, csv_path })
}

/// `<root parent>/token-counts-verified.csv`.
#[must_use]
pub fn default_csv_path(root: &Path) -> PathBuf {
    root.parent().unwrap_or(root).join(DEFAULT_CSV_NAME)
}

fn render(output: &TokensOutput) -> String {
    let mut text = pretty::heading(&format!(
        "Token counts ({})",
        output.report.encoding
    ));
    text.push_str("\n\n");
    text.push_str(&output.report.render());
    if let Some(path) = &output.csv_path {
        text.push('\n');
        text.push_str(&pretty::note(&format!("CSV written to {}", path.display())));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(base: &Path) -> TokensArgs {
        TokensArgs {
            root: None,
            base: base.to_path_buf(),
            output: None,
            encoding: "cl100k_base".to_string(),
            reserved: "schemas".to_string(),
            no_export: false,
        }
    }

    fn corpus() -> TempDir {
        let temp = TempDir::new().unwrap();
        let raw = temp.path().join("raw");
        fs::create_dir_all(raw.join("arcade")).unwrap();
        fs::create_dir_all(raw.join("composio")).unwrap();
        fs::write(raw.join("arcade/01_list.json"), r#"[{"a":1}]"#).unwrap();
        fs::write(
            raw.join("composio/01_list.json"),
            r#"{"data":[{"a":1,"b":{"c":[1,2,3]}}],"meta":{"cursor":null}}"#,
        )
        .unwrap();
        temp
    }

    #[test]
    fn test_execute_writes_default_csv() {
        let temp = corpus();
        let output = execute(&args(temp.path())).unwrap();

        assert_eq!(output.report.results.len(), 2);
        let csv = output.csv_path.unwrap();
        assert_eq!(csv, temp.path().join(DEFAULT_CSV_NAME));
        assert!(csv.exists());
    }

    #[test]
    fn test_execute_without_export() {
        let temp = corpus();
        let mut args = args(temp.path());
        args.no_export = true;

        let output = execute(&args).unwrap();
        assert!(output.csv_path.is_none());
        assert!(!temp.path().join(DEFAULT_CSV_NAME).exists());
    }

    #[test]
    fn test_missing_root_maps_to_not_found() {
        let temp = TempDir::new().unwrap();
        let err = execute(&args(temp.path())).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(ExitCode::for_error(&err), ExitCode::ERROR);
    }

    #[test]
    fn test_unknown_encoding_is_invalid_input() {
        let temp = corpus();
        let mut args = args(temp.path());
        args.encoding = "nope".to_string();

        let err = execute(&args).unwrap_err();
        assert_eq!(ExitCode::for_error(&err), ExitCode::INVALID_INPUT);
    }

    #[test]
    fn test_json_output_shape() {
        let temp = corpus();
        let output = execute(&args(temp.path())).unwrap();
        let json: serde_json::Value = serde_json::to_value(&output).unwrap();

        assert_eq!(json["encoding"], "cl100k_base");
        assert_eq!(json["results"].as_array().unwrap().len(), 2);
        assert_eq!(json["comparison"]["toolkits"][0], "arcade");
        assert!(json["csv_path"].is_string());
    }

    #[test]
    fn test_pretty_render_mentions_csv() {
        let temp = corpus();
        let output = execute(&args(temp.path())).unwrap();
        let rendered = render(&output);
        let text = console::strip_ansi_codes(&rendered);

        assert!(text.starts_with("Token counts (cl100k_base)"));
        assert!(text.contains("Comparison Summary"));
        assert!(text.contains("CSV written to"));
    }

    #[test]
    fn test_default_csv_path() {
        assert_eq!(
            default_csv_path(Path::new("/data/raw")),
            PathBuf::from("/data/token-counts-verified.csv")
        );
    }
}
