//! Output formatters for CLI commands.
//!
//! `json` and `text` serialize a command's result for scripts; `pretty` is a
//! command-specific table, decorated with a few terminal colors.

use anyhow::Result;
use colored::Colorize;
use mcp_bench_core::cli::OutputFormat;
use serde::Serialize;

/// Format data according to the specified output format.
///
/// `table` renders the human-readable form and is only called for
/// [`OutputFormat::Pretty`].
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use mcp_bench_cli::formatters::format_output;
/// use mcp_bench_core::cli::OutputFormat;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Counts {
///     tokens: usize,
/// }
///
/// let counts = Counts { tokens: 42 };
/// let output = format_output(&counts, OutputFormat::Json, |c| format!("{} tokens", c.tokens))?;
/// assert!(output.contains("\"tokens\": 42"));
///
/// let output = format_output(&counts, OutputFormat::Pretty, |c| format!("{} tokens", c.tokens))?;
/// assert_eq!(output, "42 tokens");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_output<T: Serialize>(
    data: &T,
    format: OutputFormat,
    table: impl FnOnce(&T) -> String,
) -> Result<String> {
    match format {
        OutputFormat::Json => json::format(data),
        OutputFormat::Text => text::format(data),
        OutputFormat::Pretty => Ok(table(data)),
    }
}

/// JSON output formatting.
pub mod json {
    use super::{Result, Serialize};

    /// Format data as JSON.
    ///
    /// Uses pretty-printing with 2-space indentation.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string_pretty(data)?;
        Ok(json)
    }

    /// Format data as compact JSON (no formatting).
    pub fn format_compact<T: Serialize>(data: &T) -> Result<String> {
        let json = serde_json::to_string(data)?;
        Ok(json)
    }
}

/// Plain text output formatting.
pub mod text {
    use super::{Result, Serialize, json};

    /// Format data as plain text.
    ///
    /// Single-line JSON, suitable for piping to other commands or scripts.
    pub fn format<T: Serialize>(data: &T) -> Result<String> {
        json::format_compact(data)
    }
}

/// Pretty (human-readable) output helpers.
pub mod pretty {
    use super::Colorize;

    /// Bold section title followed by a rule of the same width.
    #[must_use]
    pub fn heading(title: &str) -> String {
        format!("{}\n{}", title.bold(), "=".repeat(title.chars().count()))
    }

    /// Colors `[OK]` markers green and `[FAIL]` markers red.
    #[must_use]
    pub fn status_marks(text: &str) -> String {
        text.replace("[OK]", &format!("[{}]", "OK".green()))
            .replace("[FAIL]", &format!("[{}]", "FAIL".red().bold()))
    }

    /// Dimmed informational line.
    #[must_use]
    pub fn note(text: &str) -> String {
        text.dimmed().to_string()
    }
}
