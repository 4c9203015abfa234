//! MCP toolkit benchmark CLI.
//!
//! # Architecture
//!
//! The CLI is organized around subcommands:
//! - `tokens` - Count tokens in captured toolkit responses
//! - `seed` - Seed the CRM sandbox workspace
//! - `validate` - Check dataset coverage offline
//! - `completions` - Generate shell completions
//!
//! # Examples
//!
//! ```bash
//! # Token table, comparison, and CSV for ./data/raw
//! mcp-bench tokens
//!
//! # Seed the sandbox
//! ATTIO_API_KEY=... mcp-bench seed
//! ```

use anyhow::Result;
use clap::Parser;
use mcp_bench_cli::Cli;
use mcp_bench_cli::runner::{execute_command, init_logging};
use mcp_bench_core::cli::OutputFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let output_format = cli
        .format
        .parse::<OutputFormat>()
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    let exit_code = execute_command(cli.command, output_format).await?;

    std::process::exit(exit_code.as_i32());
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap_complete::Shell;
    use mcp_bench_cli::Commands;
    use std::path::PathBuf;

    #[test]
    fn test_cli_parsing_tokens_defaults() {
        let cli = Cli::parse_from(["mcp-bench", "tokens"]);
        if let Commands::Tokens {
            root,
            base,
            output,
            encoding,
            reserved,
            no_export,
        } = cli.command
        {
            assert_eq!(root, None);
            assert_eq!(base, PathBuf::from("."));
            assert_eq!(output, None);
            assert_eq!(encoding, "cl100k_base");
            assert_eq!(reserved, "schemas");
            assert!(!no_export);
        } else {
            panic!("Expected Tokens command");
        }
    }

    #[test]
    fn test_cli_parsing_tokens_overrides() {
        let cli = Cli::parse_from([
            "mcp-bench",
            "tokens",
            "--root",
            "/captures/raw",
            "-o",
            "counts.csv",
            "--encoding",
            "o200k_base",
            "--no-export",
        ]);
        if let Commands::Tokens {
            root,
            output,
            encoding,
            no_export,
            ..
        } = cli.command
        {
            assert_eq!(root, Some(PathBuf::from("/captures/raw")));
            assert_eq!(output, Some(PathBuf::from("counts.csv")));
            assert_eq!(encoding, "o200k_base");
            assert!(no_export);
        } else {
            panic!("Expected Tokens command");
        }
    }

    #[test]
    fn test_cli_parsing_seed() {
        let cli = Cli::parse_from([
            "mcp-bench",
            "seed",
            "--api-key",
            "k",
            "--delay-ms",
            "0",
            "--mapping",
            "m.json",
        ]);
        if let Commands::Seed {
            api_key,
            delay_ms,
            mapping,
            ..
        } = cli.command
        {
            assert_eq!(api_key.as_deref(), Some("k"));
            assert_eq!(delay_ms, Some(0));
            assert_eq!(mapping, PathBuf::from("m.json"));
        } else {
            panic!("Expected Seed command");
        }
    }

    #[test]
    fn test_cli_parsing_validate() {
        let cli = Cli::parse_from(["mcp-bench", "validate", "--dataset", "d.json"]);
        assert!(matches!(cli.command, Commands::Validate { dataset: Some(_) }));
    }

    #[test]
    fn test_cli_verbose_and_format() {
        let cli = Cli::parse_from(["mcp-bench", "--verbose", "--format", "json", "validate"]);
        assert!(cli.verbose);
        assert_eq!(cli.format.parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_cli_output_format_default() {
        let cli = Cli::parse_from(["mcp-bench", "validate"]);
        assert_eq!(cli.format, "pretty");
    }

    #[test]
    fn test_cli_parsing_completions_zsh() {
        let cli = Cli::parse_from(["mcp-bench", "completions", "zsh"]);
        if let Commands::Completions { shell } = cli.command {
            assert_eq!(shell, Shell::Zsh);
        } else {
            panic!("Expected Completions command");
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
