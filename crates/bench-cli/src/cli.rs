//! CLI argument definitions and parsing.
//!
//! Defines the command-line interface structure using clap:
//! - `Cli` - Main CLI entry point
//! - `Commands` - Available subcommands

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use mcp_bench_seeder::config::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_MAPPING_PATH};
use mcp_bench_tokens::scan::RESERVED_DIR;
use mcp_bench_tokens::tokenizer::DEFAULT_ENCODING;
use std::path::PathBuf;

/// MCP toolkit benchmark - token accounting and CRM workspace seeding.
///
/// Measures how many tokens each MCP toolkit spends on the same CRM
/// scenarios, and seeds the sandbox workspace those scenarios run against.
#[derive(Parser, Debug)]
#[command(name = "mcp-bench")]
#[command(version, about, long_about = None)]
#[command(author = "MCP Benchmark Team")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (json, text, pretty)
    #[arg(long = "format", global = true, default_value = "pretty")]
    pub format: String,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count tokens in captured toolkit responses.
    ///
    /// Scans `<root>/<toolkit>/<scenario>.json`, prints a per-file table and
    /// a cross-toolkit comparison, and writes a CSV next to the root.
    ///
    /// # Examples
    ///
    /// ```bash
    /// # Discover data/raw or raw under the current directory
    /// mcp-bench tokens
    ///
    /// # Explicit root and CSV destination
    /// mcp-bench tokens --root ./captures/raw --output counts.csv
    /// ```
    Tokens {
        /// Corpus root (default: discovered under --base)
        #[arg(long)]
        root: Option<PathBuf>,

        /// Directory searched for `data/raw`, then `raw`
        #[arg(long, default_value = ".")]
        base: PathBuf,

        /// CSV destination (default: next to the corpus root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Tokenizer encoding
        #[arg(long, default_value = DEFAULT_ENCODING)]
        encoding: String,

        /// Subdirectory excluded from toolkit discovery
        #[arg(long, default_value = RESERVED_DIR)]
        reserved: String,

        /// Skip the CSV export
        #[arg(long)]
        no_export: bool,
    },

    /// Seed the CRM sandbox workspace.
    ///
    /// Validates dataset coverage, checks connectivity, then creates custom
    /// attributes, companies, people, and deals. Deals are not idempotent:
    /// re-running duplicates them.
    ///
    /// # Examples
    ///
    /// ```bash
    /// export ATTIO_API_KEY="sandbox-key"
    /// mcp-bench seed
    /// ```
    Seed {
        /// Alternative dataset file (default: bundled dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,

        /// API credential
        #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
        api_key: Option<String>,

        /// API base URL
        #[arg(long, env = BASE_URL_ENV)]
        base_url: Option<String>,

        /// Where to write the record mapping
        #[arg(long, default_value = DEFAULT_MAPPING_PATH)]
        mapping: PathBuf,

        /// Delay before each API call in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Per-call timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },

    /// Check dataset coverage without touching the network.
    Validate {
        /// Alternative dataset file (default: bundled dataset)
        #[arg(long)]
        dataset: Option<PathBuf>,
    },

    /// Generate shell completions.
    ///
    /// # Examples
    ///
    /// ```bash
    /// mcp-bench completions bash > /etc/bash_completion.d/mcp-bench
    /// ```
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
