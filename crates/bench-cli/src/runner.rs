//! Command execution and runtime logic.
//!
//! Contains the command dispatch and logging initialization.

use anyhow::Result;
use clap::CommandFactory;
use mcp_bench_core::cli::{ExitCode, OutputFormat};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::commands;
use crate::commands::seed::SeedArgs;
use crate::commands::tokens::TokensArgs;

/// Initializes logging infrastructure.
///
/// Logs go to stderr so stdout carries only tables and serialized reports.
/// `RUST_LOG` is honored unless `--verbose` forces debug level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}

/// Executes the specified CLI command.
///
/// Routes commands to their respective handlers and returns an exit code.
///
/// # Errors
///
/// Returns an error only if output cannot be produced; domain failures are
/// reported through the exit code.
pub async fn execute_command(command: Commands, output_format: OutputFormat) -> Result<ExitCode> {
    match command {
        Commands::Tokens {
            root,
            base,
            output,
            encoding,
            reserved,
            no_export,
        } => {
            let args = TokensArgs {
                root,
                base,
                output,
                encoding,
                reserved,
                no_export,
            };
            commands::tokens::run(args, output_format).await
        }
        Commands::Seed {
            dataset,
            api_key,
            base_url,
            mapping,
            delay_ms,
            timeout_secs,
        } => {
            let args = SeedArgs {
                dataset,
                api_key,
                base_url,
                mapping,
                delay_ms,
                timeout_secs,
            };
            commands::seed::run(args, output_format).await
        }
        Commands::Validate { dataset } => {
            commands::validate::run(dataset.as_deref(), output_format).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd).await
        }
    }
}
