//! Workspace seeding command.

use crate::formatters::{format_output, pretty};
use anyhow::Result;
use mcp_bench_core::cli::{ExitCode, OutputFormat};
use mcp_bench_seeder::config::{API_KEY_ENV, BASE_URL_ENV};
use mcp_bench_seeder::{HttpCrmClient, SeedSummary, Seeder, SeederConfig};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Arguments of the `seed` subcommand.
#[derive(Debug, Clone)]
pub struct SeedArgs {
    /// Alternative dataset file
    pub dataset: Option<PathBuf>,
    /// API credential (flag or environment)
    pub api_key: Option<String>,
    /// API base URL override
    pub base_url: Option<String>,
    /// Mapping destination
    pub mapping: PathBuf,
    /// Per-call delay override in milliseconds
    pub delay_ms: Option<u64>,
    /// Per-call timeout override in seconds
    pub timeout_secs: Option<u64>,
}

/// Runs the seed command.
pub async fn run(args: SeedArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let summary = match execute(args).await {
        Ok(summary) => summary,
        Err(err) => return Ok(super::report_failure(&err)),
    };

    let rendered = format_output(&summary, output_format, render)?;
    println!("{rendered}");
    Ok(ExitCode::SUCCESS)
}

/// Loads the dataset, builds the client, and runs every seeding phase.
///
/// # Errors
///
/// Fails on a missing credential, an invalid dataset, a failed pre-flight
/// check, or an unwritable mapping path.
pub async fn execute(args: SeedArgs) -> mcp_bench_core::Result<SeedSummary> {
    let dataset = super::load_dataset(args.dataset.as_deref())?;
    let config = config_from(&args)?;
    info!(base_url = %config.base_url, "seeding workspace");

    let client = HttpCrmClient::new(&config)?;
    Seeder::new(&client, &dataset, &config.mapping_path).run().await
}

/// Builds the run configuration from flags, which clap already backfills
/// from the environment.
///
/// # Errors
///
/// Returns a configuration error when no credential was given.
pub fn config_from(args: &SeedArgs) -> mcp_bench_core::Result<SeederConfig> {
    let mut config = SeederConfig::from_lookup(|name| match name {
        API_KEY_ENV => args.api_key.clone(),
        BASE_URL_ENV => args.base_url.clone(),
        _ => None,
    })?
    .with_mapping_path(&args.mapping);

    if let Some(ms) = args.delay_ms {
        config = config.with_rate_limit_delay(Duration::from_millis(ms));
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}

fn render(summary: &SeedSummary) -> String {
    let mut text = pretty::status_marks(&summary.coverage.render());
    text.push('\n');
    text.push_str(&summary.render());
    text
}
