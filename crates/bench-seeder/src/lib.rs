//! CRM sandbox seeding for the MCP toolkit benchmark.
//!
//! Replays a fixed reference dataset (custom attributes, companies, people,
//! deals) against the CRM REST API so every toolkit is benchmarked against
//! the same workspace contents.
//!
//! # Examples
//!
//! ```no_run
//! use mcp_bench_seeder::{Dataset, HttpCrmClient, Seeder, SeederConfig};
//!
//! # async fn example() -> Result<(), mcp_bench_core::Error> {
//! let config = SeederConfig::from_env()?;
//! let dataset = Dataset::bundled()?;
//! let client = HttpCrmClient::new(&config)?;
//!
//! let summary = Seeder::new(&client, &dataset, &config.mapping_path).run().await?;
//! println!("{}", summary.render());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod api;
pub mod client;
pub mod config;
pub mod dataset;
pub mod mapping;
pub mod payload;
pub mod seeder;
pub mod validation;

pub use api::{CallOutcome, CrmApi};
pub use client::HttpCrmClient;
pub use config::SeederConfig;
pub use dataset::Dataset;
pub use mapping::SeedMapping;
pub use seeder::{PhaseTally, SeedSummary, Seeder};
pub use validation::{CoverageCheck, CoverageReport};
