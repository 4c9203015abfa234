//! Token accounting across MCP toolkit response corpora.
//!
//! Reads a directory tree of captured tool responses (one JSON document per
//! scenario per toolkit), measures tokens, bytes, and records for each, and
//! produces a per-file table, a cross-toolkit comparison, and a CSV export.
//!
//! # Modules
//!
//! - [`tokenizer`] - Deterministic token counting (`tiktoken-rs`)
//! - [`shape`] - Record/field heuristics over JSON shapes
//! - [`scan`] - Corpus traversal and per-document measurement
//! - [`report`] - Comparison pivot and table rendering
//! - [`export`] - CSV export and re-import
//!
//! # Examples
//!
//! ```no_run
//! use mcp_bench_tokens::{ScanOptions, TiktokenCounter, TokenReport, export, scan};
//! use std::path::Path;
//!
//! let options = ScanOptions::discover(Path::new("."))?;
//! let counter = TiktokenCounter::new(&options.encoding)?;
//! let report = TokenReport::new(&options.encoding, scan::scan(&options, &counter)?);
//!
//! println!("{}", report.render());
//! export::export_csv(Path::new("token-counts-verified.csv"), &report.results)?;
//! # Ok::<(), mcp_bench_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod export;
pub mod report;
pub mod scan;
pub mod shape;
pub mod tokenizer;

pub use report::{Comparison, ComparisonRow, TokenReport};
pub use scan::{ScanOptions, ScenarioResult};
pub use shape::{RecordShape, RecordStats};
pub use tokenizer::{TiktokenCounter, TokenCounter};
