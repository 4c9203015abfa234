//! Core types, CLI primitives, and errors for the MCP toolkit benchmark.
//!
//! This crate provides the foundational types shared by the token reporter
//! and the workspace seeder.
//!
//! # Architecture
//!
//! - Strong domain types (`ToolkitName`, `ScenarioId`)
//! - Error hierarchy with contextual information
//! - CLI output format and exit code types

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod error;
mod types;

pub mod cli;

pub use error::{Error, Result};
pub use types::{ScenarioId, ToolkitName};
