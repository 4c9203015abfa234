//! MCP benchmark CLI library.
//!
//! Exposes the argument definitions, command implementations, and formatters
//! behind the `mcp-bench` binary so they can be tested.

#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

pub use cli::{Cli, Commands};
