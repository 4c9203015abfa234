//! Strong domain types for benchmark results.
//!
//! Toolkit labels and scenario identifiers are both plain strings on disk;
//! wrapping them keeps the comparison pivot from mixing the two axes up.
//!
//! # Examples
//!
//! ```
//! use mcp_bench_core::{ScenarioId, ToolkitName};
//!
//! let toolkit = ToolkitName::new("composio");
//! let scenario = ScenarioId::new("01_list_companies");
//! assert_eq!(toolkit.as_str(), "composio");
//! assert_eq!(scenario.to_string(), "01_list_companies");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Toolkit label (newtype over String).
///
/// Names the data source being measured; one subdirectory of the response
/// corpus per toolkit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolkitName(String);

impl ToolkitName {
    /// Creates a new toolkit label.
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the label as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ToolkitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ToolkitName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Benchmark scenario identifier (newtype over String).
///
/// Derived from a response file's stem and compared across toolkits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioId(String);

impl ScenarioId {
    /// Creates a new scenario identifier.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ScenarioId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
