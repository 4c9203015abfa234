//! Record mapping written after a seeding run.
//!
//! Benchmark prompts reference records by name; the mapping lets later
//! tooling resolve those names to the record ids the CRM assigned.

use chrono::{DateTime, Utc};
use mcp_bench_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Version tag stored in the mapping metadata.
pub const SCRIPT_VERSION: &str = "2.0";

/// Provenance tag stored in the mapping metadata.
pub const DATA_SOURCE: &str = "Fortune 100 + public company data";

/// Created company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyMapping {
    /// CRM record id
    pub record_id: String,
    /// Company name
    pub name: String,
    /// Position in the dataset
    pub idx: usize,
}

/// Created deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealMapping {
    /// CRM record id
    pub record_id: String,
    /// Deal name
    pub name: String,
    /// Pipeline stage
    pub stage: String,
}

/// Run totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingMetadata {
    /// Companies created or updated
    pub total_companies: usize,
    /// Deals created
    pub total_deals: usize,
    /// People created or updated
    pub total_people: usize,
    /// Company custom attributes in the dataset
    pub total_company_custom_attrs: usize,
    /// Deal custom attributes in the dataset
    pub total_deal_custom_attrs: usize,
    /// See [`SCRIPT_VERSION`]
    pub script_version: String,
    /// See [`DATA_SOURCE`]
    pub data_source: String,
    /// Completion time
    pub generated_at: DateTime<Utc>,
}

/// Mapping file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedMapping {
    /// Successfully created companies, in dataset order
    pub companies: Vec<CompanyMapping>,
    /// Successfully created deals, in dataset order
    pub deals: Vec<DealMapping>,
    /// Run totals
    pub metadata: MappingMetadata,
}

impl SeedMapping {
    /// Writes the mapping as pretty JSON, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "wrote record mapping");
        Ok(())
    }

    /// Reads a mapping file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] or [`Error::SerializationError`].
    pub fn read_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }
}
