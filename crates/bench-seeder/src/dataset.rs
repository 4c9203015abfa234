//! Reference dataset replayed into the CRM workspace.
//!
//! The bundled dataset is compiled into the crate from
//! `data/workspace.json`: custom attribute definitions for companies and
//! deals, 50 public companies with two executives each, and 50 synthetic
//! deals spread across the pipeline stages.

use chrono::NaiveDate;
use mcp_bench_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

const BUNDLED: &str = include_str!("../data/workspace.json");

/// Custom attribute created on a CRM object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDefinition {
    /// Display title
    pub title: String,
    /// Stable API identifier
    pub api_slug: String,
    /// Attribute type (`text`, `number`, `select`, `date`, `currency`, ...)
    #[serde(rename = "type")]
    pub attribute_type: String,
    /// Help text shown in the CRM
    pub description: String,
}

/// Executive contact attached to a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Executive {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Job title
    pub title: String,
}

/// Company record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Legal name
    pub name: String,
    /// Primary web domain, used as the upsert key
    pub domain: String,
    /// Industry vertical
    pub industry: String,
    /// Approximate headcount
    pub employee_count: u64,
    /// Annual revenue in billions of USD
    pub annual_revenue_billions: f64,
    /// Year founded
    pub founded_year: u32,
    /// Headquarters city and state
    pub headquarters: String,
    /// Short description
    pub description: String,
    /// Contacts created as people records
    #[serde(default)]
    pub executives: Vec<Executive>,
}

/// Deal record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    /// Deal name
    pub name: String,
    /// Pipeline stage title
    pub stage: String,
    /// Deal value in USD
    pub value: u64,
    /// Expected or actual close date
    pub close_date: NaiveDate,
    /// Index into [`Dataset::companies`]
    pub company_index: usize,
    /// Internal champion at the prospect
    pub champion: String,
    /// Use case driving the deal
    pub use_case: String,
    /// Next action item
    pub next_step: String,
    /// Win probability, 0 to 100
    pub probability: u8,
    /// Proposed contract length
    pub contract_months: u32,
    /// Reason a closed-lost deal was lost
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss_reason: Option<String>,
}

/// Complete seed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Custom attributes added to the companies object
    pub company_attributes: Vec<AttributeDefinition>,
    /// Custom attributes added to the deals object
    pub deal_attributes: Vec<AttributeDefinition>,
    /// Companies in upsert order
    pub companies: Vec<Company>,
    /// Deals in creation order
    pub deals: Vec<Deal>,
}

impl Dataset {
    /// Parses the dataset compiled into the crate.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled file is malformed, which the test suite
    /// rules out.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_bench_seeder::Dataset;
    ///
    /// let dataset = Dataset::bundled()?;
    /// assert_eq!(dataset.companies.len(), 50);
    /// assert_eq!(dataset.deals.len(), 50);
    /// # Ok::<(), mcp_bench_core::Error>(())
    /// ```
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED)
    }

    /// Loads a dataset from a JSON file with the bundled layout.
    ///
    /// # Errors
    ///
    /// - [`Error::ResourceNotFound`] if the file does not exist
    /// - [`Error::Io`] if it cannot be read
    /// - [`Error::SerializationError`] if it is not a valid dataset
    /// - [`Error::ValidationError`] if a deal references a missing company
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ResourceNotFound {
                resource: path.display().to_string(),
            });
        }
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_json(&text)?;
        tracing::debug!(path = %path.display(), "loaded dataset");
        Ok(dataset)
    }

    /// Parses a dataset from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SerializationError`] for malformed JSON and
    /// [`Error::ValidationError`] for dangling company references.
    pub fn from_json(text: &str) -> Result<Self> {
        let dataset: Self = serde_json::from_str(text)?;
        dataset.check_references()?;
        Ok(dataset)
    }

    /// Company a deal belongs to.
    #[must_use]
    pub fn company_of(&self, deal: &Deal) -> Option<&Company> {
        self.companies.get(deal.company_index)
    }

    /// Number of executives across all companies.
    #[must_use]
    pub fn executive_count(&self) -> usize {
        self.companies.iter().map(|c| c.executives.len()).sum()
    }

    fn check_references(&self) -> Result<()> {
        for (i, deal) in self.deals.iter().enumerate() {
            if deal.company_index >= self.companies.len() {
                return Err(Error::ValidationError {
                    field: format!("deals[{i}].company_index"),
                    reason: format!(
                        "'{}' references company {} but only {} companies exist",
                        deal.name,
                        deal.company_index,
                        self.companies.len()
                    ),
                });
            }
        }
        Ok(())
    }
}
