//! Scenario coverage checks over a dataset.
//!
//! Each benchmark prompt needs enough matching records to produce a
//! meaningful response. [`CoverageReport::evaluate`] counts them before any
//! network call is made, and a failing report aborts the seeding run.

use crate::dataset::Dataset;
use chrono::NaiveDate;
use mcp_bench_core::{Error, Result};
use serde::Serialize;
use std::fmt::Write as _;

/// Minimum number of companies.
pub const MIN_COMPANIES: usize = 25;
/// Minimum number of deals in [`NURTURE_STAGE`].
pub const MIN_NURTURE_DEALS: usize = 20;
/// Minimum number of deals above [`HIGH_VALUE_THRESHOLD`].
pub const MIN_HIGH_VALUE_DEALS: usize = 10;
/// Minimum number of companies with `Tech` in the name.
pub const MIN_TECH_NAMED: usize = 8;
/// Minimum number of companies in [`TECHNOLOGY_INDUSTRY`].
pub const MIN_TECHNOLOGY_COMPANIES: usize = 10;
/// Minimum number of deals closing before [`close_date_cutoff`].
pub const MIN_EARLY_CLOSE_DEALS: usize = 15;
/// Minimum number of Technology companies above [`LARGE_COMPANY_EMPLOYEES`].
pub const MIN_LARGE_TECHNOLOGY: usize = 5;

/// Stage queried by the nurture-pipeline scenario.
pub const NURTURE_STAGE: &str = "Nurture";
/// Industry queried by the technology scenarios.
pub const TECHNOLOGY_INDUSTRY: &str = "Technology";
/// Deal value (USD) a deal must exceed to count as high value.
pub const HIGH_VALUE_THRESHOLD: u64 = 50_000;
/// Headcount a company must exceed to count as large.
pub const LARGE_COMPANY_EMPLOYEES: u64 = 100;

/// Exclusive upper bound for the close-date scenario (2026-03-01).
#[must_use]
pub fn close_date_cutoff() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap_or(NaiveDate::MIN)
}

/// Outcome of one coverage check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageCheck {
    /// What is being counted
    pub name: String,
    /// Matching records found
    pub observed: usize,
    /// Required minimum
    pub required: usize,
    /// Extra context, such as the highest-value deal
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CoverageCheck {
    fn new(name: impl Into<String>, observed: usize, required: usize) -> Self {
        Self {
            name: name.into(),
            observed,
            required,
            detail: None,
        }
    }

    /// `true` when the observed count meets the minimum.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.observed >= self.required
    }
}

/// All eight coverage checks for a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    /// Checks in a fixed order
    pub checks: Vec<CoverageCheck>,
}

impl CoverageReport {
    /// Counts matching records for every scenario.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_bench_seeder::{CoverageReport, Dataset};
    ///
    /// let report = CoverageReport::evaluate(&Dataset::bundled()?);
    /// assert_eq!(report.checks.len(), 8);
    /// assert!(report.passed());
    /// # Ok::<(), mcp_bench_core::Error>(())
    /// ```
    #[must_use]
    pub fn evaluate(dataset: &Dataset) -> Self {
        let companies = &dataset.companies;
        let deals = &dataset.deals;
        let cutoff = close_date_cutoff();

        let is_technology = |industry: &str| industry == TECHNOLOGY_INDUSTRY;

        let mut highest = CoverageCheck::new("Highest-value deal", deals.len(), 1);
        highest.detail = deals
            .iter()
            .max_by_key(|d| d.value)
            .map(|d| format!("{} (${})", d.name, d.value));

        let checks = vec![
            CoverageCheck::new("Companies", companies.len(), MIN_COMPANIES),
            CoverageCheck::new(
                format!("Deals in '{NURTURE_STAGE}' stage"),
                deals.iter().filter(|d| d.stage == NURTURE_STAGE).count(),
                MIN_NURTURE_DEALS,
            ),
            CoverageCheck::new(
                format!("Deals over ${HIGH_VALUE_THRESHOLD}"),
                deals.iter().filter(|d| d.value > HIGH_VALUE_THRESHOLD).count(),
                MIN_HIGH_VALUE_DEALS,
            ),
            CoverageCheck::new(
                "Companies with 'Tech' in name",
                companies.iter().filter(|c| c.name.contains("Tech")).count(),
                MIN_TECH_NAMED,
            ),
            CoverageCheck::new(
                format!("Companies in {TECHNOLOGY_INDUSTRY}"),
                companies.iter().filter(|c| is_technology(&c.industry)).count(),
                MIN_TECHNOLOGY_COMPANIES,
            ),
            CoverageCheck::new(
                format!("Deals closing before {cutoff}"),
                deals.iter().filter(|d| d.close_date < cutoff).count(),
                MIN_EARLY_CLOSE_DEALS,
            ),
            CoverageCheck::new(
                format!("{TECHNOLOGY_INDUSTRY} companies with >{LARGE_COMPANY_EMPLOYEES} employees"),
                companies
                    .iter()
                    .filter(|c| is_technology(&c.industry) && c.employee_count > LARGE_COMPANY_EMPLOYEES)
                    .count(),
                MIN_LARGE_TECHNOLOGY,
            ),
            highest,
        ];

        Self { checks }
    }

    /// `true` when every check passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.checks.iter().all(CoverageCheck::passed)
    }

    /// Checks that did not meet their minimum.
    pub fn failures(&self) -> impl Iterator<Item = &CoverageCheck> {
        self.checks.iter().filter(|c| !c.passed())
    }

    /// Converts a failing report into an error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] naming every failed check.
    pub fn ensure(self) -> Result<Self> {
        if self.passed() {
            return Ok(self);
        }
        let reason = self
            .failures()
            .map(|c| format!("{} ({} < {})", c.name, c.observed, c.required))
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::ValidationError {
            field: "dataset coverage".to_string(),
            reason,
        })
    }

    /// One line per check, prefixed with `[OK]` or `[FAIL]`.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::from("Scenario coverage:\n");
        for check in &self.checks {
            let mark = if check.passed() { "OK" } else { "FAIL" };
            let _ = write!(
                out,
                "  [{mark}] {}: {} (need {})",
                check.name, check.observed, check.required
            );
            if let Some(detail) = &check.detail {
                let _ = write!(out, " - {detail}");
            }
            out.push('\n');
        }
        out
    }
}
