//! Phased seeding run.
//!
//! Phases run strictly in order and every call is awaited before the next
//! one starts:
//!
//! 0. coverage validation (fatal, no network)
//! 1. pre-flight `whoami` (fatal on failure)
//! 2. custom attributes
//! 3. company upserts
//! 4. people upserts for each created company
//! 5. deal creation plus stage update
//! 6. record mapping
//!
//! Inside phases 2 to 5 a failed call is logged and skipped.

use crate::api::{CallOutcome, CrmApi};
use crate::dataset::Dataset;
use crate::mapping::{CompanyMapping, DATA_SOURCE, DealMapping, MappingMetadata, SCRIPT_VERSION, SeedMapping};
use crate::payload::{self, COMPANIES, DEALS, PEOPLE};
use crate::validation::CoverageReport;
use chrono::Utc;
use mcp_bench_core::{Error, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Upsert key for companies.
pub const COMPANY_MATCHING_ATTRIBUTE: &str = "domains";
/// Upsert key for people.
pub const PERSON_MATCHING_ATTRIBUTE: &str = "email_addresses";

const UNKNOWN_WORKSPACE: &str = "unknown";

/// Call counts for one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseTally {
    /// Calls that returned 200/201
    pub created: usize,
    /// Calls that returned 409
    pub existing: usize,
    /// Calls that failed
    pub failed: usize,
}

impl PhaseTally {
    fn record(&mut self, outcome: &CallOutcome) {
        match outcome {
            CallOutcome::Success(_) => self.created += 1,
            CallOutcome::Conflict { .. } => self.existing += 1,
            CallOutcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Records a call that must return a record id.
    ///
    /// A success without one counts as failed, so `created` always matches
    /// the ids that reach the mapping.
    fn record_keyed(&mut self, outcome: &CallOutcome) -> Option<String> {
        let id = outcome.record_id().map(str::to_string);
        if outcome.is_success() && id.is_none() {
            self.failed += 1;
        } else {
            self.record(outcome);
        }
        id
    }

    /// Total calls made in the phase.
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.created + self.existing + self.failed
    }
}

/// What a completed run did.
#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    /// Workspace name reported by the pre-flight check
    pub workspace: String,
    /// Coverage report the run was gated on
    pub coverage: CoverageReport,
    /// Custom attribute creation
    pub attributes: PhaseTally,
    /// Company upserts
    pub companies: PhaseTally,
    /// People upserts
    pub people: PhaseTally,
    /// Deal creation
    pub deals: PhaseTally,
    /// Deal stage updates
    pub stage_updates: PhaseTally,
    /// Mapping written at the end of the run
    pub mapping: SeedMapping,
    /// Where the mapping was written
    pub mapping_path: PathBuf,
}

impl SeedSummary {
    /// Operator-facing completion report.
    #[must_use]
    pub fn render(&self) -> String {
        let meta = &self.mapping.metadata;
        let mut out = String::new();
        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(out, "  SEED COMPLETE ({})", self.workspace);
        let _ = writeln!(out, "{}", "=".repeat(60));
        let _ = writeln!(
            out,
            "  Companies:  {}/{}",
            meta.total_companies,
            self.companies.attempted()
        );
        let _ = writeln!(out, "  People:     {}/{}", meta.total_people, self.people.attempted());
        let _ = writeln!(out, "  Deals:      {}/{}", meta.total_deals, self.deals.attempted());
        let _ = writeln!(
            out,
            "  Custom attrs (companies): {}",
            meta.total_company_custom_attrs
        );
        let _ = writeln!(out, "  Custom attrs (deals):     {}", meta.total_deal_custom_attrs);
        let _ = writeln!(
            out,
            "  Attributes: {} created, {} existing, {} failed",
            self.attributes.created, self.attributes.existing, self.attributes.failed
        );
        let _ = writeln!(out, "  Record mapping: {}", self.mapping_path.display());
        out
    }
}

/// Replays a dataset against a CRM.
///
/// Deal creation is not idempotent: running twice against the same workspace
/// creates every deal twice. Companies and people are upserted.
#[derive(Debug)]
pub struct Seeder<'a, A: CrmApi + ?Sized> {
    api: &'a A,
    dataset: &'a Dataset,
    mapping_path: PathBuf,
}

impl<'a, A: CrmApi + ?Sized> Seeder<'a, A> {
    /// Creates a seeder.
    pub fn new(api: &'a A, dataset: &'a Dataset, mapping_path: impl Into<PathBuf>) -> Self {
        Self {
            api,
            dataset,
            mapping_path: mapping_path.into(),
        }
    }

    /// Runs every phase.
    ///
    /// # Errors
    ///
    /// - [`Error::ValidationError`] if coverage fails; no call is made
    /// - [`Error::ConnectionFailed`] if the pre-flight check fails
    /// - [`Error::Io`] if the mapping cannot be written
    pub async fn run(&self) -> Result<SeedSummary> {
        let coverage = CoverageReport::evaluate(self.dataset).ensure()?;
        info!("dataset coverage validated");

        let workspace = self.preflight().await?;
        info!(workspace = %workspace, "connected");

        let attributes = self.seed_attributes().await;
        let (company_ids, companies) = self.seed_companies().await;
        let people = self.seed_people(&company_ids).await;
        let (deal_ids, deals, stage_updates) = self.seed_deals(&company_ids).await;

        let mapping = self.build_mapping(&company_ids, &deal_ids, people);
        mapping.write_to(&self.mapping_path)?;

        Ok(SeedSummary {
            workspace,
            coverage,
            attributes,
            companies,
            people,
            deals,
            stage_updates,
            mapping,
            mapping_path: self.mapping_path.clone(),
        })
    }

    async fn preflight(&self) -> Result<String> {
        match self.api.whoami().await {
            CallOutcome::Failed { status, message } => Err(Error::ConnectionFailed {
                endpoint: "GET /self".to_string(),
                source: match status {
                    Some(code) => format!("status {code}: {message}").into(),
                    None => message.into(),
                },
            }),
            CallOutcome::Success(body) => Ok(body
                .pointer("/data/workspace/name")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(UNKNOWN_WORKSPACE)
                .to_string()),
            CallOutcome::Conflict { .. } => Ok(UNKNOWN_WORKSPACE.to_string()),
        }
    }

    async fn seed_attributes(&self) -> PhaseTally {
        info!("creating custom attributes");
        let mut tally = PhaseTally::default();
        let groups = [
            (COMPANIES, &self.dataset.company_attributes),
            (DEALS, &self.dataset.deal_attributes),
        ];
        for (object, definitions) in groups {
            for definition in definitions {
                let outcome = self.api.create_attribute(object, definition).await;
                if outcome.is_conflict() {
                    info!(object, slug = %definition.api_slug, "attribute already exists");
                }
                tally.record(&outcome);
            }
        }
        info!(
            created = tally.created,
            existing = tally.existing,
            failed = tally.failed,
            "attributes done"
        );
        tally
    }

    /// Record id per dataset company; `None` where the upsert failed.
    async fn seed_companies(&self) -> (Vec<Option<String>>, PhaseTally) {
        info!(count = self.dataset.companies.len(), "upserting companies");
        let mut tally = PhaseTally::default();
        let mut ids = Vec::with_capacity(self.dataset.companies.len());

        for company in &self.dataset.companies {
            let outcome = self
                .api
                .assert_record(COMPANIES, COMPANY_MATCHING_ATTRIBUTE, payload::company_values(company))
                .await;
            let id = tally.record_keyed(&outcome);
            if id.is_none() {
                warn!(label = %company.name, "company not created");
            }
            ids.push(id);
        }
        info!(created = tally.created, failed = tally.failed, "companies done");
        (ids, tally)
    }

    async fn seed_people(&self, company_ids: &[Option<String>]) -> PhaseTally {
        info!("upserting people");
        let mut tally = PhaseTally::default();

        for (company, id) in self.dataset.companies.iter().zip(company_ids) {
            let Some(company_id) = id else { continue };
            for executive in &company.executives {
                let values = payload::person_values(executive, &company.domain, company_id);
                let outcome = self
                    .api
                    .assert_record(PEOPLE, PERSON_MATCHING_ATTRIBUTE, values)
                    .await;
                if !outcome.is_success() {
                    warn!(
                        label = %format!("{} {}", executive.first_name, executive.last_name),
                        "person not created"
                    );
                }
                tally.record(&outcome);
            }
        }
        info!(created = tally.created, failed = tally.failed, "people done");
        tally
    }

    /// Record id per dataset deal, plus creation and stage update tallies.
    async fn seed_deals(
        &self,
        company_ids: &[Option<String>],
    ) -> (Vec<Option<String>>, PhaseTally, PhaseTally) {
        info!(count = self.dataset.deals.len(), "creating deals");
        let mut created = PhaseTally::default();
        let mut staged = PhaseTally::default();
        let mut ids = Vec::with_capacity(self.dataset.deals.len());

        for deal in &self.dataset.deals {
            let company_id = company_ids
                .get(deal.company_index)
                .and_then(Option::as_deref);
            let outcome = self
                .api
                .create_record(DEALS, payload::deal_values(deal, company_id))
                .await;
            let id = created.record_keyed(&outcome);
            match &id {
                Some(record_id) => {
                    let update = self
                        .api
                        .update_record(DEALS, record_id, payload::stage_values(&deal.stage))
                        .await;
                    staged.record(&update);
                }
                None => warn!(label = %deal.name, "deal not created"),
            }
            ids.push(id);
        }
        info!(created = created.created, failed = created.failed, "deals done");
        (ids, created, staged)
    }

    fn build_mapping(
        &self,
        company_ids: &[Option<String>],
        deal_ids: &[Option<String>],
        people: PhaseTally,
    ) -> SeedMapping {
        let companies: Vec<CompanyMapping> = self
            .dataset
            .companies
            .iter()
            .zip(company_ids)
            .enumerate()
            .filter_map(|(idx, (company, id))| {
                id.as_ref().map(|record_id| CompanyMapping {
                    record_id: record_id.clone(),
                    name: company.name.clone(),
                    idx,
                })
            })
            .collect();

        let deals: Vec<DealMapping> = self
            .dataset
            .deals
            .iter()
            .zip(deal_ids)
            .filter_map(|(deal, id)| {
                id.as_ref().map(|record_id| DealMapping {
                    record_id: record_id.clone(),
                    name: deal.name.clone(),
                    stage: deal.stage.clone(),
                })
            })
            .collect();

        SeedMapping {
            metadata: MappingMetadata {
                total_companies: companies.len(),
                total_deals: deals.len(),
                total_people: people.created,
                total_company_custom_attrs: self.dataset.company_attributes.len(),
                total_deal_custom_attrs: self.dataset.deal_attributes.len(),
                script_version: SCRIPT_VERSION.to_string(),
                data_source: DATA_SOURCE.to_string(),
                generated_at: Utc::now(),
            },
            companies,
            deals,
        }
    }

    /// Destination of the record mapping.
    #[must_use]
    pub fn mapping_path(&self) -> &Path {
        &self.mapping_path
    }
}
