//! Request bodies for the CRM REST API.
//!
//! Every attribute value is sent in the typed-array form the API expects,
//! e.g. `"name": [{"value": "Apple Inc."}]`.

use crate::dataset::{AttributeDefinition, Company, Deal, Executive};
use serde_json::{Map, Value, json};

/// Lead source tagged on every seeded company and deal.
pub const LEAD_SOURCE: &str = "Benchmark Seed";

/// Headcount above which a company is tiered `Enterprise`.
pub const ENTERPRISE_EMPLOYEES: u64 = 50_000;

const CURRENCY_CODE: &str = "USD";
const BILLION: f64 = 1_000_000_000.0;

/// Object slug for companies.
pub const COMPANIES: &str = "companies";
/// Object slug for people.
pub const PEOPLE: &str = "people";
/// Object slug for deals.
pub const DEALS: &str = "deals";

/// Ideal-customer-profile score: one point per thousand employees plus 40,
/// clamped to 10..=100.
///
/// # Examples
///
/// ```
/// use mcp_bench_seeder::payload::icp_score;
///
/// assert_eq!(icp_score(166_000), 100);
/// assert_eq!(icp_score(25_000), 65);
/// ```
#[must_use]
pub const fn icp_score(employees: u64) -> u64 {
    let score = employees / 1000 + 40;
    if score > 100 {
        100
    } else if score < 10 {
        10
    } else {
        score
    }
}

/// Account tier option title.
#[must_use]
pub const fn account_tier(employees: u64) -> &'static str {
    if employees > ENTERPRISE_EMPLOYEES {
        "Enterprise"
    } else {
        "Mid-Market"
    }
}

/// `first.last@domain`, lowercased with spaces removed from each name.
///
/// # Examples
///
/// ```
/// use mcp_bench_seeder::dataset::Executive;
/// use mcp_bench_seeder::payload::executive_email;
///
/// let exec = Executive {
///     first_name: "Mary".into(),
///     last_name: "Van Dyke".into(),
///     title: "CFO".into(),
/// };
/// assert_eq!(executive_email(&exec, "example.com"), "mary.vandyke@example.com");
/// ```
#[must_use]
pub fn executive_email(executive: &Executive, domain: &str) -> String {
    let local = |name: &str| name.to_lowercase().replace(' ', "");
    format!(
        "{}.{}@{domain}",
        local(&executive.first_name),
        local(&executive.last_name)
    )
}

/// Wraps attribute values in the record request envelope.
#[must_use]
pub fn record_body(values: Value) -> Value {
    json!({ "data": { "values": values } })
}

/// Body for creating a custom attribute.
#[must_use]
pub fn attribute_body(definition: &AttributeDefinition) -> Value {
    json!({
        "data": {
            "title": definition.title,
            "api_slug": definition.api_slug,
            "type": definition.attribute_type,
            "description": definition.description,
            "is_required": false,
            "is_unique": false,
            "is_multiselect": false,
        }
    })
}

/// Attribute values for a company upsert.
#[must_use]
pub fn company_values(company: &Company) -> Value {
    json!({
        "name": [text(&company.name)],
        "domains": [{ "domain": company.domain }],
        "description": [text(&company.description)],
        "employee_count": [{ "value": company.employee_count }],
        "annual_revenue": [currency(whole_number(company.annual_revenue_billions * BILLION))],
        "founded_year": [{ "value": company.founded_year }],
        "headquarters": [text(&company.headquarters)],
        "industry": [option(&company.industry)],
        "lead_source": [option(LEAD_SOURCE)],
        "account_tier": [option(account_tier(company.employee_count))],
        "funding_stage": [option("Public")],
        "contract_status": [option("Prospect")],
        "icp_score": [{ "value": icp_score(company.employee_count) }],
    })
}

/// Attribute values for a person upsert linked to a company record.
#[must_use]
pub fn person_values(executive: &Executive, domain: &str, company_record_id: &str) -> Value {
    json!({
        "name": [{
            "first_name": executive.first_name,
            "last_name": executive.last_name,
        }],
        "email_addresses": [{ "email_address": executive_email(executive, domain) }],
        "job_title": [text(&executive.title)],
        "company": [reference(COMPANIES, company_record_id)],
    })
}

/// Attribute values for a deal.
///
/// The association is omitted when the company was not created.
#[must_use]
pub fn deal_values(deal: &Deal, company_record_id: Option<&str>) -> Value {
    let mut values = Map::new();
    values.insert("name".into(), json!([text(&deal.name)]));
    values.insert("value".into(), json!([currency(deal.value)]));
    values.insert("close_date".into(), json!([{ "value": deal.close_date }]));
    if let Some(id) = company_record_id {
        values.insert("associated_company".into(), json!([reference(COMPANIES, id)]));
    }
    values.insert("champion".into(), json!([text(&deal.champion)]));
    values.insert("use_case".into(), json!([text(&deal.use_case)]));
    values.insert("next_step".into(), json!([text(&deal.next_step)]));
    values.insert("probability".into(), json!([{ "value": deal.probability }]));
    values.insert(
        "contract_length_months".into(),
        json!([{ "value": deal.contract_months }]),
    );
    if let Some(reason) = &deal.loss_reason {
        values.insert("loss_reason".into(), json!([option(reason)]));
    }
    values.insert("deal_lead_source".into(), json!([option(LEAD_SOURCE)]));
    Value::Object(values)
}

/// Values for the follow-up stage update of a created deal.
#[must_use]
pub fn stage_values(stage: &str) -> Value {
    json!({ "stage": [{ "status": { "title": stage } }] })
}

fn text(value: &str) -> Value {
    json!({ "value": value })
}

fn option(title: &str) -> Value {
    json!({ "option": { "title": title } })
}

/// 2^53; whole values up to here convert to `u64` exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Whole amounts serialize as integers, anything else stays a float.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn whole_number(amount: f64) -> Value {
    if amount.fract() == 0.0 && (0.0..=MAX_EXACT_INTEGER).contains(&amount) {
        json!(amount as u64)
    } else {
        json!(amount)
    }
}

fn currency(amount: impl serde::Serialize) -> Value {
    json!({ "currency_value": amount, "currency_code": CURRENCY_CODE })
}

fn reference(object: &str, record_id: &str) -> Value {
    json!({ "target_object": object, "target_record_id": record_id })
}
