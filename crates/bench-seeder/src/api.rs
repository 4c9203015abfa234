//! CRM capability interface.
//!
//! The seeder only needs five operations. [`CrmApi`] names them so the run
//! can be driven against the HTTP client or a mock.

use crate::dataset::AttributeDefinition;
use async_trait::async_trait;
use serde_json::Value;

/// Result of a single API call.
///
/// Calls never return `Err`: per-record failures are tolerated and the run
/// continues, so the outcome is data rather than control flow.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    /// 200 or 201 with a JSON response body.
    Success(Value),
    /// 409: the attribute or record already exists.
    Conflict {
        /// Response body text
        detail: String,
    },
    /// Any other status, a 2xx body that is not JSON, or a transport error
    /// (`status` is `None`).
    Failed {
        /// HTTP status code, if a response was received
        status: Option<u16>,
        /// Response text (truncated) or transport error
        message: String,
    },
}

impl CallOutcome {
    /// `true` for [`CallOutcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// `true` for [`CallOutcome::Conflict`].
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// `true` for [`CallOutcome::Failed`].
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// `data.id.record_id` of a successful record response.
    ///
    /// # Examples
    ///
    /// ```
    /// use mcp_bench_seeder::CallOutcome;
    /// use serde_json::json;
    ///
    /// let outcome = CallOutcome::Success(json!({"data": {"id": {"record_id": "rec_1"}}}));
    /// assert_eq!(outcome.record_id(), Some("rec_1"));
    /// ```
    #[must_use]
    pub fn record_id(&self) -> Option<&str> {
        match self {
            Self::Success(body) => body.pointer("/data/id/record_id").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// Operations the seeder performs against the CRM.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CrmApi: Send + Sync {
    /// Identifies the workspace the credential belongs to.
    async fn whoami(&self) -> CallOutcome;

    /// Creates a custom attribute on `object`.
    async fn create_attribute(&self, object: &str, definition: &AttributeDefinition) -> CallOutcome;

    /// Creates or updates the record whose `matching_attribute` equals the
    /// value in `values`.
    async fn assert_record(&self, object: &str, matching_attribute: &str, values: Value) -> CallOutcome;

    /// Creates a new record. Not idempotent.
    async fn create_record(&self, object: &str, values: Value) -> CallOutcome;

    /// Updates attributes of an existing record.
    async fn update_record(&self, object: &str, record_id: &str, values: Value) -> CallOutcome;
}
