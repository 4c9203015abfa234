//! Record/field heuristics over arbitrary JSON responses.
//!
//! Toolkits wrap CRM records differently: a bare array, an envelope with a
//! `data` key, or a single object. [`classify`] names the shape and
//! [`measure`] turns it into a record count plus the field count of the first
//! record. Nothing in here can fail: unparseable text and unexpected shapes
//! both measure as zero.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key that marks an envelope response.
pub const ENVELOPE_KEY: &str = "data";

/// Top-level shape of a parsed response document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordShape<'a> {
    /// Top-level array of records.
    Sequence(&'a [Value]),
    /// Object carrying its payload under [`ENVELOPE_KEY`].
    Envelope(&'a Value),
    /// Any other object, treated as one record.
    Mapping(&'a Map<String, Value>),
    /// Strings, numbers, booleans, and null.
    Scalar,
}

/// Record and field counts inferred from a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStats {
    /// Number of records in the response
    pub records: usize,
    /// Number of fields on the first record
    pub fields_per_record: usize,
}

impl RecordStats {
    const fn new(records: usize, fields_per_record: usize) -> Self {
        Self {
            records,
            fields_per_record,
        }
    }
}

/// Classifies a parsed document.
///
/// # Examples
///
/// ```
/// use mcp_bench_tokens::shape::{RecordShape, classify};
/// use serde_json::json;
///
/// assert!(matches!(classify(&json!([1, 2])), RecordShape::Sequence(_)));
/// assert!(matches!(classify(&json!({"data": []})), RecordShape::Envelope(_)));
/// assert!(matches!(classify(&json!({"x": 1})), RecordShape::Mapping(_)));
/// assert_eq!(classify(&json!("text")), RecordShape::Scalar);
/// ```
#[must_use]
pub fn classify(value: &Value) -> RecordShape<'_> {
    match value {
        Value::Array(items) => RecordShape::Sequence(items),
        Value::Object(map) => map
            .get(ENVELOPE_KEY)
            .map_or(RecordShape::Mapping(map), RecordShape::Envelope),
        _ => RecordShape::Scalar,
    }
}

/// Measures raw response text.
///
/// Invalid JSON yields zero records and zero fields.
///
/// # Examples
///
/// ```
/// use mcp_bench_tokens::shape::measure;
///
/// let stats = measure(r#"[{"a":1,"b":2},{"a":3,"b":4}]"#);
/// assert_eq!((stats.records, stats.fields_per_record), (2, 2));
///
/// let stats = measure("not json at all");
/// assert_eq!((stats.records, stats.fields_per_record), (0, 0));
/// ```
#[must_use]
pub fn measure(text: &str) -> RecordStats {
    serde_json::from_str::<Value>(text).map_or_else(
        |_| RecordStats::default(),
        |value| measure_value(&value),
    )
}

/// Measures an already-parsed document.
#[must_use]
pub fn measure_value(value: &Value) -> RecordStats {
    let stats = match classify(value) {
        RecordShape::Sequence(items) => measure_sequence(items),
        RecordShape::Envelope(data) => match data {
            Value::Array(items) => measure_sequence(items),
            _ => Some(RecordStats::new(1, 0)),
        },
        RecordShape::Mapping(map) => Some(RecordStats::new(1, map.len())),
        RecordShape::Scalar => None,
    };
    stats.unwrap_or_default()
}

/// `None` when the first element is not an object.
fn measure_sequence(items: &[Value]) -> Option<RecordStats> {
    let fields = match items.first() {
        None => 0,
        Some(Value::Object(first)) => first.len(),
        Some(_) => return None,
    };
    Some(RecordStats::new(items.len(), fields))
}
