// ── Normalized log record ──

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// One normalized log entry. Immutable once constructed.
///
/// A missing timestamp keeps the record classifiable (category,
/// protocol, events) but excludes it from time bucketing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub timestamp: Option<DateTime<Utc>>,
    /// Declared source of the entry (`source` field, or `"unknown"`).
    pub source: String,
    /// Human-readable message text.
    pub text: String,
    /// The flattened raw field map, retained so volume-weighted
    /// aggregation can read numeric fields.
    #[serde(skip)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Lowercased `source` + `text`, the haystack every keyword rule
    /// matches against.
    pub fn haystack(&self) -> String {
        let mut hay = String::with_capacity(self.source.len() + self.text.len() + 1);
        hay.push_str(&self.source);
        hay.push(' ');
        hay.push_str(&self.text);
        hay.to_lowercase()
    }
}
