//! Record-side path interpreter.
//!
//! Resolves path expressions against a concrete record: a JSON document with
//! its field values under a top-level `data` key (legacy search endpoints:
//! `case_data`) and a fixed set of top-level scalar attributes carrying the
//! metadata (see [`crate::metadata`]).
//!
//! Prefer going through an extractor over hard references into the payload;
//! every miss (unknown field, out-of-range index, absent payload) degrades
//! to `None` so callers stay total over partially-populated records.

use serde_json::Value;
use tracing::trace;

use crate::extract::Extract;
use crate::metadata::Metadata;
use crate::path::{self, Segment, Selector, split_segments};

/// Path interpreter over a single record.
///
/// # Examples
///
/// ```
/// use casepath::{Extract, RecordExtractor};
/// use serde_json::json;
///
/// let extractor = RecordExtractor::new(json!({
///     "state": "inProgress",
///     "data": {
///         "applicant": {"firstName": "Henry"},
///         "addresses": [{"id": "a1", "value": {"postcode": "AA0 0AA"}}],
///     },
/// }));
///
/// assert_eq!(extractor.extract_one("applicant.firstName"), Some(json!("Henry")));
/// assert_eq!(extractor.extract_one("addresses[id:a1].value.postcode"), Some(json!("AA0 0AA")));
/// assert_eq!(extractor.extract_one("[state]"), Some(json!("inProgress")));
/// assert_eq!(extractor.extract_one("applicant.lastName"), None);
/// ```
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    record: Value,
}

impl RecordExtractor {
    /// Bind an extractor to a record.
    pub fn new(record: Value) -> Self {
        RecordExtractor { record }
    }

    /// The record's payload map: first non-null of `data` then `case_data`.
    fn payload(&self) -> Option<&Value> {
        ["data", "case_data"]
            .iter()
            .find_map(|key| self.record.get(*key).filter(|value| !value.is_null()))
    }

    fn metadata_value(&self, path: &str) -> Option<Value> {
        let metadata = Metadata::from_path(path)?;
        self.record.get(metadata.record_attribute()).cloned()
    }

    fn field_value(&self, path: &str) -> Option<Value> {
        // A relative prefix reaching the root extractor means no relative
        // decorator handled it; fail open and resolve the rest absolutely.
        let path = match path.strip_prefix(path::RELATIVE_PREFIX) {
            Some(rest) => {
                trace!(path, "stripping unresolved relative prefix");
                rest
            }
            None => path,
        };

        let Some(payload) = self.payload() else {
            trace!("record has no data payload");
            return None;
        };

        let mut current = payload;
        for segment in split_segments(path) {
            current = next_element(current, &segment)?;
        }
        Some(current.clone())
    }
}

impl Extract for RecordExtractor {
    type Output = Value;

    fn extract_one(&self, path: &str) -> Option<Value> {
        if path::is_metadata(path) {
            self.metadata_value(path)
        } else {
            self.field_value(path)
        }
    }
}

/// Descend one segment from `from`, evaluating any collection selector
/// against the actual array.
fn next_element<'a>(from: &'a Value, segment: &Segment) -> Option<&'a Value> {
    let value = from.as_object()?.get(&segment.name)?;

    match &segment.selector {
        None => Some(value),
        Some(Selector::Index(index)) => value.as_array()?.get(*index),
        Some(Selector::Id(id)) => value
            .as_array()?
            .iter()
            .find(|item| item.get("id").and_then(Value::as_str) == Some(id)),
        // Any-item selection only makes sense against a definition tree
        Some(Selector::AnyItem) => None,
    }
}
