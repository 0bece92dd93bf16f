//! Path grammar for addressing fields, collection items and metadata.
//!
//! A path is either a metadata reference (the whole string wrapped in square
//! brackets, e.g. `[state]`) or a dot-separated chain of segments. Each
//! segment may carry a collection selector:
//!
//! - `items[]`: any item (only meaningful when resolving definitions)
//! - `items[2]`: item at zero-based position 2
//! - `items[id:abc]`: item whose `id` attribute equals `abc`
//!
//! A chain may additionally start with a relative marker (`@` on its own, or
//! `@.` followed by the rest of the chain), signalling that it should be
//! rebased against a context's base path instead of resolved absolutely. See
//! [`crate::relative::RelativeExtractor`].
//!
//! Callers may address one field or many at once: [`PathArg`] mirrors the
//! shape of the input (a single path, an ordered list, or a keyed map) and
//! extractors produce output in the same shape.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// First character of a metadata reference.
pub const METADATA_START: char = '[';

/// Prefix marking a path as relative to a context's base path.
pub const RELATIVE_PREFIX: &str = "@.";

/// Shape a plain (selector-free) field path must have to be usable inside
/// condition expressions, with an optional leading relative marker.
static FIELD_PATH_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:@\.)?[A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+)*$").expect("valid field path pattern")
});

/// Errors raised by path handling.
///
/// This is the only hard failure across the extractors: every "missing"
/// condition (unknown field, out-of-range index, gated ACL, absent payload)
/// degrades to a soft `None` instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// A dynamic path value was neither a string, a list of strings, nor a
    /// string-keyed map of strings.
    #[error("unsupported path '{path}' of type {kind}")]
    UnsupportedPath {
        /// Rendering of the offending value.
        path: String,
        /// JSON type name of the offending value.
        kind: &'static str,
    },
}

/// One or many paths, preserving the shape callers provided them in.
///
/// Extractors resolve every entry independently and return results in the
/// matching shape (see [`crate::extract::Extracted`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathArg {
    /// A single path.
    Single(String),
    /// An ordered list of paths; results keep the same order.
    Ordered(Vec<String>),
    /// A keyed map of paths; results keep the same keys.
    Keyed(BTreeMap<String, String>),
}

impl From<&str> for PathArg {
    fn from(path: &str) -> Self {
        PathArg::Single(path.to_string())
    }
}

impl From<String> for PathArg {
    fn from(path: String) -> Self {
        PathArg::Single(path)
    }
}

impl From<Vec<String>> for PathArg {
    fn from(paths: Vec<String>) -> Self {
        PathArg::Ordered(paths)
    }
}

impl From<Vec<&str>> for PathArg {
    fn from(paths: Vec<&str>) -> Self {
        PathArg::Ordered(paths.into_iter().map(str::to_string).collect())
    }
}

impl From<BTreeMap<String, String>> for PathArg {
    fn from(paths: BTreeMap<String, String>) -> Self {
        PathArg::Keyed(paths)
    }
}

impl TryFrom<&Value> for PathArg {
    type Error = PathError;

    /// Interpret a dynamic JSON value as one or many paths.
    ///
    /// Accepts a string, an array of strings, or an object with string
    /// values. Anything else (including non-string entries inside an array
    /// or object) is rejected with [`PathError::UnsupportedPath`].
    fn try_from(value: &Value) -> Result<Self, PathError> {
        let unsupported = |offending: &Value| PathError::UnsupportedPath {
            path: offending.to_string(),
            kind: json_kind(offending),
        };

        match value {
            Value::String(path) => Ok(PathArg::Single(path.clone())),
            Value::Array(paths) => paths
                .iter()
                .map(|entry| entry.as_str().map(str::to_string).ok_or_else(|| unsupported(entry)))
                .collect::<Result<Vec<_>, _>>()
                .map(PathArg::Ordered),
            Value::Object(paths) => paths
                .iter()
                .map(|(key, entry)| {
                    entry
                        .as_str()
                        .map(|path| (key.clone(), path.to_string()))
                        .ok_or_else(|| unsupported(entry))
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(PathArg::Keyed),
            other => Err(unsupported(other)),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collection selector suffix of a path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// `[]`: any item; definition-side only, data-side lookups miss.
    AnyItem,
    /// `[N]`: item at zero-based position N.
    Index(usize),
    /// `[id:V]`: first item whose `id` attribute equals V.
    Id(String),
}

/// One dot-separated element of a segment chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Field identifier the segment addresses.
    pub name: String,
    /// Optional collection selector.
    pub selector: Option<Selector>,
}

impl Segment {
    /// Tokenize a raw segment.
    ///
    /// A segment that does not fit the `name[selector]` shape (stray
    /// brackets, empty name, a selector body that is neither empty, a
    /// non-negative integer, nor `id:` followed by a value) is kept as a
    /// literal, unselectored name rather than rejected.
    pub fn parse(raw: &str) -> Self {
        let literal = || Segment {
            name: raw.to_string(),
            selector: None,
        };

        let Some(open) = raw.find('[') else {
            return literal();
        };
        if open == 0 || !raw.ends_with(']') {
            return literal();
        }

        let name = &raw[..open];
        let body = &raw[open + 1..raw.len() - 1];
        if name.contains(']') || body.contains('[') || body.contains(']') {
            return literal();
        }

        let selector = if body.is_empty() {
            Selector::AnyItem
        } else if body.bytes().all(|b| b.is_ascii_digit()) {
            match body.parse::<usize>() {
                Ok(index) => Selector::Index(index),
                Err(_) => return literal(),
            }
        } else if let Some(id) = body.strip_prefix("id:") {
            if id.is_empty() {
                return literal();
            }
            Selector::Id(id.to_string())
        } else {
            return literal();
        };

        Segment {
            name: name.to_string(),
            selector: Some(selector),
        }
    }
}

/// Split a segment chain into its tokenized segments.
pub fn split_segments(path: &str) -> Vec<Segment> {
    path.split('.').map(Segment::parse).collect()
}

/// Whether the path denotes a metadata pseudo-field.
pub fn is_metadata(path: &str) -> bool {
    path.starts_with(METADATA_START)
}

/// Whether the string is a plain field path, optionally relative.
///
/// Collection selectors and metadata references do not qualify; this mirrors
/// the shape condition expressions accept as operands.
pub fn is_field_path(path: &str) -> bool {
    FIELD_PATH_PATTERN.is_match(path)
}

/// Replace a leading relative marker with `base_path`, verbatim.
///
/// `@.postcode` rebased on `address` becomes `address.postcode`; a bare `@`
/// becomes `address` itself. The base path is concatenated as-is; it may
/// itself start with a marker, which is what lets relative extractors stack.
/// Paths without a leading marker pass through unchanged.
pub fn rebase(path: &str, base_path: &str) -> String {
    match path.strip_prefix('@') {
        Some(rest) => format!("{base_path}{rest}"),
        None => path.to_string(),
    }
}
