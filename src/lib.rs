//! casepath - Path addressing and template rendering for case records
//!
//! A support library for case-management applications: address deeply nested,
//! dynamically-shaped records (and the schema definitions describing them)
//! with a compact textual path notation, and render free-text templates
//! against those records.
//!
//! # Path Notation
//!
//! Fields are addressed by dot-separated chains, with selectors for
//! collection items and bracketed names for record metadata:
//!
//! - `applicant.address.postcode`: nested field
//! - `addresses[2].value.postcode`: collection item by position
//! - `addresses[id:home].value.postcode`: collection item by identifier
//! - `addresses[].value.postcode`: any item (definition lookups)
//! - `[state]`, `[case_reference]`: record metadata, aliases included
//! - `@.postcode`: relative to a context's base path
//!
//! The same notation resolves against two kinds of tree: a definition tree
//! yields field *definitions*, a record yields field *values*. Lookups
//! degrade gracefully; the only hard failure anywhere is a dynamic path
//! argument of an unsupported shape; every "missing" condition is a soft
//! `None`, including ACL-gated definitions (deliberately indistinguishable
//! from absent ones).
//!
//! # Core Modules
//!
//! - [`path`] - Path grammar: segments, selectors, relative markers, path shapes
//! - [`metadata`] - Metadata pseudo-fields and their alias table
//! - [`acl`] - Role → CRUD-bitmask ACLs and the predicate the extractor consumes
//! - [`extract`] - The [`Extract`] trait and multi-path fan-out
//! - [`definition`] - Definition trees and the schema-side extractor
//! - [`record`] - The record-side extractor
//! - [`relative`] - Relative-path decoration of any extractor
//! - [`template`] - Record-context template rendering and path discovery
//!
//! # Examples
//!
//! ```
//! use casepath::{Extract, RecordExtractor, TemplateRenderer};
//! use serde_json::json;
//!
//! let record = json!({
//!     "state": "open",
//!     "data": {
//!         "applicant": {"firstName": "Henry"},
//!         "addresses": [
//!             {"id": "home", "value": {"postcode": "AA0 0AA"}},
//!             {"id": "work", "value": {"postcode": "BB0 0BB"}},
//!         ],
//!     },
//! });
//!
//! let extractor = RecordExtractor::new(record);
//! assert_eq!(extractor.extract_one("applicant.firstName"), Some(json!("Henry")));
//! assert_eq!(
//!     extractor.extract_one("addresses[id:work].value.postcode"),
//!     Some(json!("BB0 0BB"))
//! );
//! assert_eq!(extractor.extract_one("[state]"), Some(json!("open")));
//!
//! let renderer = TemplateRenderer::new(extractor);
//! let output = renderer
//!     .render("{{#addresses}}- {{@.value.postcode}}\n{{/addresses}}")
//!     .unwrap();
//! assert_eq!(output, "- AA0 0AA\n- BB0 0BB\n");
//! ```

pub mod acl;
pub mod definition;
pub mod extract;
pub mod metadata;
pub mod path;
pub mod record;
pub mod relative;
pub mod template;

pub use definition::{DefinitionExtractor, DefinitionTree, ExtractOptions, FieldDefinition};
pub use extract::{Extract, Extracted};
pub use metadata::Metadata;
pub use path::{PathArg, PathError};
pub use record::RecordExtractor;
pub use relative::RelativeExtractor;
pub use template::{TemplateError, TemplateRenderer, parse_paths};
