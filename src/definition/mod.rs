//! Definition trees: the schema side of path resolution.
//!
//! A definition tree describes the shape of a record type: its fields (keyed
//! by top-level identifier), its declared states, and its own ACL. Field
//! definitions are tagged by kind: simple leaves, complex fields with named
//! members, and collections whose every item shares one `content` definition.
//! Metadata nodes are never stored in the tree; the extractor synthesizes
//! them on demand.
//!
//! The types here are deliberately plain data with builder-style
//! constructors; normalising raw API payloads into this shape is the caller's
//! concern.

mod extractor;

pub use extractor::{AclPredicate, DefinitionExtractor, ExtractOptions, OptionProvider};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::acl::Acl;

/// A field definition, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field identifier.
    pub id: String,
    /// Display label.
    pub label: Option<String>,
    /// Per-field access control list.
    pub acl: Option<Acl>,
    /// Kind-specific shape.
    pub kind: FieldKind,
}

/// The shape of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FieldKind {
    /// Leaf value, e.g. `text` or `date`.
    Simple {
        /// Concrete leaf type name.
        kind: String,
    },
    /// Nested map of member definitions.
    Complex {
        /// Members keyed by identifier.
        members: HashMap<String, FieldDefinition>,
    },
    /// Homogeneous collection: one `content` definition describes every
    /// item, regardless of how many items a concrete record holds.
    Collection {
        /// Definition shared by all items.
        content: Box<FieldDefinition>,
    },
    /// Synthesized metadata pseudo-field; never physically in a tree.
    Metadata {
        /// Declared value options, where the metadata has any.
        options: Option<Vec<MetadataOption>>,
    },
}

impl FieldDefinition {
    /// A simple leaf field.
    pub fn simple(id: impl Into<String>, kind: impl Into<String>) -> Self {
        FieldDefinition {
            id: id.into(),
            label: None,
            acl: None,
            kind: FieldKind::Simple { kind: kind.into() },
        }
    }

    /// A complex field with the given members.
    pub fn complex(
        id: impl Into<String>,
        members: impl IntoIterator<Item = FieldDefinition>,
    ) -> Self {
        FieldDefinition {
            id: id.into(),
            label: None,
            acl: None,
            kind: FieldKind::Complex {
                members: members
                    .into_iter()
                    .map(|member| (member.id.clone(), member))
                    .collect(),
            },
        }
    }

    /// A collection whose items all share `content`.
    pub fn collection(id: impl Into<String>, content: FieldDefinition) -> Self {
        FieldDefinition {
            id: id.into(),
            label: None,
            acl: None,
            kind: FieldKind::Collection {
                content: Box::new(content),
            },
        }
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the field's ACL.
    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = Some(acl);
        self
    }

    /// The member map of a complex field, if this is one.
    pub fn members(&self) -> Option<&HashMap<String, FieldDefinition>> {
        match &self.kind {
            FieldKind::Complex { members } => Some(members),
            _ => None,
        }
    }
}

/// A declared state of the record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDefinition {
    /// State identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Declared ordering weight; states without one sort last.
    pub order: Option<i64>,
    /// Per-state access control list.
    pub acl: Option<Acl>,
}

impl StateDefinition {
    /// A state with the given identifier and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        StateDefinition {
            id: id.into(),
            name: name.into(),
            order: None,
            acl: None,
        }
    }

    /// Set the ordering weight.
    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the state's ACL.
    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = Some(acl);
        self
    }
}

/// An option of a metadata pseudo-field, e.g. one selectable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataOption {
    /// Stored value.
    pub code: String,
    /// Display label.
    pub label: String,
}

impl MetadataOption {
    /// An option pairing `code` with `label`.
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        MetadataOption {
            code: code.into(),
            label: label.into(),
        }
    }
}

/// What workspace/type option providers return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderOption {
    /// Option identifier, mapped to [`MetadataOption::code`].
    pub id: String,
    /// Option name, mapped to [`MetadataOption::label`].
    pub name: String,
}

impl ProviderOption {
    /// An option pairing `id` with `name`.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        ProviderOption {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A record type's definition tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionTree {
    /// The type's own ACL, carried by synthesized metadata nodes.
    pub acl: Option<Acl>,
    /// Declared states, in declaration order.
    pub states: Vec<StateDefinition>,
    /// Top-level fields keyed by identifier.
    pub fields: HashMap<String, FieldDefinition>,
}

impl DefinitionTree {
    /// A tree holding the given top-level fields.
    pub fn new(fields: impl IntoIterator<Item = FieldDefinition>) -> Self {
        DefinitionTree {
            acl: None,
            states: Vec::new(),
            fields: fields
                .into_iter()
                .map(|field| (field.id.clone(), field))
                .collect(),
        }
    }

    /// Set the tree's ACL.
    pub fn with_acl(mut self, acl: Acl) -> Self {
        self.acl = Some(acl);
        self
    }

    /// Set the declared states.
    pub fn with_states(mut self, states: impl IntoIterator<Item = StateDefinition>) -> Self {
        self.states = states.into_iter().collect();
        self
    }
}
