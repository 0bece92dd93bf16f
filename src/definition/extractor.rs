//! Definition-side path interpreter.
//!
//! Resolves path expressions against a [`DefinitionTree`] instead of a
//! record: the result of a lookup is the definition of the addressed field,
//! not its value. Collection selectors never pick a concrete item here: a
//! collection has exactly one `content` definition, so `items[2].value` and
//! `items[id:abc].value` resolve to the same node.
//!
//! An optional ACL predicate gates every resolved node; a gated node is
//! indistinguishable from one that does not exist, so callers cannot probe
//! for fields they are not allowed to see.

use std::collections::HashMap;

use tracing::trace;

use crate::acl::Acl;
use crate::extract::Extract;
use crate::metadata::Metadata;
use crate::path::{self, Segment, split_segments};

use super::{DefinitionTree, FieldDefinition, FieldKind, MetadataOption, ProviderOption};

/// Opaque boolean gate over a node's ACL, supplied by the caller.
pub type AclPredicate<'a> = Box<dyn Fn(&Acl) -> bool + 'a>;

/// Supplier of workspace/type options, called with no arguments.
pub type OptionProvider<'a> = Box<dyn Fn() -> Vec<ProviderOption> + 'a>;

/// Optional configuration for a [`DefinitionExtractor`].
///
/// State options need no provider: they come from the tree's own declared
/// states.
#[derive(Default)]
pub struct ExtractOptions<'a> {
    /// Gate applied to every resolved node's own ACL. When set, a node
    /// without an ACL is gated too.
    pub check_acl: Option<AclPredicate<'a>>,
    /// Options for the `[workspace]` metadata; empty list when absent.
    pub workspace_provider: Option<OptionProvider<'a>>,
    /// Options for the `[type]` metadata; empty list when absent.
    pub type_provider: Option<OptionProvider<'a>>,
}

/// Path interpreter over a definition tree.
///
/// # Examples
///
/// ```
/// use casepath::definition::{DefinitionExtractor, DefinitionTree, FieldDefinition};
/// use casepath::Extract;
///
/// let tree = DefinitionTree::new([FieldDefinition::complex(
///     "applicant",
///     [FieldDefinition::simple("firstName", "text")],
/// )]);
/// let extractor = DefinitionExtractor::new(&tree);
///
/// let member = extractor.extract_one("applicant.firstName").unwrap();
/// assert_eq!(member.id, "firstName");
/// assert_eq!(extractor.extract_one("applicant.lastName"), None);
/// ```
pub struct DefinitionExtractor<'t> {
    tree: &'t DefinitionTree,
    options: ExtractOptions<'t>,
}

impl<'t> DefinitionExtractor<'t> {
    /// Bind an extractor to a tree with default options.
    pub fn new(tree: &'t DefinitionTree) -> Self {
        Self::with_options(tree, ExtractOptions::default())
    }

    /// Bind an extractor to a tree with the given options.
    pub fn with_options(tree: &'t DefinitionTree, options: ExtractOptions<'t>) -> Self {
        DefinitionExtractor { tree, options }
    }

    /// Discard nodes whose own ACL fails the configured predicate.
    fn gate(&self, definition: FieldDefinition) -> Option<FieldDefinition> {
        match &self.options.check_acl {
            Some(check) => {
                let allowed = definition.acl.as_ref().is_some_and(|acl| check(acl));
                if allowed {
                    Some(definition)
                } else {
                    trace!(id = %definition.id, "definition gated by ACL");
                    None
                }
            }
            None => Some(definition),
        }
    }

    fn metadata_node(&self, path: &str) -> Option<FieldDefinition> {
        let metadata = Metadata::from_path(path)?;

        let options = match metadata {
            Metadata::Workspace => Some(provided(&self.options.workspace_provider)),
            Metadata::Type => Some(provided(&self.options.type_provider)),
            Metadata::State => Some(self.state_options()),
            Metadata::Classification => Some(vec![
                MetadataOption::new("PUBLIC", "Public"),
                MetadataOption::new("PRIVATE", "Private"),
                MetadataOption::new("RESTRICTED", "Restricted"),
            ]),
            _ => None,
        };

        Some(FieldDefinition {
            id: metadata.id().to_string(),
            label: Some(metadata.label().to_string()),
            acl: self.tree.acl.clone(),
            kind: FieldKind::Metadata { options },
        })
    }

    /// Declared states as options, sorted by declared order and filtered by
    /// the ACL predicate applied to each state's own ACL.
    fn state_options(&self) -> Vec<MetadataOption> {
        let mut states: Vec<_> = self.tree.states.iter().collect();
        states.sort_by_key(|state| state.order.unwrap_or(i64::MAX));

        if let Some(check) = &self.options.check_acl {
            states.retain(|state| state.acl.as_ref().is_some_and(|acl| check(acl)));
        }

        states
            .into_iter()
            .map(|state| MetadataOption::new(state.id.clone(), state.name.clone()))
            .collect()
    }

    fn resolve_chain(&self, path: &str) -> Option<FieldDefinition> {
        resolve(&self.tree.fields, &split_segments(path))
    }
}

impl Extract for DefinitionExtractor<'_> {
    type Output = FieldDefinition;

    fn extract_one(&self, path: &str) -> Option<FieldDefinition> {
        let definition = if path::is_metadata(path) {
            self.metadata_node(path)?
        } else {
            self.resolve_chain(path)?
        };
        self.gate(definition)
    }
}

fn provided(provider: &Option<OptionProvider<'_>>) -> Vec<MetadataOption> {
    provider
        .as_ref()
        .map(|supply| {
            supply()
                .into_iter()
                .map(|option| MetadataOption::new(option.id, option.name))
                .collect()
        })
        .unwrap_or_default()
}

fn resolve(
    fields: &HashMap<String, FieldDefinition>,
    segments: &[Segment],
) -> Option<FieldDefinition> {
    let (head, tail) = segments.split_first()?;
    let definition = find_definition(fields, head)?;

    if tail.is_empty() {
        return Some(definition);
    }
    match &definition.kind {
        FieldKind::Complex { members } => resolve(members, tail),
        _ => None,
    }
}

fn find_definition(
    fields: &HashMap<String, FieldDefinition>,
    segment: &Segment,
) -> Option<FieldDefinition> {
    let definition = fields.get(&segment.name)?;

    if segment.selector.is_none() {
        return Some(definition.clone());
    }

    // Any selector hops into the collection's single content definition;
    // which item it names is irrelevant schema-side. Record payloads store
    // items as `{id, value}`, so the content surfaces as the `value` member
    // of a synthetic complex node.
    let FieldKind::Collection { content } = &definition.kind else {
        trace!(id = %definition.id, "collection selector applied to non-collection");
        return None;
    };
    Some(FieldDefinition {
        id: definition.id.clone(),
        label: None,
        acl: None,
        kind: FieldKind::Complex {
            members: HashMap::from([("value".to_string(), (**content).clone())]),
        },
    })
}
