//! Metadata pseudo-fields and their alias table.
//!
//! Records carry a fixed set of top-level attributes (workspace, type, state,
//! reference, classification and the two timestamps) that are not part of the
//! data payload but can still be addressed through the path notation, wrapped
//! in square brackets: `[state]`, `[reference]`, …
//!
//! Several names survive from older API generations, so each canonical
//! metadata has a set of case-insensitive aliases. Both the definition and
//! the record extractor resolve aliases through this single table so the two
//! sides can never drift apart.

/// Canonical metadata pseudo-fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metadata {
    /// Workspace (legacy: organisation, jurisdiction).
    Workspace,
    /// Case type (legacy: case_type).
    Type,
    /// Current state.
    State,
    /// Unique reference (legacy: reference, case_reference).
    Id,
    /// Security classification.
    Classification,
    /// Creation timestamp (legacy: created, created_date).
    CreatedAt,
    /// Last-modified timestamp (legacy: modified, last_modified).
    LastModifiedAt,
}

impl Metadata {
    /// Resolve a bracketed metadata reference, e.g. `[Case_Reference]`.
    ///
    /// Returns `None` for anything that is not a well-formed reference to a
    /// known metadata: unknown names are a soft miss, not an error.
    pub fn from_path(path: &str) -> Option<Self> {
        let name = path.strip_prefix('[')?.strip_suffix(']')?;
        Self::from_alias(name)
    }

    /// Resolve a bare metadata name or alias, case-insensitively.
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias.to_ascii_lowercase().as_str() {
            "workspace" | "organisation" | "jurisdiction" => Some(Metadata::Workspace),
            "type" | "case_type" => Some(Metadata::Type),
            "state" => Some(Metadata::State),
            "id" | "reference" | "case_reference" => Some(Metadata::Id),
            "classification" | "security_classification" => Some(Metadata::Classification),
            "createdat" | "created" | "created_date" => Some(Metadata::CreatedAt),
            "lastmodifiedat" | "lastmodified" | "modified" | "last_modified" => {
                Some(Metadata::LastModifiedAt)
            }
            _ => None,
        }
    }

    /// Bracketed canonical identifier used for synthesized definition nodes.
    pub fn id(&self) -> &'static str {
        match self {
            Metadata::Workspace => "[workspace]",
            Metadata::Type => "[type]",
            Metadata::State => "[state]",
            Metadata::Id => "[id]",
            Metadata::Classification => "[classification]",
            Metadata::CreatedAt => "[createdAt]",
            Metadata::LastModifiedAt => "[lastModifiedAt]",
        }
    }

    /// Human-readable label used for synthesized definition nodes.
    pub fn label(&self) -> &'static str {
        match self {
            Metadata::Workspace => "Workspace",
            Metadata::Type => "Type",
            Metadata::State => "State",
            Metadata::Id => "Reference",
            Metadata::Classification => "Classification",
            Metadata::CreatedAt => "Created",
            Metadata::LastModifiedAt => "Last modified",
        }
    }

    /// Top-level record attribute holding this metadata's value.
    pub fn record_attribute(&self) -> &'static str {
        match self {
            Metadata::Workspace => "jurisdiction",
            Metadata::Type => "case_type_id",
            Metadata::State => "state",
            Metadata::Id => "id",
            Metadata::Classification => "security_classification",
            Metadata::CreatedAt => "created_date",
            Metadata::LastModifiedAt => "last_modified",
        }
    }
}
