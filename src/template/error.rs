//! Template syntax errors.
//!
//! Only malformed template source fails: missing data renders as empty or
//! falsy, and never produces an error.

use thiserror::Error;

/// Errors raised while parsing template source.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// A section was opened but never closed.
    #[error("unclosed section '{name}'")]
    UnclosedSection {
        /// Path token of the unclosed section.
        name: String,
    },

    /// A closing tag appeared with no section open.
    #[error("unexpected closing tag '{name}'")]
    UnexpectedClose {
        /// Path token of the stray closing tag.
        name: String,
    },

    /// A section was closed by a tag naming a different section.
    #[error("section '{open}' closed by '{close}'")]
    MismatchedClose {
        /// Path token the section was opened with.
        open: String,
        /// Path token of the closing tag.
        close: String,
    },

    /// A `{{` had no matching `}}` (or `{{{` no `}}}`).
    #[error("unclosed tag at byte {position}")]
    UnclosedTag {
        /// Byte offset of the opening braces in the source.
        position: usize,
    },
}
