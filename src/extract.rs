//! The common extraction contract shared by all path interpreters.
//!
//! [`Extract`] is the seam between the grammar and its interpreters: the
//! definition extractor, the record extractor and the relative decorator all
//! implement it, which is what lets them compose freely (a relative extractor
//! wraps any of the others, the render context holds one behind a trait
//! object).
//!
//! Single-path resolution is the only required method; multi-path fan-out is
//! provided on top of it and mirrors the shape of the input: a list of paths
//! yields a list of results in the same order, a keyed map yields a map with
//! the same keys. Entries resolve independently; one miss never short-circuits
//! the others.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::Value;

use crate::path::{PathArg, PathError};

/// Extraction results, in the shape the paths were provided in.
#[derive(Debug, Clone, PartialEq)]
pub enum Extracted<T> {
    /// Result of a single path.
    Single(Option<T>),
    /// Results of an ordered list of paths, in input order.
    Ordered(Vec<Option<T>>),
    /// Results of a keyed map of paths, under the input keys.
    Keyed(BTreeMap<String, Option<T>>),
}

impl<T> Extracted<T> {
    /// Unwrap a [`Extracted::Single`] result; `None` for the other shapes.
    pub fn into_single(self) -> Option<T> {
        match self {
            Extracted::Single(value) => value,
            _ => None,
        }
    }

    /// Unwrap an [`Extracted::Ordered`] result; `None` for the other shapes.
    pub fn into_ordered(self) -> Option<Vec<Option<T>>> {
        match self {
            Extracted::Ordered(values) => Some(values),
            _ => None,
        }
    }

    /// Unwrap an [`Extracted::Keyed`] result; `None` for the other shapes.
    pub fn into_keyed(self) -> Option<BTreeMap<String, Option<T>>> {
        match self {
            Extracted::Keyed(values) => Some(values),
            _ => None,
        }
    }
}

/// A path interpreter over some tree.
pub trait Extract {
    /// What a successfully resolved path yields.
    type Output;

    /// Resolve one path; `None` for every kind of miss.
    fn extract_one(&self, path: &str) -> Option<Self::Output>;

    /// Resolve one or many paths, mirroring the input shape.
    fn extract(&self, path: &PathArg) -> Extracted<Self::Output> {
        match path {
            PathArg::Single(path) => Extracted::Single(self.extract_one(path)),
            PathArg::Ordered(paths) => {
                Extracted::Ordered(paths.iter().map(|path| self.extract_one(path)).collect())
            }
            PathArg::Keyed(paths) => Extracted::Keyed(
                paths
                    .iter()
                    .map(|(key, path)| (key.clone(), self.extract_one(path)))
                    .collect(),
            ),
        }
    }

    /// Resolve a dynamic JSON path value.
    ///
    /// This is the crate's single hard failure: a value that is not a
    /// string, a list of strings, or a string-keyed map of strings is
    /// rejected with [`PathError::UnsupportedPath`].
    fn extract_value(&self, path: &Value) -> Result<Extracted<Self::Output>, PathError> {
        Ok(self.extract(&PathArg::try_from(path)?))
    }
}

impl<E: Extract + ?Sized> Extract for &E {
    type Output = E::Output;

    fn extract_one(&self, path: &str) -> Option<Self::Output> {
        (**self).extract_one(path)
    }
}

impl<E: Extract + ?Sized> Extract for Rc<E> {
    type Output = E::Output;

    fn extract_one(&self, path: &str) -> Option<Self::Output> {
        (**self).extract_one(path)
    }
}
