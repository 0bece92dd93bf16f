//! Relative-path decoration for extractors.
//!
//! Nested structures (complex members, collection items, template sections)
//! need to address their own fields without knowing where they sit in the
//! overall tree. [`RelativeExtractor`] wraps any [`Extract`] implementation
//! with a base path: paths starting with the relative marker are rebased onto
//! it before delegation, everything else passes through and resolves as an
//! absolute path.
//!
//! Decorators stack: the base path may itself be relative, deferring to the
//! next layer down, so deeply nested contexts are built by wrapping rather
//! than by re-deriving absolute paths.

use crate::extract::Extract;
use crate::path::rebase;

/// Decorates an extractor with a base path for relative resolution.
///
/// # Examples
///
/// ```
/// use casepath::{Extract, RecordExtractor, RelativeExtractor};
/// use serde_json::json;
///
/// let root = RecordExtractor::new(json!({
///     "data": {"level0": {"level1": {"field": "nested"}}, "rootField": "root"},
/// }));
/// let level0 = RelativeExtractor::new(&root, "level0");
/// let level1 = RelativeExtractor::new(&level0, "@.level1");
///
/// assert_eq!(level1.extract_one("@.field"), Some(json!("nested")));
/// // Absolute paths pass through untouched
/// assert_eq!(level1.extract_one("rootField"), Some(json!("root")));
/// ```
#[derive(Debug, Clone)]
pub struct RelativeExtractor<E> {
    inner: E,
    base_path: String,
}

impl<E> RelativeExtractor<E> {
    /// Decorate `inner` with `base_path`.
    pub fn new(inner: E, base_path: impl Into<String>) -> Self {
        RelativeExtractor {
            inner,
            base_path: base_path.into(),
        }
    }
}

impl<E: Extract> Extract for RelativeExtractor<E> {
    type Output = E::Output;

    fn extract_one(&self, path: &str) -> Option<Self::Output> {
        self.inner.extract_one(&rebase(path, &self.base_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Extracted;
    use crate::path::PathArg;
    use crate::record::RecordExtractor;
    use serde_json::json;

    #[test]
    fn test_resolves_relative_paths_against_base() {
        let root = RecordExtractor::new(json!({
            "data": {
                "level0": {"field1": "value 1", "field2": "value 2"},
                "rootField": "root value",
            },
        }));
        let level0 = RelativeExtractor::new(&root, "level0");

        // Missing the marker means absolute resolution
        assert_eq!(level0.extract_one("field1"), None);
        assert_eq!(level0.extract_one("@.field1"), Some(json!("value 1")));
        assert_eq!(level0.extract_one("@.rootField"), None);
        assert_eq!(level0.extract_one("rootField"), Some(json!("root value")));
    }

    #[test]
    fn test_bare_marker_resolves_to_whole_base() {
        let root = RecordExtractor::new(json!({
            "data": {"level0": {"field1": "value 1"}},
        }));
        let level0 = RelativeExtractor::new(&root, "level0");
        assert_eq!(
            level0.extract_one("@"),
            Some(json!({"field1": "value 1"}))
        );
    }

    #[test]
    fn test_fan_out_rebases_each_entry() {
        let root = RecordExtractor::new(json!({
            "data": {
                "level0": {"field1": "value 1", "field2": "value 2"},
                "rootField": "root value",
            },
        }));
        let level0 = RelativeExtractor::new(&root, "level0");

        let values = level0.extract(&PathArg::from(vec![
            "field1",
            "@.field1",
            "@.field2",
            "@.rootField",
            "rootField",
        ]));
        assert_eq!(
            values,
            Extracted::Ordered(vec![
                None,
                Some(json!("value 1")),
                Some(json!("value 2")),
                None,
                Some(json!("root value")),
            ])
        );

        let values = level0
            .extract_value(&json!({"a": "@.field1", "b": "field1"}))
            .unwrap()
            .into_keyed()
            .unwrap();
        assert_eq!(values["a"], Some(json!("value 1")));
        assert_eq!(values["b"], None);
    }

    #[test]
    fn test_stacks_arbitrarily_deep() {
        let root = RecordExtractor::new(json!({
            "data": {
                "level0": {
                    "level1": {
                        "level2": {"field1": "value 1", "field2": "value 2"},
                    },
                },
                "rootField": "root value",
            },
        }));
        let level0 = RelativeExtractor::new(&root, "level0");
        let level1 = RelativeExtractor::new(&level0, "@.level1");
        let level2 = RelativeExtractor::new(&level1, "@.level2");

        assert_eq!(level2.extract_one("@.field1"), Some(json!("value 1")));
        assert_eq!(level2.extract_one("@.field2"), Some(json!("value 2")));
        assert_eq!(level2.extract_one("@.rootField"), None);
        assert_eq!(level2.extract_one("rootField"), Some(json!("root value")));
        assert_eq!(level2.extract_one("field1"), None);
    }

    #[test]
    fn test_wrapping_is_equivalent_to_absolute_resolution() {
        let root = RecordExtractor::new(json!({
            "data": {"a": {"b": {"c": "v"}}},
        }));
        let based = RelativeExtractor::new(&root, "a.b");
        assert_eq!(based.extract_one("@.c"), root.extract_one("a.b.c"));
    }
}
