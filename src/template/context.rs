//! Per-render lookup state.
//!
//! A [`RenderContext`] pairs the extractor a render runs against with a memo
//! of the most recent `(path, value)` lookup. The memo is what turns a
//! template section into a relative scope: when the engine enters the body of
//! a section, the context derives the section's base path from the lookup
//! that opened it and wraps the extractor accordingly.
//!
//! Contexts are owned by exactly one render invocation and each nested scope
//! gets a fresh one; sibling scopes never share a memo.

use std::rc::Rc;

use serde_json::Value;

use crate::extract::Extract;
use crate::relative::RelativeExtractor;

/// Suffix coercing a looked-up value to a boolean.
const COERCE_BOOL_SUFFIX: char = '?';

/// The affirmative token recognised by boolean coercion.
const TRUTHY_TOKEN: &str = "yes";

/// Lookup and scoping state for one render invocation.
pub(super) struct RenderContext {
    extractor: Rc<dyn Extract<Output = Value>>,
    last_lookup: Option<(String, Value)>,
}

impl RenderContext {
    pub(super) fn new(extractor: Rc<dyn Extract<Output = Value>>) -> Self {
        RenderContext {
            extractor,
            last_lookup: None,
        }
    }

    /// Resolve a template path, remembering it as the most recent lookup.
    ///
    /// A trailing `?` coerces the result to a boolean: true iff the value is
    /// a string case-insensitively equal to `yes`; anything else, including
    /// non-strings and misses, is false. Missing values resolve to `Null`.
    pub(super) fn lookup(&mut self, path: &str) -> Value {
        if let Some(stripped) = path.strip_suffix(COERCE_BOOL_SUFFIX) {
            let value = self
                .extractor
                .extract_one(stripped)
                .unwrap_or(Value::Null);
            let truthy = value
                .as_str()
                .is_some_and(|text| text.eq_ignore_ascii_case(TRUTHY_TOKEN));
            self.last_lookup = Some((stripped.to_string(), value));
            return Value::Bool(truthy);
        }

        let value = self.extractor.extract_one(path).unwrap_or(Value::Null);
        self.last_lookup = Some((path.to_string(), value.clone()));
        value
    }

    /// Enter a nested scope for a value the engine just looked up.
    ///
    /// The child context resolves relative paths against the base computed
    /// from the memoized lookup, over the same underlying extractor.
    pub(super) fn push(&self, view: &Value) -> RenderContext {
        let base_path = self.path_for_view(view);
        let nested = RelativeExtractor::new(Rc::clone(&self.extractor), base_path);
        RenderContext::new(Rc::new(nested))
    }

    /// Base path for a scope entered on `view`: when the last lookup was an
    /// array, the path of the entered element within it; otherwise the last
    /// looked-up path itself.
    fn path_for_view(&self, view: &Value) -> String {
        match &self.last_lookup {
            Some((path, Value::Array(items))) => items
                .iter()
                .position(|item| item == view)
                .map_or_else(|| path.clone(), |index| format!("{path}[{index}]")),
            Some((path, _)) => path.clone(),
            None => String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordExtractor;
    use serde_json::json;

    fn context(data: Value) -> RenderContext {
        RenderContext::new(Rc::new(RecordExtractor::new(json!({"data": data}))))
    }

    #[test]
    fn test_lookup_resolves_and_memoizes() {
        let mut ctx = context(json!({"a": {"b": "v"}}));
        assert_eq!(ctx.lookup("a.b"), json!("v"));
        assert_eq!(ctx.lookup("a.missing"), Value::Null);
    }

    #[test]
    fn test_lookup_coerces_with_suffix() {
        let mut ctx = context(json!({"flag": "Yes", "other": "no", "count": 1}));
        assert_eq!(ctx.lookup("flag?"), json!(true));
        assert_eq!(ctx.lookup("other?"), json!(false));
        // Non-strings and misses coerce to false
        assert_eq!(ctx.lookup("count?"), json!(false));
        assert_eq!(ctx.lookup("missing?"), json!(false));
    }

    #[test]
    fn test_push_on_object_scopes_to_looked_up_path() {
        let mut ctx = context(json!({"applicant": {"firstName": "Henry"}}));
        let entered = ctx.lookup("applicant");
        let mut scope = ctx.push(&entered);
        assert_eq!(scope.lookup("@.firstName"), json!("Henry"));
    }

    #[test]
    fn test_push_on_array_scopes_to_entered_element() {
        let mut ctx = context(json!({"items": [{"v": 1}, {"v": 2}]}));
        let items = ctx.lookup("items");
        let entered = &items.as_array().unwrap()[1];
        let mut scope = ctx.push(entered);
        assert_eq!(scope.lookup("@.v"), json!(2));
    }

    #[test]
    fn test_sibling_scopes_do_not_share_memo() {
        let mut ctx = context(json!({"items": [{"v": 1}, {"v": 2}]}));
        let items = ctx.lookup("items");
        let array = items.as_array().unwrap();
        let mut first = ctx.push(&array[0]);
        let mut second = ctx.push(&array[1]);
        assert_eq!(first.lookup("@.v"), json!(1));
        assert_eq!(second.lookup("@.v"), json!(2));
    }
}
