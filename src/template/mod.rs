//! Template rendering in the context of a record.
//!
//! Templates use field paths as the notation for variable interpolation and
//! section scoping, with mustache syntax: `{{path}}` interpolates, `{{#path}}`
//! opens a conditional or iterated section, `{{^path}}` an inverted one. A
//! trailing `?` on a path coerces the value to a boolean (`yes`, any case).
//!
//! Sections rebase relative paths: inside `{{#addresses}}…{{/addresses}}`,
//! `{{@.postcode}}` resolves against the entered address. Iterating a
//! collection enters one scope per item.
//!
//! ```
//! use casepath::{RecordExtractor, TemplateRenderer};
//! use serde_json::json;
//!
//! let extractor = RecordExtractor::new(json!({
//!     "data": {"items": [{"id": "x", "v": 1}, {"id": "y", "v": 2}]},
//! }));
//! let renderer = TemplateRenderer::new(extractor);
//! let output = renderer.render("{{#items}}-{{@.v}}\n{{/items}}").unwrap();
//! assert_eq!(output, "-1\n-2\n");
//! ```
//!
//! Missing data never fails a render; it produces empty output or a skipped
//! section. Only malformed template syntax errors.

mod context;
mod engine;
mod error;

pub use error::TemplateError;

use std::rc::Rc;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::extract::Extract;

use context::RenderContext;

/// Interpolation and section-opener tags, capturing the inner path token.
static TEMPLATE_VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\{?[#^]?((?:@\.)?[A-Za-z0-9._\[\]:]+)\??\}?\}\}")
        .expect("valid template value pattern")
});

/// Renders templates against a record through its extractor.
///
/// Each render constructs a fresh render context; renderers hold no
/// per-render state and may be reused across templates.
pub struct TemplateRenderer {
    extractor: Rc<dyn Extract<Output = Value>>,
}

impl TemplateRenderer {
    /// Build a renderer over the given record (or relative) extractor.
    pub fn new(extractor: impl Extract<Output = Value> + 'static) -> Self {
        TemplateRenderer {
            extractor: Rc::new(extractor),
        }
    }

    /// Render `template`, resolving every path through the extractor.
    pub fn render(&self, template: &str) -> Result<String, TemplateError> {
        let nodes = engine::parse(template)?;
        let mut context = RenderContext::new(Rc::clone(&self.extractor));
        let mut out = String::new();
        engine::render(&nodes, &mut context, &mut out);
        Ok(out)
    }
}

/// Extract every field path referenced by a template, without rendering.
///
/// Scans the raw source for variable interpolations and section openers
/// (truthy and inverted), in source order, duplicates included. Relative
/// markers are kept; a trailing boolean-coercion `?` is stripped.
///
/// # Examples
///
/// ```
/// use casepath::template::parse_paths;
///
/// let paths = parse_paths("{{a.b}} {{#items}}{{@.v?}}{{/items}}");
/// assert_eq!(paths, vec!["a.b", "items", "@.v"]);
/// ```
pub fn parse_paths(template: &str) -> Vec<String> {
    TEMPLATE_VALUE_PATTERN
        .captures_iter(template)
        .map(|capture| capture[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordExtractor;
    use serde_json::json;

    fn renderer(data: Value) -> TemplateRenderer {
        TemplateRenderer::new(RecordExtractor::new(json!({"data": data})))
    }

    #[test]
    fn test_parse_paths_returns_all_referenced_paths_in_order() {
        let template = "
      Regular field path: {{applicant.firstName}}
      Coerced boolean field path: {{hasDisability?}}
      Section:
        {{#address}}
          Relative address field: {{@.postcode}}
          Root field: {{applicant.lastName}}
        {{/address}}
    ";
        assert_eq!(
            parse_paths(template),
            vec![
                "applicant.firstName",
                "hasDisability", // coercion suffix trimmed
                "address",
                "@.postcode",
                "applicant.lastName",
            ]
        );
    }

    #[test]
    fn test_parse_paths_keeps_duplicates_and_selectors() {
        let template = "{{a}}{{a}}{{^items[id:x].v?}}{{/items[id:x].v?}}";
        assert_eq!(parse_paths(template), vec!["a", "a", "items[id:x].v"]);
    }

    #[test]
    fn test_renders_variables() {
        let render = renderer(json!({"firstName": "Henry", "lastName": "Tudor"}));
        assert_eq!(
            render.render("Hello {{firstName}} {{lastName}}").unwrap(),
            "Hello Henry Tudor"
        );
    }

    #[test]
    fn test_missing_variable_renders_empty() {
        let render = renderer(json!({}));
        assert_eq!(render.render("Hello {{firstName}}!").unwrap(), "Hello !");
    }

    #[test]
    fn test_escapes_html_unless_tripled() {
        let render = renderer(json!({"note": "a<b & \"c\""}));
        assert_eq!(
            render.render("{{note}}").unwrap(),
            "a&lt;b &amp; &quot;c&quot;"
        );
        assert_eq!(render.render("{{{note}}}").unwrap(), "a<b & \"c\"");
    }

    #[test]
    fn test_conditional_section() {
        let cases = [
            (json!({}), ""),
            (json!({"field1": null}), ""),
            (json!({"field1": ""}), ""),
            (json!({"field1": "any string"}), "Section"),
        ];
        for (data, expected) in cases {
            let render = renderer(data.clone());
            assert_eq!(
                render.render("{{#field1}}Section{{/field1}}").unwrap(),
                expected,
                "data: {data}"
            );
        }
    }

    #[test]
    fn test_inverted_section() {
        let cases = [
            (json!({}), "Section"),
            (json!({"field1": null}), "Section"),
            (json!({"field1": ""}), "Section"),
            (json!({"field1": "any string"}), ""),
        ];
        for (data, expected) in cases {
            let render = renderer(data.clone());
            assert_eq!(
                render.render("{{^field1}}Section{{/field1}}").unwrap(),
                expected,
                "data: {data}"
            );
        }
    }

    #[test]
    fn test_section_on_complex_rebases_relative_paths() {
        let render = renderer(json!({
            "applicant": {"firstName": "Henry", "lastName": "Tudor"},
        }));
        assert_eq!(
            render
                .render("{{#applicant}}Hello {{@.firstName}} {{@.lastName}}{{/applicant}}")
                .unwrap(),
            "Hello Henry Tudor"
        );
    }

    #[test]
    fn test_section_on_missing_complex_renders_nothing() {
        let render = renderer(json!({}));
        assert_eq!(
            render
                .render("{{#applicant}}Hello {{@.firstName}}{{/applicant}}")
                .unwrap(),
            ""
        );
    }

    #[test]
    fn test_repeated_section_scopes_each_item() {
        let render = renderer(json!({
            "addresses": [
                {"value": {"postcode": "AA0 0AA"}},
                {"value": {"postcode": "BB0 0BB"}},
                {"value": {"postcode": "CC0 0CC"}},
            ],
        }));
        assert_eq!(
            render
                .render("{{#addresses}}- {{@.value.postcode}}\n{{/addresses}}")
                .unwrap(),
            "- AA0 0AA\n- BB0 0BB\n- CC0 0CC\n"
        );
    }

    #[test]
    fn test_empty_collection_renders_nothing() {
        let render = renderer(json!({"addresses": []}));
        assert_eq!(
            render
                .render("{{#addresses}}- {{@.value.postcode}}\n{{/addresses}}")
                .unwrap(),
            ""
        );
    }

    #[test]
    fn test_coerced_conditional_section() {
        let cases = [
            (json!({}), ""),
            (json!({"field1": null}), ""),
            (json!({"field1": ""}), ""),
            (json!({"field1": "something"}), ""),
            (json!({"field1": "no"}), ""),
            (json!({"field1": "nO"}), ""),
            (json!({"field1": "yes"}), "Section"),
            (json!({"field1": "yEs"}), "Section"),
        ];
        for (data, expected) in cases {
            let render = renderer(data.clone());
            assert_eq!(
                render.render("{{#field1?}}Section{{/field1?}}").unwrap(),
                expected,
                "data: {data}"
            );
        }
    }

    #[test]
    fn test_coerced_inverted_section() {
        let cases = [
            (json!({}), "Section"),
            (json!({"field1": "no"}), "Section"),
            (json!({"field1": "something"}), "Section"),
            (json!({"field1": "yes"}), ""),
            (json!({"field1": "yEs"}), ""),
        ];
        for (data, expected) in cases {
            let render = renderer(data.clone());
            assert_eq!(
                render.render("{{^field1?}}Section{{/field1?}}").unwrap(),
                expected,
                "data: {data}"
            );
        }
    }

    #[test]
    fn test_render_reports_syntax_errors() {
        let render = renderer(json!({}));
        assert_eq!(
            render.render("{{#a}}x").unwrap_err(),
            TemplateError::UnclosedSection {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_renders_through_a_relative_extractor() {
        use crate::relative::RelativeExtractor;
        use std::rc::Rc;

        let root = Rc::new(RecordExtractor::new(json!({
            "data": {"case": {"applicant": {"firstName": "Henry"}}},
        })));
        let render = TemplateRenderer::new(RelativeExtractor::new(root, "case"));
        assert_eq!(
            render.render("Hello {{@.applicant.firstName}}").unwrap(),
            "Hello Henry"
        );
    }
}
