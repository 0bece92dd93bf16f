//! Minimal mustache-compatible template engine.
//!
//! Covers exactly the constructs the record renderer consumes: escaped
//! (`{{path}}`) and unescaped (`{{{path}}}`, `{{&path}}`) interpolation,
//! sections (`{{#path}}…{{/path}}`), inverted sections (`{{^path}}…{{/path}}`)
//! and comments (`{{!…}}`). No partials, no delimiter switching.
//!
//! The engine owns iteration and conditional inclusion; every value decision
//! (lookup, boolean coercion, scope rebasing) is delegated to the
//! [`RenderContext`](super::context::RenderContext) so path semantics live in
//! one place.

use serde_json::Value;

use super::context::RenderContext;
use super::error::TemplateError;

/// A parsed template node.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Node {
    /// Literal text, emitted verbatim.
    Text(String),
    /// Variable interpolation.
    Variable { path: String, escape: bool },
    /// Conditional/iterated (or inverted) block.
    Section {
        path: String,
        inverted: bool,
        children: Vec<Node>,
    },
}

/// Parse template source into a node tree.
pub(super) fn parse(template: &str) -> Result<Vec<Node>, TemplateError> {
    // Stack of open sections: (path, inverted, nodes preceding the section)
    let mut stack: Vec<(String, bool, Vec<Node>)> = Vec::new();
    let mut current: Vec<Node> = Vec::new();
    let mut position = 0;

    while let Some(found) = template[position..].find("{{") {
        let open = position + found;
        if open > position {
            current.push(Node::Text(template[position..open].to_string()));
        }

        let (content, escape, after) = if template[open..].starts_with("{{{") {
            let start = open + 3;
            let end = start
                + template[start..]
                    .find("}}}")
                    .ok_or(TemplateError::UnclosedTag { position: open })?;
            (template[start..end].trim(), false, end + 3)
        } else {
            let start = open + 2;
            let end = start
                + template[start..]
                    .find("}}")
                    .ok_or(TemplateError::UnclosedTag { position: open })?;
            (template[start..end].trim(), true, end + 2)
        };
        position = after;

        match content.chars().next() {
            Some('#') | Some('^') => {
                let inverted = content.starts_with('^');
                let path = content[1..].trim().to_string();
                stack.push((path, inverted, std::mem::take(&mut current)));
            }
            Some('/') => {
                let close = content[1..].trim();
                let Some((path, inverted, parent)) = stack.pop() else {
                    return Err(TemplateError::UnexpectedClose {
                        name: close.to_string(),
                    });
                };
                if path != close {
                    return Err(TemplateError::MismatchedClose {
                        open: path,
                        close: close.to_string(),
                    });
                }
                let children = std::mem::replace(&mut current, parent);
                current.push(Node::Section {
                    path,
                    inverted,
                    children,
                });
            }
            Some('!') => {} // comment
            Some('&') => current.push(Node::Variable {
                path: content[1..].trim().to_string(),
                escape: false,
            }),
            _ => current.push(Node::Variable {
                path: content.to_string(),
                escape,
            }),
        }
    }

    if let Some((name, _, _)) = stack.pop() {
        return Err(TemplateError::UnclosedSection { name });
    }
    if position < template.len() {
        current.push(Node::Text(template[position..].to_string()));
    }
    Ok(current)
}

/// Render a node tree, driving lookups and scope entry through `context`.
pub(super) fn render(nodes: &[Node], context: &mut RenderContext, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Variable { path, escape } => {
                let text = display(&context.lookup(path));
                if *escape {
                    push_escaped(out, &text);
                } else {
                    out.push_str(&text);
                }
            }
            Node::Section {
                path,
                inverted,
                children,
            } => {
                let value = context.lookup(path);
                if *inverted {
                    if !is_truthy(&value) {
                        render(children, context, out);
                    }
                } else if let Value::Array(items) = &value {
                    for item in items {
                        let mut scope = context.push(item);
                        render(children, &mut scope, out);
                    }
                } else if is_truthy(&value) {
                    let mut scope = context.push(&value);
                    render(children, &mut scope, out);
                }
            }
        }
    }
}

/// Section truthiness: absent values, `false`, empty strings, empty arrays
/// and numeric zero all suppress a section.
pub(super) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Number(number) => number.as_f64() != Some(0.0),
        Value::Object(_) => true,
    }
}

/// Text form of an interpolated value; missing values render as nothing.
fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        // Compound values have no natural text form; emit their JSON
        other => other.to_string(),
    }
}

fn push_escaped(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}
