//! Filter Predicates
//!
//! A typed predicate tree that is translated mechanically into store query
//! parameters. User-supplied text only ever enters a query as a quoted,
//! escaped value, never as structure, so a malicious query string cannot
//! alter the shape of the predicate.
//!
//! The same tree is evaluated directly against JSON rows by the in-memory
//! backend, which keeps both backends agreeing on match semantics.

use super::types::Row;
use serde_json::Value;

#[derive(Debug, Clone)]
pub enum Filter {
    /// Matches every row.
    All,
    /// Field equals the given value.
    Eq(String, Value),
    /// Field differs from the given value; missing and null fields do not
    /// match, mirroring SQL null semantics.
    Neq(String, Value),
    /// Case-insensitive substring match on a text field.
    Contains(String, String),
    /// Array field holds the given element exactly.
    HasElement(String, String),
    /// Every child predicate holds.
    And(Vec<Filter>),
    /// At least one child predicate holds.
    Or(Vec<Filter>),
}

impl Filter {
    /// Renders the tree as top-level query parameters in the REST dialect.
    ///
    /// Top-level conjunction becomes one parameter per clause; disjunctions
    /// collapse into a single `or=(...)` parameter with nested groups spelled
    /// inline.
    pub fn to_params(&self) -> Vec<(String, String)> {
        match self {
            Filter::All => Vec::new(),
            Filter::And(children) => children.iter().flat_map(Filter::to_params).collect(),
            Filter::Or(children) => {
                vec![("or".to_string(), format!("({})", render_group(children)))]
            }
            Filter::Eq(field, value) => vec![(field.clone(), format!("eq.{}", literal(value)))],
            Filter::Neq(field, value) => vec![(field.clone(), format!("neq.{}", literal(value)))],
            Filter::Contains(field, text) => {
                vec![(field.clone(), format!("ilike.{}", pattern(text)))]
            }
            Filter::HasElement(field, element) => {
                vec![(field.clone(), format!("cs.{{{}}}", quoted(element)))]
            }
        }
    }

    fn render_inline(&self) -> Option<String> {
        match self {
            Filter::All => None,
            Filter::Eq(field, value) => Some(format!("{}.eq.{}", field, literal(value))),
            Filter::Neq(field, value) => Some(format!("{}.neq.{}", field, literal(value))),
            Filter::Contains(field, text) => Some(format!("{}.ilike.{}", field, pattern(text))),
            Filter::HasElement(field, element) => {
                Some(format!("{}.cs.{{{}}}", field, quoted(element)))
            }
            Filter::And(children) => Some(format!("and({})", render_group(children))),
            Filter::Or(children) => Some(format!("or({})", render_group(children))),
        }
    }

    /// Evaluates the predicate against one row.
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(field, value) => row.get(field).map(|v| v == value).unwrap_or(false),
            Filter::Neq(field, value) => row
                .get(field)
                .map(|v| !v.is_null() && v != value)
                .unwrap_or(false),
            Filter::Contains(field, text) => row
                .get(field)
                .and_then(Value::as_str)
                .map(|v| v.to_lowercase().contains(&text.to_lowercase()))
                .unwrap_or(false),
            Filter::HasElement(field, element) => row
                .get(field)
                .and_then(Value::as_array)
                .map(|items| items.iter().any(|item| item.as_str() == Some(element.as_str())))
                .unwrap_or(false),
            Filter::And(children) => children.iter().all(|child| child.matches(row)),
            Filter::Or(children) => children.iter().any(|child| child.matches(row)),
        }
    }
}

fn render_group(children: &[Filter]) -> String {
    let rendered: Vec<String> = children.iter().filter_map(Filter::render_inline).collect();
    rendered.join(",")
}

fn literal(value: &Value) -> String {
    match value {
        Value::String(text) => quoted(text),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        other => quoted(&other.to_string()),
    }
}

/// Wraps the text in wildcards for a substring match. Pattern
/// metacharacters inside the text are escaped first, so the rendered query
/// matches them as ordinary characters the way [`Filter::matches`] does.
fn pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
        .replace('*', "\\*");
    quoted(&format!("*{}*", escaped))
}

/// Always double-quotes the value and escapes embedded quotes and
/// backslashes, so the value cannot terminate early or introduce operators.
fn quoted(text: &str) -> String {
    format!("\"{}\"", text.replace('\\', "\\\\").replace('"', "\\\""))
}
