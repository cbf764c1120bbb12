//! Scalar coercion for front-matter values

use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Number, Value};

lazy_static! {
    /// Decimal literal: optional sign, digits with optional fraction, optional exponent
    static ref NUMBER: Regex =
        Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid number pattern");
}

/// Untyped tree produced by the line classifier, before coercion
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(String),
    List(Vec<Node>),
    Map(IndexMap<String, Node>),
}

impl Node {
    /// Replace any non-list value with an empty list and return it
    pub(crate) fn make_list(&mut self) -> &mut Vec<Node> {
        if !matches!(self, Node::List(_)) {
            *self = Node::List(Vec::new());
        }
        match self {
            Node::List(items) => items,
            _ => unreachable!("node was just replaced by a list"),
        }
    }

    /// Run the coercion pass over the whole subtree
    pub fn into_value(self) -> Value {
        match self {
            Node::Scalar(raw) => coerce(&raw),
            Node::List(items) => Value::Array(items.into_iter().map(Node::into_value).collect()),
            Node::Map(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, v.into_value()))
                    .collect::<Map<String, Value>>(),
            ),
        }
    }
}

/// Coerce a raw scalar.
///
/// `true`/`false` become booleans, full numeric literals become numbers,
/// matching single or double quotes are stripped, anything else stays a
/// verbatim string.
pub fn coerce(raw: &str) -> Value {
    match raw {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if let Some(number) = parse_number(raw) {
        return Value::Number(number);
    }

    Value::String(unquote(raw).unwrap_or(raw).to_string())
}

fn parse_number(raw: &str) -> Option<Number> {
    if !NUMBER.is_match(raw) {
        return None;
    }
    let is_integer = !raw.contains(['.', 'e', 'E']);
    if is_integer {
        if let Ok(n) = raw.parse::<i64>() {
            return Some(Number::from(n));
        }
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Strip one pair of matching outer quotes
pub(crate) fn unquote(raw: &str) -> Option<&str> {
    if raw.len() < 2 {
        return None;
    }
    ['"', '\'']
        .into_iter()
        .find(|&q| raw.starts_with(q) && raw.ends_with(q))
        .map(|_| &raw[1..raw.len() - 1])
}

/// Render a scalar value as plain text, the way a title or id is read
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
