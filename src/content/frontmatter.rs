//! Front-matter parsing
//!
//! A document may start with a `---` delimited metadata block. The block is
//! read by a two-state line machine (top level / inside a list item) that
//! builds an untyped [`Node`] tree; [`Node::into_value`] then types the
//! scalars. Parsing never fails: anything the machine cannot place is
//! reported as a [`Diagnostic`] and skipped.

use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;

use super::lexer::{self, Line};
use super::value::Node;

const OPEN: &str = "---\n";
const CLOSE: &str = "\n---\n";
const CLOSE_AT_EOF: &str = "\n---";

/// A metadata line the parser could not place
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("line {line}: list item `{text}` has no key to attach to")]
    ItemWithoutKey { line: usize, text: String },

    #[error("line {line}: indented property `{key}` is not inside a list item")]
    OrphanProperty { line: usize, key: String },

    #[error("line {line}: nested block under `{key}` is not supported")]
    NestedBlock { line: usize, key: String },

    #[error("line {line}: cannot interpret `{text}`")]
    Unrecognized { line: usize, text: String },

    #[error("field `{field}`: {message}")]
    InvalidField { field: String, message: String },
}

/// Result of splitting and reading a document
#[derive(Debug, Clone)]
pub struct FrontMatter<'a> {
    /// Coerced top-level fields in declaration order, `None` without a block
    pub fields: Option<Map<String, Value>>,
    /// Everything after the closing delimiter, verbatim
    pub body: &'a str,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> FrontMatter<'a> {
    /// Parse a raw document into metadata fields and body
    pub fn parse(document: &'a str) -> Self {
        let Some((block, body)) = split(document) else {
            return Self {
                fields: None,
                body: document,
                diagnostics: Vec::new(),
            };
        };

        let (tree, diagnostics) = read_block(block);
        let fields = tree
            .into_iter()
            .map(|(key, node)| (key, node.into_value()))
            .collect();

        Self {
            fields: Some(fields),
            body,
            diagnostics,
        }
    }
}

/// Split a document into (metadata block, body).
///
/// The document must begin with a `---` line; the block ends at the first
/// following line that is exactly `---`. Returns `None` when either
/// delimiter is missing.
pub fn split(document: &str) -> Option<(&str, &str)> {
    let rest = document.strip_prefix(OPEN)?;

    if let Some(end) = rest.find(CLOSE) {
        return Some((&rest[..end], &rest[end + CLOSE.len()..]));
    }

    // Closing delimiter on the last line with nothing after it
    rest.strip_suffix(CLOSE_AT_EOF).map(|block| (block, ""))
}

/// Where the machine currently attaches indented properties
#[derive(Debug)]
enum State {
    TopLevel,
    InItem { key: String, index: usize },
}

struct TreeBuilder {
    root: IndexMap<String, Node>,
    /// Most recently seen top-level key, target of `- ` lines
    current_key: Option<String>,
    state: State,
    diagnostics: Vec<Diagnostic>,
}

fn read_block(block: &str) -> (IndexMap<String, Node>, Vec<Diagnostic>) {
    let mut builder = TreeBuilder {
        root: IndexMap::new(),
        current_key: None,
        state: State::TopLevel,
        diagnostics: Vec::new(),
    };

    // The opening delimiter is line 1 of the document
    for (offset, raw) in block.split('\n').enumerate() {
        builder.feed(offset + 2, raw);
    }

    if !builder.diagnostics.is_empty() {
        tracing::debug!(
            "Front-matter block read with {} diagnostics",
            builder.diagnostics.len()
        );
    }

    (builder.root, builder.diagnostics)
}

impl TreeBuilder {
    fn feed(&mut self, line: usize, raw: &str) {
        match lexer::classify(raw) {
            Line::Blank | Line::Comment => {}
            Line::Item { rest } => self.start_item(line, rest),
            Line::Property {
                key,
                value,
                indented: false,
            } => self.top_level(key, value),
            Line::Property {
                key,
                value,
                indented: true,
            } => self.item_property(line, key, value),
            Line::Unrecognized(text) => self.diagnostics.push(Diagnostic::Unrecognized {
                line,
                text: text.to_string(),
            }),
        }
    }

    fn top_level(&mut self, key: &str, value: &str) {
        self.state = State::TopLevel;
        self.current_key = Some(key.to_string());

        // An empty value opens a list (or an unsupported nested block) and
        // sets nothing by itself
        if !value.is_empty() {
            self.root
                .insert(key.to_string(), Node::Scalar(value.to_string()));
        }
    }

    fn start_item(&mut self, line: usize, rest: &str) {
        let Some(key) = self.current_key.clone() else {
            self.diagnostics.push(Diagnostic::ItemWithoutKey {
                line,
                text: rest.to_string(),
            });
            return;
        };

        let element = match lexer::split_pair(rest) {
            Some((prop, value)) => {
                let mut map = IndexMap::new();
                if prop == "props" || value.is_empty() {
                    self.diagnostics.push(Diagnostic::NestedBlock {
                        line,
                        key: prop.to_string(),
                    });
                } else {
                    map.insert(prop.to_string(), Node::Scalar(value.to_string()));
                }
                Node::Map(map)
            }
            None => Node::Scalar(rest.to_string()),
        };

        let items = self
            .root
            .entry(key.clone())
            .or_insert_with(|| Node::List(Vec::new()))
            .make_list();
        items.push(element);
        let index = items.len() - 1;

        self.state = State::InItem { key, index };
    }

    fn item_property(&mut self, line: usize, key: &str, value: &str) {
        let State::InItem {
            key: list_key,
            index,
        } = &self.state
        else {
            self.diagnostics.push(Diagnostic::OrphanProperty {
                line,
                key: key.to_string(),
            });
            return;
        };

        // `props:` and other empty-valued keys would open a nested block.
        // The lines under them stay attached to the item itself.
        if key == "props" || value.is_empty() {
            self.diagnostics.push(Diagnostic::NestedBlock {
                line,
                key: key.to_string(),
            });
            return;
        }

        let item = match self.root.get_mut(list_key) {
            Some(Node::List(items)) => items.get_mut(*index),
            _ => None,
        };

        match item {
            Some(Node::Map(map)) => {
                map.insert(key.to_string(), Node::Scalar(value.to_string()));
            }
            _ => self.diagnostics.push(Diagnostic::OrphanProperty {
                line,
                key: key.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_split_block_and_body() {
        let doc = "---\ntitle: Hello\n---\n\nBody text\n";
        let (block, body) = split(doc).unwrap();
        assert_eq!(block, "title: Hello");
        assert_eq!(body, "\nBody text\n");
    }

    #[test]
    fn test_split_requires_leading_delimiter() {
        assert!(split("\n---\ntitle: x\n---\nbody").is_none());
        assert!(split("title: x\n---\nbody").is_none());
        assert!(split("---\ntitle: x\nno closing line").is_none());
    }

    #[test]
    fn test_split_uses_first_closing_line() {
        let doc = "---\na: 1\n---\nbody\n---\nmore\n";
        let (block, body) = split(doc).unwrap();
        assert_eq!(block, "a: 1");
        assert_eq!(body, "body\n---\nmore\n");
    }

    #[test]
    fn test_split_closing_at_end_of_file() {
        let (block, body) = split("---\ntitle: x\n---").unwrap();
        assert_eq!(block, "title: x");
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_closing_line_must_be_exact() {
        assert_eq!(split("---\ntitle: x\n---x"), None);
        assert_eq!(split("---\ntitle: x\n--- "), None);
        let (block, body) = split("---\ntitle: x\n---\n---").unwrap();
        assert_eq!(block, "title: x");
        assert_eq!(body, "---");
    }

    #[test]
    fn test_no_front_matter() {
        let doc = "# Just markdown\n\nNo metadata here.";
        let fm = FrontMatter::parse(doc);
        assert!(fm.fields.is_none());
        assert_eq!(fm.body, doc);
        assert!(fm.diagnostics.is_empty());
    }

    #[test]
    fn test_scalar_fields() {
        let fm = FrontMatter::parse(
            "---\ntitle: Hello\nlayout: landing\nrequiresAuth: true\norder: 3\n---\nx",
        );
        let fields = fm.fields.unwrap();
        assert_eq!(fields["title"], json!("Hello"));
        assert_eq!(fields["layout"], json!("landing"));
        assert_eq!(fields["requiresAuth"], json!(true));
        assert_eq!(fields["order"], json!(3));
        assert!(fm.diagnostics.is_empty());
    }

    #[test]
    fn test_list_of_objects() {
        let fm = FrontMatter::parse("---\nitems:\n- title: A\n- title: B\n---\n");
        let fields = fm.fields.unwrap();
        assert_eq!(fields["items"], json!([{ "title": "A" }, { "title": "B" }]));
    }

    #[test]
    fn test_indented_properties_attach_to_open_item() {
        let doc = r#"---
title: Landing
components:
  - type: hero
    id: top
    title: "Build faster"
    dark: true
  - type: text-block
---
"#;
        let fields = FrontMatter::parse(doc).fields.unwrap();
        assert_eq!(
            fields["components"],
            json!([
                { "type": "hero", "id": "top", "title": "Build faster", "dark": true },
                { "type": "text-block" }
            ])
        );
    }

    #[test]
    fn test_scalar_list_items() {
        let fields = FrontMatter::parse("---\ntags:\n  - rust\n  - 2024\n---\n")
            .fields
            .unwrap();
        assert_eq!(fields["tags"], json!(["rust", 2024]));
    }

    #[test]
    fn test_item_coerces_existing_scalar_to_list() {
        let fields = FrontMatter::parse("---\ntags: none\n- name: a\n---\n")
            .fields
            .unwrap();
        assert_eq!(fields["tags"], json!([{ "name": "a" }]));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let fm = FrontMatter::parse("---\n# a comment\n\ntitle: T\n   # another\n---\n");
        assert_eq!(fm.fields.unwrap()["title"], json!("T"));
        assert!(fm.diagnostics.is_empty());
    }

    #[test]
    fn test_empty_top_level_value_sets_nothing() {
        let fields = FrontMatter::parse("---\ntitle: T\nsubtitle:\n---\n")
            .fields
            .unwrap();
        assert!(!fields.contains_key("subtitle"));
    }

    #[test]
    fn test_nested_props_block_is_reported() {
        let doc = "---\ncomponents:\n  - type: hero\n    props:\n      title: Big\n---\n";
        let fm = FrontMatter::parse(doc);
        assert_eq!(
            fm.diagnostics,
            vec![Diagnostic::NestedBlock {
                line: 4,
                key: "props".to_string()
            }]
        );
        // Lines under the block still land on the item
        assert_eq!(
            fm.fields.unwrap()["components"],
            json!([{ "type": "hero", "title": "Big" }])
        );
    }

    #[test]
    fn test_malformed_lines_degrade() {
        let doc = "---\n- stray\n  orphan: 1\nnot a pair\ntitle: Kept\n---\nbody";
        let fm = FrontMatter::parse(doc);
        assert_eq!(fm.fields.unwrap()["title"], json!("Kept"));
        assert_eq!(fm.body, "body");
        assert_eq!(
            fm.diagnostics,
            vec![
                Diagnostic::ItemWithoutKey {
                    line: 2,
                    text: "stray".to_string()
                },
                Diagnostic::OrphanProperty {
                    line: 3,
                    key: "orphan".to_string()
                },
                Diagnostic::Unrecognized {
                    line: 4,
                    text: "not a pair".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_property_on_scalar_item_is_orphaned() {
        let fm = FrontMatter::parse("---\ntags:\n- rust\n  weight: 2\n---\n");
        assert_eq!(fm.fields.unwrap()["tags"], json!(["rust"]));
        assert!(matches!(
            fm.diagnostics.as_slice(),
            [Diagnostic::OrphanProperty { line: 4, .. }]
        ));
    }

    #[test]
    fn test_top_level_line_closes_item() {
        let doc = "---\ncomponents:\n- type: hero\nlayout: landing\n  title: lost\n---\n";
        let fm = FrontMatter::parse(doc);
        let fields = fm.fields.unwrap();
        assert_eq!(fields["components"], json!([{ "type": "hero" }]));
        assert_eq!(fm.diagnostics.len(), 1);
    }

    #[test]
    fn test_empty_block() {
        let fm = FrontMatter::parse("---\n\n---\ncontent");
        assert!(fm.fields.unwrap().is_empty());
        assert_eq!(fm.body, "content");
    }
}
