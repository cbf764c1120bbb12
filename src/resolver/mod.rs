//! Component resolver
//!
//! Decides which blocks a page renders and with which props. The markdown
//! body is injected into text blocks that carry no content of their own; a
//! page that declares no components gets a single synthesized text block.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::content::PageRecord;

/// Registry key of the block that renders the page body
pub const TEXT_BLOCK: &str = "text-block";

/// Where a resolved block came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "origin", rename_all = "lowercase")]
pub enum BlockOrigin {
    /// Position in `metadata.components`
    Declared { index: usize },
    /// Fallback block; presented under the page title
    Synthesized { heading: String },
}

/// A block ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBlock {
    #[serde(rename = "type")]
    pub kind: String,
    pub props: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(flatten)]
    pub origin: BlockOrigin,
}

/// Resolve the ordered render list of a page. Pure; always yields at least
/// one block.
pub fn resolve(page: &PageRecord) -> Vec<ResolvedBlock> {
    let components = &page.metadata.components;

    if components.is_empty() {
        let mut props = Map::new();
        props.insert(
            "content".to_string(),
            Value::String(page.markdown_body.clone()),
        );
        return vec![ResolvedBlock {
            kind: TEXT_BLOCK.to_string(),
            props,
            id: None,
            origin: BlockOrigin::Synthesized {
                heading: page.metadata.title.clone(),
            },
        }];
    }

    components
        .iter()
        .enumerate()
        .map(|(index, component)| {
            let mut props = component.props.clone();
            if component.kind == TEXT_BLOCK && !has_content(&props) {
                props.insert(
                    "content".to_string(),
                    Value::String(page.markdown_body.clone()),
                );
            }
            ResolvedBlock {
                kind: component.kind.clone(),
                props,
                id: component.id.clone(),
                origin: BlockOrigin::Declared { index },
            }
        })
        .collect()
}

/// Absent, null and empty-string content count as not set
fn has_content(props: &Map<String, Value>) -> bool {
    match props.get("content") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ComponentConfig, PageMetadata};
    use serde_json::json;

    fn page(components: Vec<ComponentConfig>, body: &str) -> PageRecord {
        let mut metadata = PageMetadata::titled("Title");
        metadata.components = components;
        PageRecord {
            slug: "/t".to_string(),
            raw_content: String::new(),
            metadata,
            markdown_body: body.to_string(),
        }
    }

    #[test]
    fn test_injects_body_into_text_block() {
        let blocks = resolve(&page(vec![ComponentConfig::new(TEXT_BLOCK)], "X"));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].props["content"], json!("X"));
        assert_eq!(blocks[0].origin, BlockOrigin::Declared { index: 0 });
    }

    #[test]
    fn test_fallback_block_without_components() {
        let blocks = resolve(&page(Vec::new(), "Y"));
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, TEXT_BLOCK);
        assert_eq!(blocks[0].props["content"], json!("Y"));
        assert_eq!(
            blocks[0].origin,
            BlockOrigin::Synthesized {
                heading: "Title".to_string()
            }
        );
    }

    #[test]
    fn test_fallback_with_empty_body() {
        let blocks = resolve(&page(Vec::new(), ""));
        assert_eq!(blocks[0].props["content"], json!(""));
    }

    #[test]
    fn test_existing_content_is_kept() {
        let blocks = resolve(&page(
            vec![ComponentConfig::new(TEXT_BLOCK).with_prop("content", "Own")],
            "Body",
        ));
        assert_eq!(blocks[0].props["content"], json!("Own"));
    }

    #[test]
    fn test_empty_or_null_content_is_replaced() {
        let blocks = resolve(&page(
            vec![
                ComponentConfig::new(TEXT_BLOCK).with_prop("content", ""),
                ComponentConfig::new(TEXT_BLOCK).with_prop("content", Value::Null),
            ],
            "Body",
        ));
        assert_eq!(blocks[0].props["content"], json!("Body"));
        assert_eq!(blocks[1].props["content"], json!("Body"));
    }

    #[test]
    fn test_order_and_other_blocks_preserved() {
        let hero = ComponentConfig {
            kind: "hero".to_string(),
            props: json!({ "title": "Hi", "content": "" })
                .as_object()
                .cloned()
                .unwrap(),
            id: Some("top".to_string()),
        };
        let blocks = resolve(&page(
            vec![
                hero.clone(),
                ComponentConfig::new(TEXT_BLOCK).with_prop("theme", "light"),
                ComponentConfig::new("contact-form"),
            ],
            "Body",
        ));

        let kinds: Vec<_> = blocks.iter().map(|b| b.kind.as_str()).collect();
        assert_eq!(kinds, vec!["hero", TEXT_BLOCK, "contact-form"]);
        // Only text blocks receive the body
        assert_eq!(blocks[0].props, hero.props);
        assert_eq!(blocks[0].id.as_deref(), Some("top"));
        assert_eq!(blocks[1].props["theme"], json!("light"));
        assert_eq!(blocks[1].props["content"], json!("Body"));
        assert!(blocks[2].props.is_empty());
    }

    #[test]
    fn test_page_is_not_modified() {
        let original = page(vec![ComponentConfig::new(TEXT_BLOCK)], "Body");
        let copy = original.clone();
        let _ = resolve(&original);
        assert_eq!(original, copy);
    }
}
