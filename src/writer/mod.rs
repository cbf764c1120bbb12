//! Content generation
//!
//! A [`ContentWriter`] turns a topic and a style into a markdown article.
//! [`create_written_page`] stores the result as a page, and stores nothing
//! when generation fails.

use serde_json::{json, Map, Value};
use std::future::Future;
use thiserror::Error;

use crate::content::{ComponentConfig, PageRecord};
use crate::registry::BlockKind;
use crate::store::{normalize_slug, PageStore, StoreError};

/// Errors raised while generating or storing an article
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("Topic must not be empty")]
    EmptyTopic,

    #[error("Generation failed: {0}")]
    Generation(String),

    #[error("Unknown block type: {0}")]
    UnknownBlock(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Produces page content from a short description
pub trait ContentWriter {
    /// Markdown body with a level-1 heading; no front-matter
    fn write_article(
        &self,
        topic: &str,
        style: &str,
    ) -> impl Future<Output = Result<String, WriteError>> + Send;

    /// Props for a block of the given kind; an empty map when nothing fits
    fn component_props(
        &self,
        kind: &str,
        description: &str,
    ) -> impl Future<Output = Map<String, Value>> + Send;
}

/// Offline writer that fills a fixed article outline
#[derive(Debug, Clone, Default)]
pub struct ScaffoldWriter;

impl ScaffoldWriter {
    fn tone(style: &str) -> &'static str {
        match style.to_ascii_lowercase().as_str() {
            "casual" => "Here is a relaxed walk through the topic.",
            "technical" => "This article goes into the technical details.",
            "persuasive" => "Read on to see why this matters to you.",
            _ => "This article gives a concise, professional overview.",
        }
    }
}

impl ContentWriter for ScaffoldWriter {
    fn write_article(
        &self,
        topic: &str,
        style: &str,
    ) -> impl Future<Output = Result<String, WriteError>> + Send {
        let topic = topic.trim().to_string();
        let tone = Self::tone(style);

        async move {
            if topic.is_empty() {
                return Err(WriteError::EmptyTopic);
            }
            Ok(format!(
                "# {topic}\n\n{tone}\n\n\
                 ## Background\n\nWhat {topic} is and where it came from.\n\n\
                 ## Key Ideas\n\nThe concepts worth knowing about {topic}.\n\n\
                 ## Next Steps\n\nWhere to go from here.\n"
            ))
        }
    }

    fn component_props(
        &self,
        kind: &str,
        description: &str,
    ) -> impl Future<Output = Map<String, Value>> + Send {
        let props = match kind {
            "hero" => json!({
                "title": description,
                "subtitle": format!("Everything about {}", description),
                "ctaText": "Learn more"
            }),
            crate::resolver::TEXT_BLOCK => json!({ "content": description }),
            _ => json!({}),
        };

        async move { props.as_object().cloned().unwrap_or_default() }
    }
}

/// Generate an article and store it as the body of the page at `slug`.
///
/// The page is created with the topic as its title when it does not exist
/// yet. Nothing is persisted when the writer fails.
pub async fn create_written_page<W: ContentWriter>(
    store: &mut PageStore,
    writer: &W,
    topic: &str,
    style: &str,
    slug: &str,
) -> Result<PageRecord, WriteError> {
    let slug = normalize_slug(slug);
    let body = writer.write_article(topic, style).await?;

    let mut page = store
        .get(&slug)
        .cloned()
        .unwrap_or_else(|| PageRecord::blank(&slug, topic.trim()));
    page.markdown_body = body;

    store.save(&slug, page.clone())?;
    tracing::info!("Wrote page {} about {:?}", slug, topic);
    Ok(page)
}

/// Append a block of `kind` to the page at `slug`, with props generated
/// from `description`. A writer with no suggestion yields a block without
/// props. The page must exist and the kind must be registered.
pub async fn add_written_block<W: ContentWriter>(
    store: &mut PageStore,
    writer: &W,
    slug: &str,
    kind: &str,
    description: &str,
) -> Result<PageRecord, WriteError> {
    if let BlockKind::Unknown(key) = BlockKind::from_key(kind) {
        return Err(WriteError::UnknownBlock(key));
    }
    let mut page = store.require(slug)?.clone();

    let props = writer.component_props(kind, description).await;
    if props.is_empty() {
        tracing::debug!("No props suggested for {} block", kind);
    }
    let mut component = ComponentConfig::new(kind);
    component.props = props;
    page.metadata.components.push(component);

    let slug = page.slug.clone();
    store.save(&slug, page.clone())?;
    tracing::info!("Added {} block to {}", kind, slug);
    Ok(page)
}
