//! Component registry
//!
//! Maps block type keys to renderers. The set of kinds is closed; any other
//! key resolves to [`BlockKind::Unknown`], which renders a visible
//! placeholder instead of failing the page.

mod blocks;

use crate::content::{MarkdownRenderer, PageRecord};
use crate::helpers::{html_escape, id_attr};
use crate::resolver::{ResolvedBlock, TEXT_BLOCK};

/// Renderable block kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Hero,
    Features,
    ContactForm,
    AdminPanel,
    TextBlock,
    /// Key with no registered renderer
    Unknown(String),
}

impl BlockKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "hero" => BlockKind::Hero,
            "features" => BlockKind::Features,
            "contact-form" => BlockKind::ContactForm,
            "admin-panel" => BlockKind::AdminPanel,
            TEXT_BLOCK => BlockKind::TextBlock,
            other => BlockKind::Unknown(other.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::Features => "features",
            BlockKind::ContactForm => "contact-form",
            BlockKind::AdminPanel => "admin-panel",
            BlockKind::TextBlock => TEXT_BLOCK,
            BlockKind::Unknown(key) => key,
        }
    }

    /// Keys of all registered kinds
    pub fn registered() -> [&'static str; 5] {
        ["hero", "features", "contact-form", "admin-panel", TEXT_BLOCK]
    }

    fn renderer(&self) -> &'static dyn BlockRenderer {
        match self {
            BlockKind::Hero => &blocks::Hero,
            BlockKind::Features => &blocks::Features,
            BlockKind::ContactForm => &blocks::ContactForm,
            BlockKind::AdminPanel => &blocks::AdminPanel,
            BlockKind::TextBlock => &blocks::TextBlock,
            BlockKind::Unknown(_) => &blocks::Unknown,
        }
    }
}

/// Everything a renderer may read besides the block itself
pub struct RenderContext<'a> {
    pub markdown: &'a MarkdownRenderer,
    /// All pages of the store, for blocks that list content
    pub pages: Vec<&'a PageRecord>,
}

/// Renders one kind of block to HTML
pub trait BlockRenderer: Sync {
    fn render(&self, block: &ResolvedBlock, ctx: &RenderContext) -> String;
}

/// Render a resolved block inside its addressable wrapper
pub fn render_block(block: &ResolvedBlock, ctx: &RenderContext) -> String {
    let kind = BlockKind::from_key(&block.kind);
    let inner = kind.renderer().render(block, ctx);

    format!(
        r#"<section class="block block-{}"{}>{}</section>"#,
        html_escape(kind.key()),
        id_attr(block.id.as_deref()),
        inner
    )
}
