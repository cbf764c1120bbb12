//! Content module - document parsing, page records and markdown rendering

mod frontmatter;
mod lexer;
pub mod loader;
mod markdown;
mod page;
mod value;

pub use frontmatter::{split, Diagnostic, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use page::{ComponentConfig, Layout, PageMetadata, PageRecord, Role};
pub use value::{coerce, scalar_text, Node};
