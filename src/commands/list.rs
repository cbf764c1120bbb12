//! List site content

use anyhow::Result;

use crate::registry::BlockKind;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    match content_type {
        "page" | "pages" => {
            let store = folio.open_store()?;
            println!("Pages ({}):", store.len());
            for page in store.list() {
                let meta = &page.metadata;
                let access = match meta.required_role {
                    Some(role) => format!(" [{}]", role.as_str()),
                    None if meta.requires_auth => " [signed in]".to_string(),
                    None => String::new(),
                };
                println!(
                    "  {} - {} ({}, {} blocks){}",
                    page.slug,
                    meta.title,
                    meta.layout.as_str(),
                    meta.components.len(),
                    access
                );
            }
        }
        "block" | "blocks" => {
            let kinds = BlockKind::registered();
            println!("Blocks ({}):", kinds.len());
            for key in kinds {
                println!("  {}", key);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: page, block", content_type);
        }
    }

    Ok(())
}
