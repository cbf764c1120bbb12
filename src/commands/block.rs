//! Append a generated block to a stored page

use anyhow::Result;

use crate::writer::{add_written_block, ScaffoldWriter};
use crate::Folio;

pub async fn run(folio: &Folio, slug: &str, kind: &str, description: &str) -> Result<()> {
    let mut store = folio.open_store()?;
    let page = add_written_block(&mut store, &ScaffoldWriter, slug, kind, description).await?;

    println!(
        "Added {} block to {} ({} blocks)",
        kind,
        page.slug,
        page.metadata.components.len()
    );
    Ok(())
}
