//! Generate an article and store it as a page

use anyhow::Result;

use crate::writer::{create_written_page, ScaffoldWriter};
use crate::Folio;

/// Write an article about `topic` into the page at `slug` (defaults to the
/// slugified topic)
pub async fn run(folio: &Folio, topic: &str, style: &str, slug: Option<&str>) -> Result<()> {
    let slug = match slug {
        Some(slug) => slug.to_string(),
        None => slug::slugify(topic),
    };

    let mut store = folio.open_store()?;
    let page = create_written_page(&mut store, &ScaffoldWriter, topic, style, &slug).await?;

    println!("Page {} created with generated content", page.slug);
    Ok(())
}
