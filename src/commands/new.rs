//! Create a new page in the store

use anyhow::Result;

use crate::Folio;

/// Create a page titled `title`. The slug defaults to the slugified title.
pub fn create_page(folio: &Folio, title: &str, slug: Option<&str>) -> Result<()> {
    let slug = match slug {
        Some(slug) => slug.to_string(),
        None => slug::slugify(title),
    };

    let mut store = folio.open_store()?;
    let existed = store.get(&slug).is_some();
    let page = store.create(&slug, title)?;

    if existed {
        println!("Exists: {} ({})", page.slug, page.metadata.title);
    } else {
        println!("Created: {}", page.slug);
    }

    Ok(())
}
