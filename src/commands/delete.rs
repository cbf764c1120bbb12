//! Delete a page from the store

use anyhow::Result;

use crate::store::StoreError;
use crate::Folio;

pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    let mut store = folio.open_store()?;
    match store.delete(slug)? {
        Some(page) => println!("Deleted: {} ({})", page.slug, page.metadata.title),
        None => return Err(StoreError::NotFound(slug.to_string()).into()),
    }
    Ok(())
}
