//! Parse the content directory into the page store

use anyhow::Result;

use crate::content::loader::ContentLoader;
use crate::Folio;

/// Save every document of the content directory into the store, replacing
/// pages with the same slug. Returns the number of imported pages.
pub fn run(folio: &Folio) -> Result<usize> {
    let pages = ContentLoader::new(folio).load_pages()?;
    let mut store = folio.open_store()?;

    let count = store.save_all(pages)?;

    tracing::info!(
        "Imported {} pages from {:?}",
        count,
        folio.content_dir
    );
    Ok(count)
}
