//! Reset the page store to the built-in pages

use anyhow::Result;

use crate::Folio;

pub fn run(folio: &Folio) -> Result<()> {
    let mut store = folio.open_store()?;
    store.reset()?;
    tracing::info!("Page store reset to {} built-in pages", store.len());
    Ok(())
}
