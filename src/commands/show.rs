//! Show how a stored page resolves

use anyhow::{anyhow, Result};

use crate::access::{self, Viewer};
use crate::content::{MarkdownRenderer, Role};
use crate::render::PageView;
use crate::resolver::resolve;
use crate::Folio;

/// Print the resolved block list of a page, or its HTML with `html`.
/// `role` signs in a demo viewer before the access check.
pub fn run(folio: &Folio, slug: &str, role: Option<&str>, html: bool) -> Result<()> {
    let viewer = match role {
        Some(name) => Some(Viewer::demo(
            Role::from_name(name).ok_or_else(|| anyhow!("Unknown role: {}", name))?,
        )),
        None => None,
    };

    let store = folio.open_store()?;
    let page = store.require(slug)?;
    access::authorize(&page.metadata, viewer.as_ref())?;

    if html {
        let markdown = MarkdownRenderer::from_config(&folio.config.highlight);
        let view = PageView::new(&folio.config, &markdown);
        println!("{}", view.render(page, store.list(), viewer.as_ref()));
    } else {
        println!("{}", serde_json::to_string_pretty(&resolve(page))?);
    }

    Ok(())
}
