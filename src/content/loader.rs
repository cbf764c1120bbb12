//! Content loader - reads page documents from the content directory

use anyhow::Result;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::PageRecord;
use crate::Folio;

/// Loads page documents from the content directory
pub struct ContentLoader<'a> {
    folio: &'a Folio,
}

impl<'a> ContentLoader<'a> {
    pub fn new(folio: &'a Folio) -> Self {
        Self { folio }
    }

    /// Load every markdown document under the content directory
    pub fn load_pages(&self) -> Result<Vec<PageRecord>> {
        let content_dir = &self.folio.content_dir;
        if !content_dir.exists() {
            return Ok(Vec::new());
        }

        let mut pages = Vec::new();

        for entry in WalkDir::new(content_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e.path()))
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_page(path) {
                    Ok(page) => pages.push(page),
                    Err(e) => {
                        tracing::warn!("Failed to load page {:?}: {}", path, e);
                    }
                }
            }
        }

        Ok(pages)
    }

    /// Load a single document; its slug comes from the path
    pub fn load_page(&self, path: &Path) -> Result<PageRecord> {
        let document = fs::read_to_string(path)?;
        let relative = path.strip_prefix(&self.folio.content_dir).unwrap_or(path);
        let slug = slug_for(relative);

        let (page, diagnostics) = PageRecord::parse_with_diagnostics(&slug, &document);
        for diagnostic in &diagnostics {
            tracing::warn!("{}: {}", relative.display(), diagnostic);
        }
        tracing::debug!("Loaded {} from {:?}", slug, relative);

        Ok(page)
    }
}

/// Slug of a document path relative to the content directory.
///
/// `index.md` maps to its directory: `index.md` -> `/`,
/// `docs/index.md` -> `/docs`, `docs/setup.md` -> `/docs/setup`.
pub fn slug_for(relative: &Path) -> String {
    let mut parts: Vec<String> = relative
        .with_extension("")
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(str::to_string)
        .collect();

    if parts.last().map(String::as_str) == Some("index") {
        parts.pop();
    }

    format!("/{}", parts.join("/"))
}

/// Files and directories starting with `_` or `.` are skipped
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('_') || n.starts_with('.'))
        .unwrap_or(false)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
