//! Generator module - exports stored pages as static HTML files

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

use crate::access;
use crate::content::MarkdownRenderer;
use crate::render::PageView;
use crate::resolver::{resolve, ResolvedBlock};
use crate::store::PageStore;
use crate::Folio;

/// Entry of the exported `pages.json` manifest
#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    slug: &'a str,
    title: &'a str,
    path: String,
    blocks: Vec<ResolvedBlock>,
}

/// Summary of one export run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub written: usize,
    /// Slugs skipped because they require a signed-in viewer
    pub protected: Vec<String>,
}

/// Static exporter
pub struct Generator {
    folio: Folio,
    markdown: MarkdownRenderer,
}

impl Generator {
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
            markdown: MarkdownRenderer::from_config(&folio.config.highlight),
        }
    }

    /// Write every publicly viewable page to the public directory
    pub fn generate(&self, store: &PageStore) -> Result<ExportReport> {
        fs::create_dir_all(&self.folio.public_dir)?;

        let view = PageView::new(&self.folio.config, &self.markdown);
        let mut report = ExportReport::default();
        let mut manifest = Vec::new();

        for page in store.list() {
            // A static file cannot check who is reading it
            if access::authorize(&page.metadata, None).is_err() {
                tracing::info!("Skipping protected page {}", page.slug);
                report.protected.push(page.slug.clone());
                continue;
            }

            let html = view.render(page, store.list(), None);
            let output = self.output_path(&page.slug);
            if let Some(dir) = output.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&output, html)?;
            tracing::debug!("Generated: {:?}", output);

            manifest.push(ManifestEntry {
                slug: &page.slug,
                title: &page.metadata.title,
                path: output
                    .strip_prefix(&self.folio.public_dir)
                    .unwrap_or(&output)
                    .to_string_lossy()
                    .to_string(),
                blocks: resolve(page),
            });
            report.written += 1;
        }

        fs::write(
            self.folio.public_dir.join("pages.json"),
            serde_json::to_string_pretty(&manifest)?,
        )?;

        Ok(report)
    }

    /// `/` -> `index.html`, `/docs/setup` -> `docs/setup/index.html`
    fn output_path(&self, slug: &str) -> PathBuf {
        let mut path = self.folio.public_dir.clone();
        for part in slug.split('/').filter(|p| !p.is_empty() && *p != "..") {
            path.push(part);
        }
        path.join("index.html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generate_public_pages() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        let store = PageStore::seeded();

        let report = Generator::new(&folio).generate(&store).unwrap();

        assert_eq!(report.written, 3);
        assert_eq!(report.protected, vec!["/admin".to_string()]);
        assert!(folio.public_dir.join("index.html").exists());
        assert!(folio.public_dir.join("about/index.html").exists());
        assert!(!folio.public_dir.join("admin/index.html").exists());

        let manifest = fs::read_to_string(folio.public_dir.join("pages.json")).unwrap();
        let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
        assert_eq!(manifest[0]["slug"], "/");
        assert_eq!(manifest[0]["blocks"][0]["type"], "hero");
    }

    #[test]
    fn test_output_path_stays_inside_public_dir() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::with_config(dir.path(), SiteConfig::default());
        let generator = Generator::new(&folio);
        assert_eq!(
            generator.output_path("/../etc"),
            folio.public_dir.join("etc/index.html")
        );
    }
}
