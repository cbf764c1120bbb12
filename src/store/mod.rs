//! Page store
//!
//! Pages live in memory keyed by slug and are persisted as one JSON file
//! named after the store key. The lifecycle is explicit: a store starts from
//! the built-in seed pages, [`PageStore::open`] overlays whatever was
//! persisted (stored pages replace seed pages of the same slug but never
//! remove them), every mutation writes the file back, and
//! [`PageStore::reset`] returns to the seed.

mod seed;

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::content::PageRecord;

pub use seed::initial_pages;

lazy_static! {
    static ref REPEATED_SLASHES: Regex = Regex::new(r"/{2,}").expect("valid slash pattern");
}

/// Errors raised by page store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// On-disk layout of the store file
#[derive(Debug, Deserialize)]
struct StoreFile {
    version: u32,
    saved_at: DateTime<Local>,
    pages: IndexMap<String, PageRecord>,
}

#[derive(Serialize)]
struct StoreFileRef<'a> {
    version: u32,
    saved_at: DateTime<Local>,
    pages: &'a IndexMap<String, PageRecord>,
}

/// Pages keyed by slug, in insertion order
#[derive(Debug, Clone)]
pub struct PageStore {
    pages: IndexMap<String, PageRecord>,
    /// Backing file; `None` keeps the store in memory only
    path: Option<PathBuf>,
}

impl PageStore {
    /// Current store file format version
    const VERSION: u32 = 1;

    /// In-memory store holding the seed pages
    pub fn seeded() -> Self {
        Self {
            pages: initial_pages(),
            path: None,
        }
    }

    /// Seed pages overlaid with the store persisted under `dir/<key>.json`
    pub fn open(dir: &Path, key: &str) -> Result<Self, StoreError> {
        let mut store = Self {
            pages: initial_pages(),
            path: Some(dir.join(format!("{}.json", key))),
        };
        let loaded = store.load()?;
        tracing::debug!("Opened page store with {} persisted pages", loaded);
        Ok(store)
    }

    /// Overlay persisted pages onto the current ones. Returns how many
    /// pages were read. A missing file is an empty store. An unreadable or
    /// outdated one is moved aside to `<key>.json.bak` so the next write
    /// cannot overwrite it.
    pub fn load(&mut self) -> Result<usize, StoreError> {
        let Some(path) = &self.path else {
            return Ok(0);
        };

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let file = match serde_json::from_str::<StoreFile>(&content) {
            Ok(file) if file.version == Self::VERSION => file,
            Ok(file) => {
                let backup = set_aside(path)?;
                tracing::warn!(
                    "Page store version {} is not supported, moved to {:?}; starting from seed pages",
                    file.version,
                    backup
                );
                return Ok(0);
            }
            Err(e) => {
                let backup = set_aside(path)?;
                tracing::warn!(
                    "Unreadable page store {:?} ({}), moved to {:?}; starting from seed pages",
                    path,
                    e,
                    backup
                );
                return Ok(0);
            }
        };

        let count = file.pages.len();
        tracing::debug!("Page store last saved at {}", file.saved_at);
        for (slug, page) in file.pages {
            self.pages.insert(slug, page);
        }
        Ok(count)
    }

    /// Look a page up; `None` is the not-found case
    pub fn get(&self, slug: &str) -> Option<&PageRecord> {
        self.pages.get(&normalize_slug(slug))
    }

    /// Look a page up, turning absence into [`StoreError::NotFound`]
    pub fn require(&self, slug: &str) -> Result<&PageRecord, StoreError> {
        let slug = normalize_slug(slug);
        self.pages.get(&slug).ok_or(StoreError::NotFound(slug))
    }

    pub fn list(&self) -> Vec<&PageRecord> {
        self.pages.values().collect()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Replace the page at `slug` wholesale and persist
    pub fn save(&mut self, slug: &str, mut page: PageRecord) -> Result<(), StoreError> {
        let slug = normalize_slug(slug);
        page.slug = slug.clone();
        self.pages.insert(slug, page);
        self.persist()
    }

    /// Replace several pages at once, writing the file a single time.
    /// Returns how many pages were saved.
    pub fn save_all(
        &mut self,
        pages: impl IntoIterator<Item = PageRecord>,
    ) -> Result<usize, StoreError> {
        let mut count = 0;
        for mut page in pages {
            let slug = normalize_slug(&page.slug);
            page.slug = slug.clone();
            self.pages.insert(slug, page);
            count += 1;
        }
        if count > 0 {
            self.persist()?;
        }
        Ok(count)
    }

    /// Create a blank page, or return the existing one untouched
    pub fn create(&mut self, slug: &str, title: &str) -> Result<PageRecord, StoreError> {
        let slug = normalize_slug(slug);
        if let Some(existing) = self.pages.get(&slug) {
            return Ok(existing.clone());
        }

        let page = PageRecord::blank(&slug, title);
        self.pages.insert(slug.clone(), page.clone());
        self.persist()?;
        tracing::info!("Created page {}", slug);
        Ok(page)
    }

    /// Remove a page. Seed pages come back the next time the store is opened.
    pub fn delete(&mut self, slug: &str) -> Result<Option<PageRecord>, StoreError> {
        let removed = self.pages.shift_remove(&normalize_slug(slug));
        if removed.is_some() {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Drop the persisted file and return to the seed pages
    pub fn reset(&mut self) -> Result<(), StoreError> {
        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => tracing::info!("Deleted: {:?}", path),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        self.pages = initial_pages();
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let file = StoreFileRef {
            version: Self::VERSION,
            saved_at: Local::now(),
            pages: &self.pages,
        };
        fs::write(path, serde_json::to_string_pretty(&file)?)?;
        Ok(())
    }
}

/// Rename a store file that cannot be read to `<name>.bak`, replacing an
/// older backup
fn set_aside(path: &Path) -> Result<PathBuf, StoreError> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".bak");
    let backup = PathBuf::from(backup);
    fs::rename(path, &backup)?;
    Ok(backup)
}

/// Canonical slug: one leading slash, no repeated or trailing slashes
pub fn normalize_slug(raw: &str) -> String {
    let joined = format!("/{}", raw.trim());
    let collapsed = REPEATED_SLASHES.replace_all(&joined, "/");
    let trimmed = collapsed.trim_end_matches('/');

    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("/"), "/");
        assert_eq!(normalize_slug(""), "/");
        assert_eq!(normalize_slug("about"), "/about");
        assert_eq!(normalize_slug("/docs//setup/"), "/docs/setup");
        assert_eq!(normalize_slug("  /news "), "/news");
    }

    #[test]
    fn test_seeded_pages() {
        let store = PageStore::seeded();
        let slugs: Vec<_> = store.list().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["/", "/products", "/about", "/admin"]);
        assert!(store.get("/about").is_some());
    }

    #[test]
    fn test_missing_page_is_typed() {
        let store = PageStore::seeded();
        assert!(store.get("/nope").is_none());
        assert!(matches!(
            store.require("/nope"),
            Err(StoreError::NotFound(slug)) if slug == "/nope"
        ));
    }

    #[test]
    fn test_create_returns_existing() {
        let mut store = PageStore::seeded();
        let about = store.create("/about", "Other").unwrap();
        assert_eq!(about.metadata.title, "About Us");

        let fresh = store.create("news", "News").unwrap();
        assert_eq!(fresh.slug, "/news");
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_persisted_pages_overlay_seed() {
        let dir = TempDir::new().unwrap();
        {
            let mut store = PageStore::open(dir.path(), "pages").unwrap();
            let mut about = store.require("/about").unwrap().clone();
            about.metadata.title = "About Folio".to_string();
            store.save("/about", about).unwrap();
            store.create("/news", "News").unwrap();
            assert!(store.delete("/products").unwrap().is_some());
        }

        let store = PageStore::open(dir.path(), "pages").unwrap();
        assert_eq!(store.require("/about").unwrap().metadata.title, "About Folio");
        assert!(store.get("/news").is_some());
        // Seed pages are never removed by the overlay
        assert!(store.get("/products").is_some());
    }

    #[test]
    fn test_reset_returns_to_seed() {
        let dir = TempDir::new().unwrap();
        let mut store = PageStore::open(dir.path(), "pages").unwrap();
        store.create("/news", "News").unwrap();
        assert!(dir.path().join("pages.json").exists());

        store.reset().unwrap();
        assert!(store.get("/news").is_none());
        assert!(!dir.path().join("pages.json").exists());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_corrupt_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pages.json"), "{ not json").unwrap();
        let store = PageStore::open(dir.path(), "pages").unwrap();
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_corrupt_file_survives_next_write() {
        let dir = TempDir::new().unwrap();
        let broken = r#"{"version": 1, "saved_at": "2026-01-01T00:00:00+00:00", "pages": {"/mine": {"slug": "/mine", "markdownBody": "months of work",}}}"#;
        fs::write(dir.path().join("pages.json"), broken).unwrap();

        let mut store = PageStore::open(dir.path(), "pages").unwrap();
        assert!(store.get("/mine").is_none());
        store.create("/other", "Other").unwrap();

        let backup = fs::read_to_string(dir.path().join("pages.json.bak")).unwrap();
        assert_eq!(backup, broken);
        let current = fs::read_to_string(dir.path().join("pages.json")).unwrap();
        assert!(current.contains("/other"));
    }

    #[test]
    fn test_outdated_file_is_set_aside() {
        let dir = TempDir::new().unwrap();
        let old = r#"{"version": 0, "saved_at": "2026-01-01T00:00:00+00:00", "pages": {}}"#;
        fs::write(dir.path().join("pages.json"), old).unwrap();

        let store = PageStore::open(dir.path(), "pages").unwrap();
        assert_eq!(store.len(), 4);
        assert!(!dir.path().join("pages.json").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("pages.json.bak")).unwrap(),
            old
        );
    }

    #[test]
    fn test_save_all_writes_once() {
        let dir = TempDir::new().unwrap();
        let mut store = PageStore::open(dir.path(), "pages").unwrap();
        let pages = vec![
            PageRecord::parse("docs//setup/", "---\ntitle: Setup\n---\n"),
            PageRecord::parse("/news", "---\ntitle: News\n---\n"),
        ];

        assert_eq!(store.save_all(pages).unwrap(), 2);
        assert_eq!(store.require("/docs/setup").unwrap().slug, "/docs/setup");

        let reopened = PageStore::open(dir.path(), "pages").unwrap();
        assert_eq!(reopened.require("/news").unwrap().metadata.title, "News");
        assert_eq!(reopened.len(), 6);
    }

    #[test]
    fn test_save_all_empty_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = PageStore::open(dir.path(), "pages").unwrap();
        assert_eq!(store.save_all(Vec::new()).unwrap(), 0);
        assert!(!dir.path().join("pages.json").exists());
    }

    #[test]
    fn test_save_normalizes_slug() {
        let mut store = PageStore::seeded();
        let page = PageRecord::parse("ignored", "---\ntitle: Docs\n---\n");
        store.save("docs/", page).unwrap();
        assert_eq!(store.require("/docs").unwrap().slug, "/docs");
    }
}
