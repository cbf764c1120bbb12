//! folio: a markdown page CMS built from typed content blocks
//!
//! Pages are markdown documents with a small front-matter block that names
//! the page layout, access requirements and an ordered list of blocks. The
//! crate parses those documents, resolves each page into a render list,
//! keeps pages in a persisted store, and serves or exports them as HTML.

pub mod access;
pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod registry;
pub mod render;
pub mod resolver;
pub mod server;
pub mod store;
pub mod writer;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// The main Folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Directory of page documents
    pub content_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Directory holding the persisted page store
    pub store_dir: PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::SiteConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);
        let public_dir = base_dir.join(&config.public_dir);
        let store_dir = base_dir.join(&config.store_dir);

        Self {
            config,
            base_dir,
            content_dir,
            public_dir,
            store_dir,
        }
    }

    /// Open the persisted page store
    pub fn open_store(&self) -> Result<store::PageStore> {
        Ok(store::PageStore::open(
            &self.store_dir,
            &self.config.store_key,
        )?)
    }

    /// Parse the content directory into the page store
    pub fn import(&self) -> Result<usize> {
        commands::import::run(self)
    }

    /// Export the stored pages as static HTML
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}
