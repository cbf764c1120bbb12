//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub language: String,

    // Directory
    pub content_dir: String,
    pub public_dir: String,
    pub store_dir: String,

    /// Namespace key of the persisted page store
    pub store_key: String,

    #[serde(default)]
    pub highlight: HighlightConfig,
    #[serde(default)]
    pub server: ServerConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            language: "en".to_string(),

            content_dir: "content".to_string(),
            public_dir: "public".to_string(),
            store_dir: ".folio".to_string(),
            store_key: "cms_pages_v1".to_string(),

            highlight: HighlightConfig::default(),
            server: ServerConfig::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration for the text block renderer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

/// Development server defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Folio");
        assert_eq!(config.store_key, "cms_pages_v1");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Acme Docs
content_dir: pages
server:
  port: 8080
highlight:
  line_number: false
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Acme Docs");
        assert_eq!(config.content_dir, "pages");
        assert_eq!(config.public_dir, "public");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.ip, "localhost");
        assert!(!config.highlight.line_number);
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let config: SiteConfig = serde_yaml::from_str("footer_note: hi\n").unwrap();
        assert!(config.extra.contains_key("footer_note"));
    }
}
