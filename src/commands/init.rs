//! Initialize a new Folio site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content/docs"))?;

    // Create default _config.yml
    let config_content = r#"# Folio Configuration

# Site
title: Folio
description: ''
language: en

# Directory
content_dir: content
public_dir: public
store_dir: .folio
store_key: cms_pages_v1

# Writing
highlight:
  theme: base16-ocean.dark
  line_number: true

# Server
server:
  ip: localhost
  port: 4000
"#;

    let config_path = target_dir.join("_config.yml");
    if !config_path.exists() {
        fs::write(&config_path, config_content)?;
    }

    // Create a page that overrides the built-in landing page
    let welcome_content = r#"---
title: Welcome
layout: landing
components:
  - type: hero
    title: Pages built from blocks
    subtitle: Edit content/index.md and run folio import
    ctaText: Read the guide
    ctaLink: /docs/getting-started
  - type: text-block
---
# Welcome

Everything below the front-matter ends up in the text block above.
"#;

    let welcome_path = target_dir.join("content/index.md");
    if !welcome_path.exists() {
        fs::write(&welcome_path, welcome_content)?;
    }

    let guide_content = r#"---
title: Getting Started
description: How pages are put together
components:
  - type: text-block
  - type: contact-form
    id: guide-feedback
    title: Questions?
    submitLabel: Ask
---
# Getting Started

Pages live in `content/`. A document may start with a front-matter block
naming its `layout`, access rules and a list of `components`.

```yaml
requiresAuth: true
requiredRole: ADMIN
```

A page without components renders its body as a single article.
"#;

    let guide_path = target_dir.join("content/docs/getting-started.md");
    if !guide_path.exists() {
        fs::write(&guide_path, guide_content)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PageRecord;
    use crate::resolver::resolve;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_writes_parsable_pages() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        assert!(dir.path().join("_config.yml").exists());

        let guide = fs::read_to_string(dir.path().join("content/docs/getting-started.md")).unwrap();
        let (page, diagnostics) = PageRecord::parse_with_diagnostics("/docs/getting-started", &guide);
        assert!(diagnostics.is_empty(), "{:?}", diagnostics);
        assert_eq!(page.metadata.title, "Getting Started");

        let blocks = resolve(&page);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[1].id.as_deref(), Some("guide-feedback"));
    }

    #[test]
    fn test_init_site_keeps_existing_config() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("_config.yml"), "title: Mine\n").unwrap();
        init_site(dir.path()).unwrap();

        let config = fs::read_to_string(dir.path().join("_config.yml")).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
