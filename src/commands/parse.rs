//! Parse a single document and print the page record

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::content::loader::slug_for;
use crate::content::PageRecord;

/// Parse `path` and print the record as JSON. Lines the parser could not
/// interpret are logged as warnings; the record is printed regardless.
pub fn run(path: &Path, slug: Option<&str>) -> Result<()> {
    let document = fs::read_to_string(path)?;
    let slug = match slug {
        Some(slug) => slug.to_string(),
        None => slug_for(Path::new(path.file_name().unwrap_or(path.as_os_str()))),
    };

    let (page, diagnostics) = PageRecord::parse_with_diagnostics(&slug, &document);
    for diagnostic in &diagnostics {
        tracing::warn!("{}: {}", path.display(), diagnostic);
    }

    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
