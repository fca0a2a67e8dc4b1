//! Catalog vs. reference directory check

use anyhow::{Context, Result};
use std::path::Path;
use weekly_core::{CatalogEntry, ItemName};

/// A catalog item whose reference icon is not in the directory
#[derive(Debug, Clone, PartialEq)]
pub struct MissingReference {
    pub name: ItemName,
    pub file_name: String,
    pub img_url: Option<String>,
}

pub fn missing_references(
    catalog_path: &Path,
    references: &Path,
    extension: &str,
) -> Result<Vec<MissingReference>> {
    let text = std::fs::read_to_string(catalog_path)
        .with_context(|| format!("Failed to read catalog: {:?}", catalog_path))?;
    let entries = CatalogEntry::parse_all(&text)?;

    let mut missing = Vec::new();
    for entry in entries {
        let name = match entry.item_name() {
            Ok(name) => name,
            Err(e) => {
                log::warn!("Skipping catalog item: {}", e);
                continue;
            }
        };

        let file_name = name.file_name(extension);
        if references.join(&file_name).exists() {
            continue;
        }
        if entry.img_url.is_none() {
            log::warn!("Missing image url for {}", name.label);
        }

        missing.push(MissingReference {
            name,
            file_name,
            img_url: entry.img_url,
        });
    }

    Ok(missing)
}

pub fn print_missing(missing: &[MissingReference]) {
    for item in missing {
        println!("{}\t{}", item.file_name, item.img_url.as_deref().unwrap_or("-"));
    }
    log::info!("{} reference icons missing", missing.len());
}
