use super::name::{ItemName, NameError};
use crate::tier::Tier;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One item of a remote catalog export (`[{"name", "tier", "img_url"}, ...]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: CatalogName,
    pub tier: u32,
    #[serde(default)]
    pub img_url: Option<String>,
}

/// Item names are plain strings, except for user-made items which arrive as
/// `{"Custom": "..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogName {
    Plain(String),
    Custom {
        #[serde(rename = "Custom")]
        custom: String,
    },
}

impl CatalogName {
    pub fn as_str(&self) -> &str {
        match self {
            CatalogName::Plain(name) => name,
            CatalogName::Custom { custom } => custom,
        }
    }
}

impl CatalogEntry {
    pub fn item_name(&self) -> Result<ItemName, NameError> {
        let label = self.name.as_str();
        if label.trim().is_empty() {
            return Err(NameError::EmptyLabel(label.to_string()));
        }
        let tier = Tier::from_number(self.tier).ok_or_else(|| NameError::InvalidTier {
            name: label.to_string(),
            tier: self.tier.to_string(),
        })?;
        Ok(ItemName::new(label, tier))
    }

    /// Parse a catalog export. Entries that do not fit the expected shape are
    /// skipped; only a document that is not a JSON array is an error.
    pub fn parse_all(json: &str) -> Result<Vec<CatalogEntry>> {
        let values: Vec<serde_json::Value> =
            serde_json::from_str(json).context("Catalog is not a JSON array")?;

        let mut entries = Vec::with_capacity(values.len());
        for (index, value) in values.into_iter().enumerate() {
            match serde_json::from_value::<CatalogEntry>(value) {
                Ok(entry) => entries.push(entry),
                Err(e) => log::warn!("Skipping catalog entry {}: {}", index, e),
            }
        }

        Ok(entries)
    }
}
