use crate::tier::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

/// A reference file name that does not read as `<label>_<tier>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("`{0}` has no `_<tier>` suffix")]
    MissingTier(String),
    #[error("`{0}` has an empty label")]
    EmptyLabel(String),
    #[error("`{name}` has invalid tier `{tier}` (expected an integer >= 1)")]
    InvalidTier { name: String, tier: String },
}

/// Label and tier of a reference icon, as encoded in `<label>_<tier>.<ext>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemName {
    pub label: String,
    pub tier: Tier,
}

impl ItemName {
    pub fn new(label: impl Into<String>, tier: Tier) -> Self {
        Self {
            label: label.into(),
            tier,
        }
    }

    /// Parse a file stem. The tier is whatever follows the last `_`, so
    /// labels may themselves contain underscores.
    pub fn parse(stem: &str) -> Result<Self, NameError> {
        let (label, tier) = stem
            .rsplit_once('_')
            .ok_or_else(|| NameError::MissingTier(stem.to_string()))?;

        if label.trim().is_empty() {
            return Err(NameError::EmptyLabel(stem.to_string()));
        }

        let tier = tier
            .parse::<u32>()
            .ok()
            .and_then(Tier::from_number)
            .ok_or_else(|| NameError::InvalidTier {
                name: stem.to_string(),
                tier: tier.to_string(),
            })?;

        Ok(Self::new(label, tier))
    }

    pub fn from_path(path: &Path) -> Result<Self, NameError> {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        Self::parse(&stem)
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}_{}.{}", self.label, self.tier.number(), extension)
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tier {})", self.label, self.tier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_label_and_tier() {
        let name = ItemName::parse("bar_3").unwrap();
        assert_eq!(name.label, "bar");
        assert_eq!(name.tier.index(), 2);
    }

    #[test]
    fn test_label_with_underscore() {
        let name = ItemName::parse("sleeping_pill_1").unwrap();
        assert_eq!(name.label, "sleeping_pill");
        assert_eq!(name.tier.index(), 0);
    }

    #[test]
    fn test_malformed_names() {
        assert_eq!(
            ItemName::parse("foo"),
            Err(NameError::MissingTier("foo".to_string()))
        );
        assert!(matches!(ItemName::parse("_2"), Err(NameError::EmptyLabel(_))));
        assert!(matches!(ItemName::parse("ant_0"), Err(NameError::InvalidTier { .. })));
        assert!(matches!(ItemName::parse("ant_x"), Err(NameError::InvalidTier { .. })));
        assert!(matches!(ItemName::parse("ant_-1"), Err(NameError::InvalidTier { .. })));
    }

    #[test]
    fn test_from_path_uses_stem() {
        let name = ItemName::from_path(Path::new("/refs/pets/Ant_1.png")).unwrap();
        assert_eq!(name, ItemName::new("Ant", Tier::new(0)));
        assert_eq!(name.file_name("png"), "Ant_1.png");
    }
}
