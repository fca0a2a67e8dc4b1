//! Tier-indexed collection of labeled reference icons

pub mod loader;

pub use loader::LibraryLoader;

use crate::matching::{DescriptorExtractor, DescriptorSet};
use crate::utils::ImageUtils;
use crate::Result;
use opencv::core::Mat;
use opencv::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use weekly_core::Tier;

/// Labeled icon, normalized to the canonical height, with its descriptors
/// computed once at load time
#[derive(Debug, Clone)]
pub struct ReferenceIcon {
    pub label: String,
    pub tier: Tier,
    pub image: Mat,
    pub descriptors: DescriptorSet,
}

impl ReferenceIcon {
    pub fn from_grayscale(
        label: &str,
        tier: Tier,
        image: &Mat,
        canonical_height: i32,
        extractor: &DescriptorExtractor,
    ) -> Result<Self> {
        let image = ImageUtils::resize_to_height(image, canonical_height)?;
        let descriptors = extractor.extract(&image)?;

        Ok(Self {
            label: label.to_string(),
            tier,
            image,
            descriptors,
        })
    }
}

/// Order of icons within a tier. Ties in matching go to the later icon, so
/// this decides tie outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryOrder {
    /// Sorted by file name
    #[default]
    Lexicographic,
    /// Whatever order the filesystem lists entries in (platform dependent)
    Directory,
}

/// Reference loading configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    pub extensions: Vec<String>,
    pub order: LibraryOrder,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            extensions: ["png", "jpg", "jpeg", "bmp", "webp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            order: LibraryOrder::default(),
        }
    }
}

/// Read-only after loading; shared by every match in a run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    canonical_height: i32,
    tiers: BTreeMap<Tier, Vec<ReferenceIcon>>,
}

impl ReferenceLibrary {
    pub fn new(canonical_height: i32) -> Self {
        Self {
            canonical_height,
            tiers: BTreeMap::new(),
        }
    }

    /// Load a `<label>_<tier>.<ext>` directory with the default loader settings
    pub fn load<P: AsRef<Path>>(dir: P, canonical_height: i32) -> Result<Self> {
        LibraryLoader::new(canonical_height).load(dir)
    }

    pub fn canonical_height(&self) -> i32 {
        self.canonical_height
    }

    /// Append to the icon's tier, after any icons already there
    pub fn insert(&mut self, icon: ReferenceIcon) {
        self.tiers.entry(icon.tier).or_default().push(icon);
    }

    /// Icons of `tier` in insertion order; empty for tiers with no icons.
    pub fn tier(&self, tier: Tier) -> &[ReferenceIcon] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn tiers(&self) -> impl Iterator<Item = (Tier, &[ReferenceIcon])> {
        self.tiers.iter().map(|(tier, icons)| (*tier, icons.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.tiers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Largest (width, height) over all icons
    pub fn max_icon_size(&self) -> (i32, i32) {
        self.tiers
            .values()
            .flatten()
            .fold((0, 0), |(w, h), icon| {
                (w.max(icon.image.cols()), h.max(icon.image.rows()))
            })
    }
}
