//! Reference directory loading

use super::{LibraryConfig, LibraryOrder, ReferenceIcon, ReferenceLibrary};
use crate::error::LoadError;
use crate::matching::DescriptorExtractor;
use crate::utils::image::ImageUtils;
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use weekly_core::ItemName;

/// Builds a [`ReferenceLibrary`] from a flat directory of
/// `<label>_<tier>.<ext>` files.
///
/// Only a missing or unreadable directory fails the load. Badly named or
/// undecodable files are skipped with a warning.
pub struct LibraryLoader {
    canonical_height: i32,
    supported_extensions: Vec<String>,
    order: LibraryOrder,
    extractor: DescriptorExtractor,
}

impl LibraryLoader {
    /// Create new loader with the default extensions and ordering
    pub fn new(canonical_height: i32) -> Self {
        Self::from_config(canonical_height, &LibraryConfig::default())
    }

    pub fn from_config(canonical_height: i32, config: &LibraryConfig) -> Self {
        Self {
            canonical_height,
            supported_extensions: config
                .extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            order: config.order,
            extractor: DescriptorExtractor::new(),
        }
    }

    /// Add supported extension
    pub fn add_extension(mut self, ext: &str) -> Self {
        self.supported_extensions.push(ext.to_lowercase());
        self
    }

    pub fn with_order(mut self, order: LibraryOrder) -> Self {
        self.order = order;
        self
    }

    /// Load every reference icon in `dir`
    pub fn load<P: AsRef<Path>>(&self, dir: P) -> Result<ReferenceLibrary> {
        let dir = dir.as_ref();
        let paths = self.list_images(dir)?;

        let mut library = ReferenceLibrary::new(self.canonical_height);
        let mut skipped = 0usize;

        for path in paths {
            match self.load_icon(&path) {
                Ok(icon) => {
                    log::debug!("Loaded {} into tier {}", icon.label, icon.tier);
                    library.insert(icon);
                }
                Err(e) => {
                    log::warn!("Skipping reference {:?}: {:#}", path, e);
                    skipped += 1;
                }
            }
        }

        log::info!(
            "Loaded {} reference icons in {} tiers from {:?} ({} skipped)",
            library.len(),
            library.tiers().count(),
            dir,
            skipped
        );

        Ok(library)
    }

    fn load_icon(&self, path: &Path) -> Result<ReferenceIcon> {
        let name = ItemName::from_path(path)?;
        let image = ImageUtils::load_grayscale(path)?;

        ReferenceIcon::from_grayscale(
            &name.label,
            name.tier,
            &image,
            self.canonical_height,
            &self.extractor,
        )
    }

    /// Image files in `dir`, in the configured order
    fn list_images(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Err(LoadError::MissingDirectory(dir.to_path_buf()).into());
        }
        if !dir.is_dir() {
            return Err(LoadError::NotADirectory(dir.to_path_buf()).into());
        }

        let entries = fs::read_dir(dir).map_err(|source| LoadError::Unreadable {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Failed to read entry in {:?}: {}", dir, e);
                    continue;
                }
            };

            let path = entry.path();
            if path.is_file() && self.is_supported(&path) {
                paths.push(path);
            } else {
                log::debug!("Ignoring {:?}", path);
            }
        }

        if self.order == LibraryOrder::Lexicographic {
            paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }

        Ok(paths)
    }

    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.supported_extensions.contains(&ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use tempfile::tempdir;
    use weekly_core::Tier;

    fn write_icon(dir: &Path, name: &str) -> Result<()> {
        GrayImage::from_pixel(40, 40, Luma([200u8])).save(dir.join(name))?;
        Ok(())
    }

    #[test]
    fn test_malformed_names_are_skipped() -> Result<()> {
        let dir = tempdir()?;
        write_icon(dir.path(), "foo.png")?;
        write_icon(dir.path(), "bar_3.png")?;

        let library = LibraryLoader::new(120).load(dir.path())?;
        assert_eq!(library.len(), 1);

        let tier = library.tier(Tier::new(2));
        assert_eq!(tier.len(), 1);
        assert_eq!(tier[0].label, "bar");
        Ok(())
    }

    #[test]
    fn test_unsupported_and_undecodable_files() -> Result<()> {
        let dir = tempdir()?;
        write_icon(dir.path(), "ant_1.png")?;
        fs::write(dir.path().join("notes_1.txt"), "not an icon")?;
        fs::write(dir.path().join("broken_1.png"), [0u8, 1, 2, 3])?;

        let library = LibraryLoader::new(120).load(dir.path())?;
        assert_eq!(library.len(), 1);
        assert_eq!(library.tier(Tier::new(0))[0].label, "ant");

        let with_txt = LibraryLoader::new(120).add_extension("TXT").load(dir.path())?;
        assert_eq!(with_txt.len(), 1);
        Ok(())
    }

    #[test]
    fn test_lexicographic_order_within_tier() -> Result<()> {
        let dir = tempdir()?;
        for name in ["cricket_1.png", "ant_1.png", "beaver_1.png", "otter_2.png"] {
            write_icon(dir.path(), name)?;
        }

        let library = LibraryLoader::new(120).load(dir.path())?;
        let labels: Vec<_> = library
            .tier(Tier::new(0))
            .iter()
            .map(|icon| icon.label.as_str())
            .collect();
        assert_eq!(labels, ["ant", "beaver", "cricket"]);
        assert_eq!(library.tier(Tier::new(1)).len(), 1);
        Ok(())
    }

    #[test]
    fn test_icons_scaled_to_canonical_height() -> Result<()> {
        let dir = tempdir()?;
        GrayImage::from_pixel(100, 50, Luma([10u8])).save(dir.path().join("wide_1.png"))?;

        let library = ReferenceLibrary::load(dir.path(), 120)?;
        assert_eq!(library.max_icon_size(), (240, 120));
        Ok(())
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = LibraryLoader::new(120).load(&missing).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_file_instead_of_directory() -> Result<()> {
        let dir = tempdir()?;
        let file = dir.path().join("ant_1.png");
        write_icon(dir.path(), "ant_1.png")?;

        let err = LibraryLoader::new(120).load(&file).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LoadError>(),
            Some(LoadError::NotADirectory(_))
        ));
        Ok(())
    }
}
