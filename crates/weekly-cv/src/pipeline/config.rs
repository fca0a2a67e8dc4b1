//! Pipeline configuration

use crate::library::LibraryConfig;
use crate::locate::LocatorConfig;
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Height every reference icon and region crop is scaled to
    pub canonical_height: i32,
    pub locator: LocatorConfig,
    pub library: LibraryConfig,
    pub output: OutputConfig,
}

/// Optional artifacts written after a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Screenshot with region boxes and labels drawn on it
    pub annotated_image: Option<PathBuf>,
    /// Results as pretty-printed JSON
    pub results_json: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            canonical_height: 120,
            locator: LocatorConfig::default(),
            library: LibraryConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl PipelineConfig {
    /// Read a JSON config. Missing fields take their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {:?}", path))?;
        serde_json::from_str(&text).with_context(|| format!("Invalid config: {:?}", path))
    }
}
