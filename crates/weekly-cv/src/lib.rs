//! Weekly board icon identification
//!
//! Locates item icons on a board screenshot and identifies each one against a
//! tier-indexed library of labeled reference icons using OpenCV.

pub mod error;
pub mod library;
pub mod locate;
pub mod matching;
pub mod pipeline;
pub mod region;
pub mod utils;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::LoadError;
pub use library::{LibraryConfig, LibraryLoader, LibraryOrder, ReferenceIcon, ReferenceLibrary};
pub use locate::{LocatorConfig, RegionLocator};
pub use matching::{BestMatch, IconMatcher};
pub use pipeline::{MatchResult, Pipeline, PipelineConfig};
pub use region::Region;

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Core traits for the CV system
pub mod traits {
    use super::*;
    use crate::matching::DescriptorSet;

    /// Similarity between a region and one reference icon; higher is better
    pub trait IconScorer {
        fn score(&self, region: &DescriptorSet, candidate: &DescriptorSet) -> Result<usize>;
    }
}
