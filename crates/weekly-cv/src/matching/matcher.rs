//! Best-match search over the reference icons of one tier

use super::{BestMatch, DescriptorExtractor, DescriptorSet};
use crate::library::ReferenceIcon;
use crate::traits::IconScorer;
use crate::utils::ImageUtils;
use crate::Result;
use anyhow::Context;
use opencv::{
    core::{self, DMatch, Mat, Vector, NORM_L1},
    features2d::BFMatcher,
    prelude::*,
};

/// Counts mutually nearest descriptor pairs with a brute-force matcher.
#[derive(Debug, Clone, Copy)]
pub struct CrossCheckScorer {
    norm_type: i32,
}

impl CrossCheckScorer {
    pub fn new(norm_type: i32) -> Self {
        Self { norm_type }
    }
}

impl Default for CrossCheckScorer {
    fn default() -> Self {
        Self::new(NORM_L1)
    }
}

impl IconScorer for CrossCheckScorer {
    fn score(&self, region: &DescriptorSet, candidate: &DescriptorSet) -> Result<usize> {
        if region.is_empty() || candidate.is_empty() {
            return Ok(0);
        }

        let matcher = BFMatcher::create(self.norm_type, true)
            .context("Failed to create brute-force matcher")?;
        let mut matches = Vector::<DMatch>::new();
        matcher
            .train_match(
                &region.descriptors,
                &candidate.descriptors,
                &mut matches,
                &core::no_array(),
            )
            .context("Descriptor matching failed")?;

        Ok(matches.len())
    }
}

/// Identifies a cropped region by descriptor matching.
///
/// There is no confidence cutoff: as long as the tier has candidates some
/// label is returned, even with a score of zero.
pub struct IconMatcher<S = CrossCheckScorer> {
    canonical_height: i32,
    extractor: DescriptorExtractor,
    scorer: S,
}

impl IconMatcher {
    /// Create new matcher
    pub fn new(canonical_height: i32) -> Self {
        Self::with_scorer(canonical_height, CrossCheckScorer::default())
    }
}

impl<S: IconScorer> IconMatcher<S> {
    pub fn with_scorer(canonical_height: i32, scorer: S) -> Self {
        Self {
            canonical_height,
            extractor: DescriptorExtractor::new(),
            scorer,
        }
    }

    pub fn canonical_height(&self) -> i32 {
        self.canonical_height
    }

    /// Scale a grayscale crop to the library height and describe it
    pub fn describe(&self, region_image: &Mat) -> Result<DescriptorSet> {
        let resized = ImageUtils::resize_to_height(region_image, self.canonical_height)?;
        self.extractor.extract(&resized)
    }

    /// Match a grayscale crop against `candidates`, in order
    pub fn match_best(&self, region_image: &Mat, candidates: &[ReferenceIcon]) -> Result<BestMatch> {
        if candidates.is_empty() {
            return Ok(BestMatch::none());
        }

        let region = self.describe(region_image)?;
        self.match_descriptors(&region, candidates)
    }

    pub fn match_descriptors(
        &self,
        region: &DescriptorSet,
        candidates: &[ReferenceIcon],
    ) -> Result<BestMatch> {
        let mut best = BestMatch::none();
        for candidate in candidates {
            let score = self.scorer.score(region, &candidate.descriptors)?;
            log::trace!("{}: {} matches", candidate.label, score);
            best.offer(&candidate.label, score);
        }
        Ok(best)
    }
}
