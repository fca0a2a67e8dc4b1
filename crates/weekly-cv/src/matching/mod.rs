//! Feature-descriptor matching of region crops against reference icons

pub mod descriptor;
pub mod matcher;

pub use descriptor::DescriptorExtractor;
pub use matcher::{CrossCheckScorer, IconMatcher};

use opencv::core::Mat;
use opencv::prelude::*;
use serde::{Deserialize, Serialize};

/// Local keypoint descriptors of one image, one row per keypoint
#[derive(Debug, Clone)]
pub struct DescriptorSet {
    pub descriptors: Mat,
}

impl DescriptorSet {
    pub fn new(descriptors: Mat) -> Self {
        Self { descriptors }
    }

    pub fn empty() -> Self {
        Self::new(Mat::default())
    }

    pub fn len(&self) -> usize {
        if self.descriptors.empty() {
            0
        } else {
            self.descriptors.rows().max(0) as usize
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Winning candidate for one region.
///
/// `label` is `None` only when there was nothing to compare against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestMatch {
    pub label: Option<String>,
    pub score: usize,
}

impl BestMatch {
    pub fn none() -> Self {
        Self::default()
    }

    /// Take `label` if its score is at least the current best. Equal scores
    /// replace the current best, so the last of several tied candidates wins.
    pub fn offer(&mut self, label: &str, score: usize) {
        if score >= self.score {
            self.label = Some(label.to_string());
            self.score = score;
        }
    }

    pub fn select<'a, I>(scores: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, usize)>,
    {
        let mut best = Self::none();
        for (label, score) in scores {
            best.offer(label, score);
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highest_score_wins() {
        let best = BestMatch::select([("ant", 3), ("beaver", 9), ("cricket", 4)]);
        assert_eq!(best.label.as_deref(), Some("beaver"));
        assert_eq!(best.score, 9);
    }

    #[test]
    fn test_tie_goes_to_later_candidate() {
        let best = BestMatch::select([("ant", 7), ("beaver", 7)]);
        assert_eq!(best.label.as_deref(), Some("beaver"));

        let best = BestMatch::select([("ant", 7), ("beaver", 7), ("cricket", 2)]);
        assert_eq!(best.label.as_deref(), Some("beaver"));
    }

    #[test]
    fn test_zero_scores_still_pick_a_label() {
        let best = BestMatch::select([("ant", 0), ("beaver", 0)]);
        assert_eq!(best.label.as_deref(), Some("beaver"));
        assert_eq!(best.score, 0);
    }

    #[test]
    fn test_no_candidates() {
        let best = BestMatch::select(std::iter::empty());
        assert_eq!(best, BestMatch { label: None, score: 0 });
    }

    #[test]
    fn test_empty_descriptor_set() {
        let set = DescriptorSet::empty();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
