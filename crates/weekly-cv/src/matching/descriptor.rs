//! SIFT keypoint descriptors

use super::DescriptorSet;
use crate::Result;
use crate::utils::ImageUtils;
use anyhow::Context;
use opencv::{
    core::{self, KeyPoint, Mat, Vector},
    features2d::SIFT,
    prelude::*,
};

/// Computes scale and rotation invariant descriptors for grayscale images.
///
/// A detector is created per call so one extractor can be shared between
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorExtractor;

impl DescriptorExtractor {
    pub fn new() -> Self {
        Self
    }

    /// An image without keypoints yields an empty set, not an error.
    pub fn extract(&self, image: &Mat) -> Result<DescriptorSet> {
        if image.empty() {
            return Ok(DescriptorSet::empty());
        }
        let gray = ImageUtils::to_grayscale(image)?;

        let mut sift = SIFT::create_def().context("Failed to create SIFT detector")?;
        let mut keypoints = Vector::<KeyPoint>::new();
        let mut descriptors = Mat::default();
        sift.detect_and_compute(&gray, &core::no_array(), &mut keypoints, &mut descriptors, false)
            .context("SIFT detection failed")?;

        if keypoints.is_empty() {
            return Ok(DescriptorSet::empty());
        }
        Ok(DescriptorSet::new(descriptors))
    }
}
