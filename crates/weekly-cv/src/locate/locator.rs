//! Color threshold and contour based icon localization

use super::LocatorConfig;
use crate::Result;
use crate::region::Region;
use anyhow::{Context, bail};
use opencv::{
    core::{self, Mat, Point, Rect, Vector},
    imgproc,
    prelude::*,
};
use weekly_core::TierBands;

/// Finds near-white icon frames on a BGR board screenshot.
pub struct RegionLocator {
    config: LocatorConfig,
}

impl RegionLocator {
    /// Create new locator
    pub fn new(config: LocatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LocatorConfig {
        &self.config
    }

    /// Regions in contour discovery order. A board with no frames gives an
    /// empty list.
    pub fn locate(&self, screenshot: &Mat) -> Result<Vec<Region>> {
        if screenshot.channels() != 3 {
            bail!(
                "Expected a 3-channel BGR screenshot, got {} channels",
                screenshot.channels()
            );
        }

        let mask = self.white_mask(screenshot)?;
        let binary = self.binarize(screenshot, &mask)?;
        let boxes = Self::external_boxes(&binary)?;

        let bands = TierBands::new(screenshot.rows().max(0) as u32, self.config.row_count);
        let regions = self.regions_from_boxes(boxes, &bands);

        log::debug!("Located {} candidate regions", regions.len());
        Ok(regions)
    }

    /// Apply the size and margin filters, then assign tiers by band
    pub fn regions_from_boxes<I>(&self, boxes: I, bands: &TierBands) -> Vec<Region>
    where
        I: IntoIterator<Item = Rect>,
    {
        boxes
            .into_iter()
            .filter(|rect| self.config.accepts(rect))
            .map(|rect| {
                let tier = bands.tier_at(rect.y);
                if !bands.contains(tier) {
                    log::warn!(
                        "Region at ({}, {}) falls outside the {} tier bands",
                        rect.x,
                        rect.y,
                        bands.row_count()
                    );
                }
                Region::from_rect(rect, tier)
            })
            .collect()
    }

    /// Pixels inside the configured HSV range
    fn white_mask(&self, bgr: &Mat) -> Result<Mat> {
        let mut hsv = Mat::default();
        imgproc::cvt_color(bgr, &mut hsv, imgproc::COLOR_BGR2HSV, 0)
            .context("HSV conversion failed")?;

        let mut mask = Mat::default();
        core::in_range(
            &hsv,
            &self.config.white_range.lower_scalar(),
            &self.config.white_range.upper_scalar(),
            &mut mask,
        )
        .context("HSV range masking failed")?;

        Ok(mask)
    }

    /// Masked image to grayscale, then a fixed binary threshold
    fn binarize(&self, bgr: &Mat, mask: &Mat) -> Result<Mat> {
        let mut masked = Mat::default();
        core::bitwise_and(bgr, bgr, &mut masked, mask).context("Mask application failed")?;

        let mut gray = Mat::default();
        imgproc::cvt_color(&masked, &mut gray, imgproc::COLOR_BGR2GRAY, 0)
            .context("Grayscale conversion failed")?;

        let mut binary = Mat::default();
        imgproc::threshold(
            &gray,
            &mut binary,
            self.config.binary_threshold,
            255.0,
            imgproc::THRESH_BINARY,
        )
        .context("Thresholding failed")?;

        Ok(binary)
    }

    /// Bounding boxes of outermost contours only
    fn external_boxes(binary: &Mat) -> Result<Vec<Rect>> {
        let mut contours = Vector::<Vector<Point>>::new();
        imgproc::find_contours(
            binary,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )
        .context("Contour extraction failed")?;

        contours
            .iter()
            .map(|contour| imgproc::bounding_rect(&contour).context("Bounding box failed"))
            .collect()
    }
}

impl Default for RegionLocator {
    fn default() -> Self {
        Self::new(LocatorConfig::default())
    }
}
