//! Locate, crop and match every icon on a board screenshot

use super::config::PipelineConfig;
use crate::library::{LibraryLoader, ReferenceLibrary};
use crate::locate::RegionLocator;
use crate::matching::IconMatcher;
use crate::region::Region;
use crate::utils::ImageUtils;
use crate::Result;
use anyhow::Context;
use opencv::{
    core::{Mat, Point, Scalar},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Identification of one located region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub region: Region,
    /// `None` when the region's tier had no reference icons
    pub label: Option<String>,
    /// Number of cross-checked descriptor matches
    pub score: usize,
}

impl MatchResult {
    fn unmatched(region: Region) -> Self {
        Self {
            region,
            label: None,
            score: 0,
        }
    }
}

/// Runs the locator and matcher over a whole board
pub struct Pipeline {
    config: PipelineConfig,
    locator: RegionLocator,
    matcher: IconMatcher,
}

impl Pipeline {
    /// Create new pipeline
    pub fn new(config: PipelineConfig) -> Self {
        let locator = RegionLocator::new(config.locator.clone());
        let matcher = IconMatcher::new(config.canonical_height);

        Self {
            config,
            locator,
            matcher,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Load a reference directory with this pipeline's height and library settings
    pub fn load_library<P: AsRef<Path>>(&self, dir: P) -> Result<ReferenceLibrary> {
        let library = LibraryLoader::from_config(self.config.canonical_height, &self.config.library)
            .load(dir)?;

        let (max_w, max_h) = library.max_icon_size();
        log::debug!("Largest reference icon: {}x{}", max_w, max_h);

        Ok(library)
    }

    /// Read a screenshot from disk and run the pipeline on it
    pub fn run_from_file<P: AsRef<Path>>(
        &self,
        screenshot_path: P,
        library: &ReferenceLibrary,
    ) -> Result<Vec<MatchResult>> {
        let screenshot = ImageUtils::load_color(&screenshot_path)
            .with_context(|| format!("Failed to load screenshot: {:?}", screenshot_path.as_ref()))?;

        self.run(&screenshot, library)
    }

    /// One result per located region, in locator order.
    ///
    /// A region that fails to match is logged and reported without a label;
    /// it does not abort the run.
    pub fn run(&self, screenshot: &Mat, library: &ReferenceLibrary) -> Result<Vec<MatchResult>> {
        let start_time = std::time::Instant::now();

        if library.canonical_height() != self.config.canonical_height {
            log::warn!(
                "Library icons are {}px high but regions are scaled to {}px",
                library.canonical_height(),
                self.config.canonical_height
            );
        }

        let regions = self.locator.locate(screenshot)?;
        let gray = ImageUtils::to_grayscale(screenshot)?;

        #[cfg(feature = "parallel")]
        let results: Vec<MatchResult> = {
            use rayon::prelude::*;
            regions
                .par_iter()
                .map(|region| self.match_region(&gray, region, library))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<MatchResult> = regions
            .iter()
            .map(|region| self.match_region(&gray, region, library))
            .collect();

        log::info!(
            "Matched {} regions ({} distinct labels) in {}ms",
            results.len(),
            Self::distinct_labels(&results).len(),
            start_time.elapsed().as_millis()
        );

        Ok(results)
    }

    fn match_region(&self, gray: &Mat, region: &Region, library: &ReferenceLibrary) -> MatchResult {
        let candidates = library.tier(region.tier);
        if candidates.is_empty() {
            log::debug!("No reference icons for tier {}", region.tier);
            return MatchResult::unmatched(*region);
        }

        let best = ImageUtils::crop(gray, region.to_rect())
            .and_then(|crop| self.matcher.match_best(&crop, candidates));

        match best {
            Ok(best) => {
                log::debug!(
                    "Region ({}, {}, {}x{}) -> {:?} ({} matches)",
                    region.x,
                    region.y,
                    region.width,
                    region.height,
                    best.label,
                    best.score
                );
                MatchResult {
                    region: *region,
                    label: best.label,
                    score: best.score,
                }
            }
            Err(e) => {
                log::warn!("Matching failed for region {:?}: {:#}", region, e);
                MatchResult::unmatched(*region)
            }
        }
    }

    /// Labels identified at least once, sorted
    pub fn distinct_labels(results: &[MatchResult]) -> BTreeSet<&str> {
        results
            .iter()
            .filter_map(|result| result.label.as_deref())
            .collect()
    }

    /// Draw region boxes and labels onto a copy of the screenshot and save it
    pub fn annotate<P: AsRef<Path>>(
        &self,
        screenshot: &Mat,
        results: &[MatchResult],
        output_path: P,
    ) -> Result<()> {
        let mut output = screenshot.try_clone()?;

        for result in results {
            // Green for a match, red for a guess with nothing in common
            let color = if result.score > 0 {
                Scalar::new(0.0, 200.0, 0.0, 255.0)
            } else {
                Scalar::new(0.0, 0.0, 220.0, 255.0)
            };

            imgproc::rectangle(&mut output, result.region.to_rect(), color, 2, LINE_8, 0)?;

            let label = match &result.label {
                Some(label) => format!("{} ({})", label, result.score),
                None => "?".to_string(),
            };
            imgproc::put_text(
                &mut output,
                &label,
                Point::new(result.region.x, (result.region.y - 4).max(12)),
                FONT_HERSHEY_SIMPLEX,
                0.45,
                color,
                1,
                LINE_8,
                false,
            )?;
        }

        ImageUtils::save_image(&output, &output_path)?;
        log::info!("Annotated board saved: {:?}", output_path.as_ref());
        Ok(())
    }

    /// Export results in JSON format
    pub fn export_json(results: &[MatchResult], output_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(results)
            .context("Failed to serialize match results")?;

        std::fs::write(output_path, json)
            .with_context(|| format!("Failed to write JSON to: {:?}", output_path))?;

        Ok(())
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::ReferenceIcon;
    use crate::matching::DescriptorExtractor;
    use crate::test_support::{paint_texture, texture};
    use opencv::core::{CV_8UC3, Rect};
    use tempfile::tempdir;
    use weekly_core::Tier;

    /// 800x600 board with one white-framed, textured 60x60 icon at (100, 5)
    fn board_with_icon() -> Result<Mat> {
        let mut image =
            Mat::new_rows_cols_with_default(600, 800, CV_8UC3, Scalar::new(160.0, 90.0, 30.0, 0.0))?;
        imgproc::rectangle(
            &mut image,
            Rect::new(100, 5, 60, 60),
            Scalar::all(255.0),
            imgproc::FILLED,
            LINE_8,
            0,
        )?;
        paint_texture(&mut image, Rect::new(104, 9, 52, 52), 11)?;
        Ok(image)
    }

    fn icon_from(image: &Mat, rect: Rect, label: &str, tier: Tier) -> Result<ReferenceIcon> {
        let gray = ImageUtils::to_grayscale(image)?;
        let crop = ImageUtils::crop(&gray, rect)?;
        ReferenceIcon::from_grayscale(label, tier, &crop, 120, &DescriptorExtractor::new())
    }

    #[test]
    fn test_end_to_end_single_icon() -> Result<()> {
        let board = board_with_icon()?;
        let mut library = ReferenceLibrary::new(120);
        library.insert(icon_from(&board, Rect::new(100, 5, 60, 60), "ant", Tier::new(0))?);
        library.insert(ReferenceIcon::from_grayscale(
            "otter",
            Tier::new(1),
            &texture(120, 12)?,
            120,
            &DescriptorExtractor::new(),
        )?);

        let results = Pipeline::default().run(&board, &library)?;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].region, Region::new(100, 5, 60, 60, Tier::new(0)));
        assert_eq!(results[0].label.as_deref(), Some("ant"));
        assert!(results[0].score > 0);
        Ok(())
    }

    #[test]
    fn test_tier_without_references() -> Result<()> {
        let board = board_with_icon()?;
        let mut library = ReferenceLibrary::new(120);
        library.insert(ReferenceIcon::from_grayscale(
            "otter",
            Tier::new(1),
            &texture(120, 12)?,
            120,
            &DescriptorExtractor::new(),
        )?);

        let results = Pipeline::default().run(&board, &library)?;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, None);
        assert_eq!(results[0].score, 0);
        Ok(())
    }

    #[test]
    fn test_empty_board_and_library() -> Result<()> {
        let board =
            Mat::new_rows_cols_with_default(600, 800, CV_8UC3, Scalar::new(160.0, 90.0, 30.0, 0.0))?;
        let results = Pipeline::default().run(&board, &ReferenceLibrary::new(120))?;
        assert!(results.is_empty());
        Ok(())
    }

    #[test]
    fn test_outputs_are_written() -> Result<()> {
        let board = board_with_icon()?;
        let mut library = ReferenceLibrary::new(120);
        library.insert(icon_from(&board, Rect::new(100, 5, 60, 60), "ant", Tier::new(0))?);

        let pipeline = Pipeline::default();
        let results = pipeline.run(&board, &library)?;

        let dir = tempdir()?;
        let json_path = dir.path().join("results.json");
        Pipeline::export_json(&results, &json_path)?;
        let parsed: Vec<MatchResult> = serde_json::from_str(&std::fs::read_to_string(&json_path)?)?;
        assert_eq!(parsed, results);

        let image_path = dir.path().join("annotated.png");
        pipeline.annotate(&board, &results, &image_path)?;
        assert!(image_path.exists());

        let board_path = dir.path().join("board.png");
        ImageUtils::save_image(&board, &board_path)?;
        assert_eq!(pipeline.run_from_file(&board_path, &library)?, results);
        Ok(())
    }

    #[test]
    fn test_distinct_labels() {
        let region = Region::new(40, 0, 40, 40, Tier::new(0));
        let results = vec![
            MatchResult { region, label: Some("ant".into()), score: 3 },
            MatchResult { region, label: None, score: 0 },
            MatchResult { region, label: Some("ant".into()), score: 5 },
            MatchResult { region, label: Some("bee".into()), score: 1 },
        ];
        let labels: Vec<_> = Pipeline::distinct_labels(&results).into_iter().collect();
        assert_eq!(labels, ["ant", "bee"]);
    }
}
