//! Board identification using weekly-cv

use anyhow::Result;
use std::path::{Path, PathBuf};
use weekly_cv::{MatchResult, Pipeline, PipelineConfig, utils::ImageUtils};

/// Overrides given on the command line
#[derive(Debug, Default)]
pub struct Overrides {
    pub rows: Option<usize>,
    pub canonical_height: Option<i32>,
    pub json: Option<PathBuf>,
    pub annotate: Option<PathBuf>,
}

pub fn build_config(config_path: Option<&Path>, overrides: Overrides) -> Result<PipelineConfig> {
    let mut config = match config_path {
        Some(path) => PipelineConfig::from_file(path)?,
        None => PipelineConfig::default(),
    };

    if let Some(rows) = overrides.rows {
        config.locator.row_count = rows;
    }
    if let Some(height) = overrides.canonical_height {
        config.canonical_height = height;
    }
    if overrides.json.is_some() {
        config.output.results_json = overrides.json;
    }
    if overrides.annotate.is_some() {
        config.output.annotated_image = overrides.annotate;
    }

    Ok(config)
}

/// Identify every icon on the board and write the configured outputs
pub fn identify_board(
    screenshot_path: &Path,
    references: &Path,
    config: PipelineConfig,
) -> Result<Vec<MatchResult>> {
    let pipeline = Pipeline::new(config);
    let library = pipeline.load_library(references)?;

    let screenshot = ImageUtils::load_color(screenshot_path)?;
    let results = pipeline.run(&screenshot, &library)?;

    let output = &pipeline.config().output;
    if let Some(path) = &output.results_json {
        Pipeline::export_json(&results, path)?;
        log::info!("Results saved: {:?}", path);
    }
    if let Some(path) = &output.annotated_image {
        pipeline.annotate(&screenshot, &results, path)?;
    }

    Ok(results)
}

pub fn print_results(results: &[MatchResult]) {
    for result in results {
        let region = &result.region;
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            region.x,
            region.y,
            region.width,
            region.height,
            region.tier,
            result.label.as_deref().unwrap_or("-"),
            result.score
        );
    }

    let labels = Pipeline::distinct_labels(results);
    println!("{} distinct items: {:?}", labels.len(), labels);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_on_defaults() -> Result<()> {
        let config = build_config(
            None,
            Overrides {
                rows: Some(4),
                canonical_height: Some(96),
                json: Some("out.json".into()),
                annotate: None,
            },
        )?;
        assert_eq!(config.locator.row_count, 4);
        assert_eq!(config.canonical_height, 96);
        assert_eq!(config.output.results_json, Some(PathBuf::from("out.json")));
        assert_eq!(config.output.annotated_image, None);
        Ok(())
    }
}
