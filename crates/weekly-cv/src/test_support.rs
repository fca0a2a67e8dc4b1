//! Synthetic images for unit tests

use crate::Result;
use opencv::{
    core::{CV_8UC1, Mat, Rect, Scalar},
    imgproc,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Paint `rect` with 8px blocks of random gray. Gives SIFT plenty of corners.
pub fn paint_texture(image: &mut Mat, rect: Rect, seed: u64) -> Result<()> {
    let mut rng = StdRng::seed_from_u64(seed);
    let block = 8;
    for y in (rect.y..rect.y + rect.height).step_by(block as usize) {
        for x in (rect.x..rect.x + rect.width).step_by(block as usize) {
            let w = block.min(rect.x + rect.width - x);
            let h = block.min(rect.y + rect.height - y);
            let value = rng.gen_range(0u8..=255) as f64;
            imgproc::rectangle(
                image,
                Rect::new(x, y, w, h),
                Scalar::all(value),
                imgproc::FILLED,
                imgproc::LINE_8,
                0,
            )?;
        }
    }
    Ok(())
}

/// Square grayscale texture
pub fn texture(size: i32, seed: u64) -> Result<Mat> {
    let mut image = Mat::new_rows_cols_with_default(size, size, CV_8UC1, Scalar::all(0.0))?;
    paint_texture(&mut image, Rect::new(0, 0, size, size), seed)?;
    Ok(image)
}

/// Uniform image with no keypoints
pub fn blank(width: i32, height: i32, value: f64) -> Result<Mat> {
    Ok(Mat::new_rows_cols_with_default(height, width, CV_8UC1, Scalar::all(value))?)
}
