//! Image loading, conversion and scaling helpers

use crate::Result;
use anyhow::{Context, bail};
use opencv::{
    core::{Mat, Rect, Size, Vector},
    imgcodecs::{self, IMREAD_COLOR},
    imgproc,
    prelude::*,
};
use opencv_match::prelude::*;
use std::path::Path;

/// Image utility functions leveraging opencv-match conversions
pub struct ImageUtils;

impl ImageUtils {
    /// Load image as grayscale Mat using opencv-match.
    ///
    /// Goes through the `image` crate so icons with an alpha channel decode
    /// the same way as opaque ones.
    pub fn load_grayscale<P: AsRef<Path>>(path: P) -> Result<Mat> {
        let img = image::open(&path)
            .with_context(|| format!("Failed to open image: {:?}", path.as_ref()))?
            .to_rgba8();

        opencv_match::convert::mat_to_grayscale(&img.try_into_cv()?, true)
            .context("Failed to convert image to grayscale")
    }

    /// Load image directly from path as OpenCV Mat (BGR)
    pub fn load_color<P: AsRef<Path>>(path: P) -> Result<Mat> {
        let path_str = path.as_ref().to_string_lossy();

        let mat = imgcodecs::imread(&path_str, IMREAD_COLOR)
            .with_context(|| format!("Failed to load color image: {}", path_str))?;
        if mat.empty() {
            bail!("Could not decode image: {}", path_str);
        }

        Ok(mat)
    }

    /// Save Mat as image
    pub fn save_image<P: AsRef<Path>>(mat: &Mat, path: P) -> Result<()> {
        let path_str = path.as_ref().to_string_lossy();

        imgcodecs::imwrite(&path_str, mat, &Vector::new())
            .with_context(|| format!("Failed to save image: {}", path_str))?;

        Ok(())
    }

    /// BGR to single-channel intensity. Single-channel input is copied as-is.
    pub fn to_grayscale(image: &Mat) -> Result<Mat> {
        if image.channels() == 1 {
            return Ok(image.try_clone()?);
        }

        let mut gray = Mat::default();
        imgproc::cvt_color(image, &mut gray, imgproc::COLOR_BGR2GRAY, 0)
            .context("Grayscale conversion failed")?;
        Ok(gray)
    }

    /// Width that keeps the aspect ratio when scaling to `target_height`.
    pub fn scaled_width(width: i32, height: i32, target_height: i32) -> i32 {
        if height <= 0 {
            return width.max(1);
        }
        let scaled = (width as f64 * target_height as f64 / height as f64).round() as i32;
        scaled.max(1)
    }

    /// Scale to `target_height`, keeping the aspect ratio. Shrinking uses
    /// area averaging, enlarging uses bilinear interpolation.
    pub fn resize_to_height(image: &Mat, target_height: i32) -> Result<Mat> {
        let size = image.size()?;
        if size.height <= 0 || size.width <= 0 {
            bail!("Cannot resize an empty image");
        }
        if size.height == target_height {
            return Ok(image.try_clone()?);
        }

        let width = Self::scaled_width(size.width, size.height, target_height);
        let interpolation = if target_height < size.height {
            imgproc::INTER_AREA
        } else {
            imgproc::INTER_LINEAR
        };

        let mut resized = Mat::default();
        imgproc::resize(
            image,
            &mut resized,
            Size::new(width, target_height),
            0.0,
            0.0,
            interpolation,
        )
        .context("Resize failed")?;

        Ok(resized)
    }

    /// Copy of the pixels under `rect`, clipped to the image bounds.
    pub fn crop(image: &Mat, rect: Rect) -> Result<Mat> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x + rect.width).min(image.cols());
        let y1 = (rect.y + rect.height).min(image.rows());
        if x1 <= x0 || y1 <= y0 {
            bail!("Crop {:?} lies outside the image", rect);
        }
        let clipped = Rect::new(x0, y0, x1 - x0, y1 - y0);

        let roi = Mat::roi(image, clipped).context("Failed to take region of interest")?;
        Ok(roi.try_clone()?)
    }
}
