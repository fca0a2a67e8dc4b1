//! Region locator configuration

use opencv::core::{Rect, Scalar};
use serde::{Deserialize, Serialize};

/// Inclusive HSV bounds in OpenCV's 8-bit ranges (H 0-179, S and V 0-255)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HsvRange {
    pub lower: [u8; 3],
    pub upper: [u8; 3],
}

impl HsvRange {
    pub fn lower_scalar(&self) -> Scalar {
        Self::to_scalar(self.lower)
    }

    pub fn upper_scalar(&self) -> Scalar {
        Self::to_scalar(self.upper)
    }

    fn to_scalar(hsv: [u8; 3]) -> Scalar {
        Scalar::new(hsv[0] as f64, hsv[1] as f64, hsv[2] as f64, 0.0)
    }
}

/// Main locator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LocatorConfig {
    /// Near-white pixels that make up icon frames
    pub white_range: HsvRange,
    pub binary_threshold: f64,
    /// Boxes narrower or shorter than this are fragments
    pub min_region_size: i32,
    /// Boxes starting left of this belong to the board's side controls
    pub min_left_margin: i32,
    /// Number of tier bands, top to bottom
    pub row_count: usize,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            white_range: HsvRange {
                lower: [0, 0, 168],
                upper: [172, 111, 255],
            },
            binary_threshold: 127.0,
            min_region_size: 35,
            min_left_margin: 30,
            row_count: 6,
        }
    }
}

impl LocatorConfig {
    /// Whether a contour's bounding box can hold an item icon
    pub fn accepts(&self, rect: &Rect) -> bool {
        rect.width >= self.min_region_size
            && rect.height >= self.min_region_size
            && rect.x >= self.min_left_margin
    }
}
