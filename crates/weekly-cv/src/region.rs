//! Candidate icon regions on the board
//!
//! Geometry is in screenshot pixel coordinates.

use opencv::core::Rect;
use serde::{Deserialize, Serialize};
use weekly_core::Tier;

/// Rectangular area of the board believed to hold one item icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub tier: Tier,
}

impl Region {
    /// Create a new region
    pub fn new(x: i32, y: i32, width: i32, height: i32, tier: Tier) -> Self {
        Self {
            x,
            y,
            width,
            height,
            tier,
        }
    }

    /// Create from OpenCV Rect
    pub fn from_rect(rect: Rect, tier: Tier) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height, tier)
    }

    /// Convert to OpenCV Rect
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_round_trip() {
        let rect = Rect::new(100, 5, 60, 60);
        let region = Region::from_rect(rect, Tier::new(0));
        assert_eq!(region.to_rect(), rect);
        assert_eq!(region.area(), 3600);
    }
}
