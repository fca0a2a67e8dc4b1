use super::Tier;
use serde::{Deserialize, Serialize};

/// Splits the board into `row_count` equal horizontal bands, one per tier,
/// counted from the top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBands {
    row_count: usize,
    row_height: f64,
}

impl TierBands {
    pub fn new(image_height: u32, row_count: usize) -> Self {
        let row_count = row_count.max(1);
        Self {
            row_count,
            row_height: image_height as f64 / row_count as f64,
        }
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// `floor(y / row_height)`. Not clamped: a result past the last band is
    /// returned as-is and [`TierBands::contains`] reports it.
    pub fn tier_at(&self, y: i32) -> Tier {
        if self.row_height <= 0.0 || y <= 0 {
            return Tier::new(0);
        }
        Tier::new((y as f64 / self.row_height).floor() as usize)
    }

    pub fn contains(&self, tier: Tier) -> bool {
        tier.index() < self.row_count
    }
}
