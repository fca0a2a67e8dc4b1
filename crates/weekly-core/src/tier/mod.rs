pub mod bands;

pub use bands::TierBands;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based item tier. Files and the game count tiers from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(usize);

impl Tier {
    pub fn new(index: usize) -> Self {
        Tier(index)
    }

    /// `None` for tier 0, which has no zero-based counterpart.
    pub fn from_number(number: u32) -> Option<Self> {
        number.checked_sub(1).map(|index| Tier(index as usize))
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn number(self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
