pub mod item;
pub mod tier;

pub use item::{CatalogEntry, ItemName, NameError};
pub use tier::{Tier, TierBands};
