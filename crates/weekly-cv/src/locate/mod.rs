//! Segmentation of a board screenshot into icon regions

pub mod config;
pub mod locator;

pub use config::{HsvRange, LocatorConfig};
pub use locator::RegionLocator;
