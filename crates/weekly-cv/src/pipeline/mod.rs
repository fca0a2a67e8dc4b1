//! End-to-end identification of a board screenshot

pub mod config;
pub mod orchestrator;

pub use config::{OutputConfig, PipelineConfig};
pub use orchestrator::{MatchResult, Pipeline};
