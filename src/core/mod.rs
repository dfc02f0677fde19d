//! Core configuration and tuning constants.

pub mod config;
pub mod constants;

pub use config::{content_width, load_config, GameConfig, IntRange, TierRanges, TierTable};
