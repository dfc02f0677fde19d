//! Flappy - a side-scrolling arcade game.
//!
//! The library holds the engine-independent gameplay rules plus the bundled
//! terminal host that drives them; the binary adds rendering and input.

pub mod build_info;
pub mod core;
pub mod host;
pub mod rules;
pub mod utils;

pub use crate::core::config::GameConfig;
pub use crate::rules::engine::RulesEngine;
pub use crate::utils::persistence::{JsonFileStore, KeyValueStore, MemoryStore};
