//! Utility modules: persistence port and stores, logging setup.

pub mod logging;
pub mod persistence;
