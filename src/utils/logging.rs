//! Tracing setup. Logs go to `~/.flappy/flappy.log` because the terminal is
//! owned by the game screen.

use super::persistence::save_path;
use crate::core::constants::{LOG_ENV_VAR, LOG_FILE};
use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Filter from `FLAPPY_LOG`, falling back to `info`.
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to the log file.
pub fn initialize_logging() -> io::Result<()> {
    let path = save_path(LOG_FILE)?;
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(())
}
