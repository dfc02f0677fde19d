//! Best-score policy over the persistence port.
//!
//! Storage failures never end a run: unreadable values count as "no best
//! score" and failed writes are skipped, both with a warning.

use crate::core::constants::{BEST_SCORE_KEY, LAST_UPDATE_KEY, STORAGE_VERSION};
use crate::utils::persistence::KeyValueStore;
use std::io;
use tracing::{info, warn};

#[derive(Debug)]
pub struct BestScore<S> {
    store: S,
}

impl<S: KeyValueStore> BestScore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Drop the stored best score when the schema marker is absent or older
    /// than [`STORAGE_VERSION`], then stamp the current version. Returns true
    /// if a reset happened.
    pub fn migrate(&mut self) -> bool {
        let stored = match self.store.read_integer(LAST_UPDATE_KEY) {
            Ok(v) => v,
            Err(e) => {
                warn!("could not read {}: {}", LAST_UPDATE_KEY, e);
                None
            }
        };
        if stored.is_some_and(|v| v >= STORAGE_VERSION) {
            return false;
        }

        if let Err(e) = self.store.remove(BEST_SCORE_KEY) {
            warn!("could not clear {}: {}", BEST_SCORE_KEY, e);
        }
        if let Err(e) = self.store.write_integer(LAST_UPDATE_KEY, STORAGE_VERSION) {
            warn!("could not write {}: {}", LAST_UPDATE_KEY, e);
        }
        info!(
            from = ?stored,
            to = STORAGE_VERSION,
            "storage schema outdated, best score reset"
        );
        true
    }

    /// Stored best score, `None` when absent or unreadable.
    pub fn read(&self) -> Option<u32> {
        match self.store.read_integer(BEST_SCORE_KEY) {
            Ok(Some(v)) => match u32::try_from(v) {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("ignoring out-of-range {}: {}", BEST_SCORE_KEY, v);
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!("could not read {}: {}", BEST_SCORE_KEY, e);
                None
            }
        }
    }

    /// Best score for display; 0 when nothing is recorded.
    pub fn current(&self) -> u32 {
        self.read().unwrap_or(0)
    }

    /// Write `score` if it beats the stored value (or none is stored).
    /// Returns true when a new best was persisted.
    pub fn record(&mut self, score: u32) -> bool {
        if self.read().is_some_and(|best| score <= best) {
            return false;
        }
        match self.store.write_integer(BEST_SCORE_KEY, i64::from(score)) {
            Ok(()) => {
                info!(score, "new best score");
                true
            }
            Err(e) => {
                warn!("could not save best score {}: {}", score, e);
                false
            }
        }
    }

    /// Forget the stored best score.
    pub fn clear(&mut self) -> io::Result<()> {
        self.store.remove(BEST_SCORE_KEY)
    }
}
