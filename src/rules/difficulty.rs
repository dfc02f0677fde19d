//! Difficulty tiers and the score-driven ramp between them.

use crate::core::constants::{HARD_TIER_THRESHOLD, NORMAL_TIER_THRESHOLD};

/// Difficulty tier. Selects the pipe layout ranges from the tier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DifficultyTier {
    #[default]
    Easy,
    Normal,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] = [Self::Easy, Self::Normal, Self::Hard];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }

    /// Lowercase key used in config files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
        }
    }
}

/// Step function on the current score: above 40 is Hard, above 20 Normal.
pub fn current_tier(score: u32) -> DifficultyTier {
    if score > HARD_TIER_THRESHOLD {
        DifficultyTier::Hard
    } else if score > NORMAL_TIER_THRESHOLD {
        DifficultyTier::Normal
    } else {
        DifficultyTier::Easy
    }
}
