//! Game configuration: screen geometry, physics tuning and the difficulty table.
//!
//! Defaults reproduce the stock game. An optional `~/.flappy/config.json` may
//! override any subset of fields; whatever is loaded is validated before use so
//! pipe placement never samples from an empty range.

use super::constants::*;
use crate::rules::difficulty::DifficultyTier;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

/// Inclusive integer range used for uniform sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Uniform draw with both bounds included.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        rng.gen_range(self.min..=self.max)
    }

    pub fn contains(&self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Pipe layout ranges for a single difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierRanges {
    /// Distance between the upper pipe's bottom and the lower pipe's top.
    pub vertical_gap: IntRange,
    /// Distance from the rightmost existing pipe to the new pair.
    pub horizontal_spacing: IntRange,
}

/// Lookup table from tier to layout ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierTable {
    pub easy: TierRanges,
    pub normal: TierRanges,
    pub hard: TierRanges,
}

impl Default for TierTable {
    fn default() -> Self {
        Self {
            easy: TierRanges {
                vertical_gap: IntRange::new(300, 350),
                horizontal_spacing: IntRange::new(150, 200),
            },
            normal: TierRanges {
                vertical_gap: IntRange::new(280, 330),
                horizontal_spacing: IntRange::new(140, 190),
            },
            hard: TierRanges {
                vertical_gap: IntRange::new(250, 310),
                horizontal_spacing: IntRange::new(120, 150),
            },
        }
    }
}

impl TierTable {
    pub fn ranges(&self, tier: DifficultyTier) -> &TierRanges {
        match tier {
            DifficultyTier::Easy => &self.easy,
            DifficultyTier::Normal => &self.normal,
            DifficultyTier::Hard => &self.hard,
        }
    }
}

/// Full game configuration shared by the rules engine and the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f64,
    pub screen_height: f64,
    pub pipes_to_render: usize,
    pub flap_velocity: f64,
    pub gravity: f64,
    pub pipe_x_velocity: f64,
    pub pipe_width: f64,
    pub pipe_height: f64,
    pub bird_width: f64,
    pub bird_height: f64,
    pub play_field_margin: i32,
    pub rightmost_seed_x: f64,
    pub tiers: TierTable,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            pipes_to_render: PIPES_TO_RENDER,
            flap_velocity: FLAP_VELOCITY,
            gravity: GRAVITY,
            pipe_x_velocity: PIPE_X_VELOCITY,
            pipe_width: PIPE_WIDTH,
            pipe_height: PIPE_HEIGHT,
            bird_width: BIRD_WIDTH,
            bird_height: BIRD_HEIGHT,
            play_field_margin: PLAY_FIELD_MARGIN,
            rightmost_seed_x: RIGHTMOST_PIPE_SEED_X,
            tiers: TierTable::default(),
        }
    }
}

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Parse(serde_json::Error),
    InvertedRange {
        field: String,
        min: i32,
        max: i32,
    },
    GapTooLarge {
        tier: DifficultyTier,
        max_gap: i32,
        available: i32,
    },
    InvalidDimension {
        field: &'static str,
        value: f64,
    },
    InvalidSpacing {
        tier: DifficultyTier,
        min: i32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "could not read config: {}", e),
            Self::Parse(e) => write!(f, "could not parse config: {}", e),
            Self::InvertedRange { field, min, max } => {
                write!(f, "{}: min {} is greater than max {}", field, min, max)
            }
            Self::GapTooLarge {
                tier,
                max_gap,
                available,
            } => write!(
                f,
                "{} tier: vertical gap up to {} does not fit in {} units of play field",
                tier.name(),
                max_gap,
                available
            ),
            Self::InvalidDimension { field, value } => {
                write!(f, "{} must be positive, got {}", field, value)
            }
            Self::InvalidSpacing { tier, min } => write!(
                f,
                "{} tier: horizontal spacing must be positive, got min {}",
                tier.name(),
                min
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ConfigError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

/// Content width for a host viewport: narrow viewports get a 30-unit inset,
/// wide ones a fixed 350, and nothing goes below the floor.
pub fn content_width(viewport_width: f64) -> f64 {
    let width = if viewport_width <= NARROW_VIEWPORT_BREAKPOINT {
        viewport_width - NARROW_VIEWPORT_INSET
    } else {
        DEFAULT_SCREEN_WIDTH
    };
    width.max(MIN_SCREEN_WIDTH)
}

impl GameConfig {
    /// Copy of this config sized for the given host viewport width.
    pub fn with_viewport(&self, viewport_width: f64) -> Self {
        Self {
            screen_width: content_width(viewport_width),
            ..self.clone()
        }
    }

    /// Bird spawn point (top-left of its hitbox).
    pub fn bird_start(&self) -> (f64, f64) {
        (
            self.screen_width * BIRD_START_X_FRACTION,
            self.screen_height * BIRD_START_Y_FRACTION,
        )
    }

    /// Check every invariant pipe placement relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let dimensions = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("flap_velocity", self.flap_velocity),
            ("pipe_width", self.pipe_width),
            ("pipe_height", self.pipe_height),
            ("bird_width", self.bird_width),
            ("bird_height", self.bird_height),
        ];
        for (field, value) in dimensions {
            if !(value > 0.0) {
                return Err(ConfigError::InvalidDimension { field, value });
            }
        }
        if self.pipes_to_render == 0 {
            return Err(ConfigError::InvalidDimension {
                field: "pipes_to_render",
                value: 0.0,
            });
        }

        if self.play_field_margin < 0 {
            return Err(ConfigError::InvalidDimension {
                field: "play_field_margin",
                value: f64::from(self.play_field_margin),
            });
        }

        let available = self.screen_height as i32 - 2 * self.play_field_margin;
        for tier in DifficultyTier::ALL {
            let ranges = self.tiers.ranges(tier);
            let checks = [
                ("vertical_gap", ranges.vertical_gap),
                ("horizontal_spacing", ranges.horizontal_spacing),
            ];
            for (name, range) in checks {
                if range.min > range.max {
                    return Err(ConfigError::InvertedRange {
                        field: format!("tiers.{}.{}", tier.key(), name),
                        min: range.min,
                        max: range.max,
                    });
                }
            }
            if ranges.vertical_gap.min < 0 || ranges.vertical_gap.max > available {
                return Err(ConfigError::GapTooLarge {
                    tier,
                    max_gap: ranges.vertical_gap.max,
                    available,
                });
            }
            if ranges.horizontal_spacing.min <= 0 {
                return Err(ConfigError::InvalidSpacing {
                    tier,
                    min: ranges.horizontal_spacing.min,
                });
            }
        }
        Ok(())
    }
}

/// Load and validate a config file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<GameConfig, ConfigError> {
    let config = match fs::read_to_string(path) {
        Ok(json) => serde_json::from_str::<GameConfig>(&json)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => GameConfig::default(),
        Err(e) => return Err(e.into()),
    };
    config.validate()?;
    Ok(config)
}

/// Load `~/.flappy/config.json`.
pub fn load_config() -> Result<GameConfig, ConfigError> {
    let path = crate::utils::persistence::save_path(CONFIG_FILE)?;
    load_config_from(&path)
}
