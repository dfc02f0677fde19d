//! Per-run state and the run-level state machine.

use super::difficulty::DifficultyTier;

/// Mutable state of one run. Discarded on restart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    /// Pipe pairs passed. Never decreases within a run.
    pub score: u32,
    pub tier: DifficultyTier,
    /// True from the pause press until the resume countdown reaches zero.
    pub is_paused: bool,
}

/// Run-level phase.
///
/// ```text
/// Running --pause--> Paused { countdown: None }
/// Paused --resume--> Paused { countdown: Some(3) } --ticks--> Running
/// Running --bounds/collision--> GameOver --restart timer--> Running
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunPhase {
    #[default]
    Running,
    Paused {
        /// Ticks left before physics resume; `None` while the overlay is up.
        countdown: Option<u32>,
    },
    GameOver,
}

impl RunPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// Result of a flap request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlapOutcome {
    /// Replace the bird's vertical velocity with this value (negative is up).
    SetVelocity(f64),
    Ignored,
}

/// True when the bird touches or crosses the top or bottom screen edge.
pub fn is_game_over(bird_top: f64, bird_bottom: f64, screen_height: f64) -> bool {
    bird_top <= 0.0 || bird_bottom >= screen_height
}

/// Flap policy: paused runs ignore input, otherwise the velocity is overridden.
pub fn on_flap(is_paused: bool, flap_velocity: f64) -> FlapOutcome {
    if is_paused {
        FlapOutcome::Ignored
    } else {
        FlapOutcome::SetVelocity(-flap_velocity)
    }
}
