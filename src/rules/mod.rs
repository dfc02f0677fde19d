//! Gameplay rules: pipe layout, scoring, difficulty ramp, pause/countdown flow
//! and best-score persistence. No rendering, physics or timers live here.

pub mod best_score;
pub mod difficulty;
pub mod engine;
pub mod pipes;
pub mod run;

pub use best_score::BestScore;
pub use difficulty::{current_tier, DifficultyTier};
pub use engine::{
    FrameDecision, FrameInput, FrameReport, HostCommand, RecycleOutcome, RulesEngine, TimerId,
};
pub use pipes::{
    find_offscreen_pair, place_pipe_pair, rightmost_x, spawn_pipes, Pipe, PipeKind, PipePair,
};
pub use run::{is_game_over, on_flap, FlapOutcome, RunPhase, RunState};
