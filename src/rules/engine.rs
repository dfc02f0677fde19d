//! The rules engine: the callback surface a host engine drives.
//!
//! The host owns rendering, physics, input and timers. It reports what happened
//! (a frame elapsed, the bird hit a pipe, the player flapped or paused, a timer
//! fired) and executes the [`HostCommand`]s handed back. The engine never
//! reaches into the host.

use super::best_score::BestScore;
use super::difficulty::{current_tier, DifficultyTier};
use super::pipes::{find_offscreen_pair, pair_mut, place_pipe_pair, rightmost_x, spawn_pipes};
use super::pipes::{Pipe, PipePair};
use super::run::{self, FlapOutcome, RunPhase, RunState};
use crate::core::config::{ConfigError, GameConfig};
use crate::core::constants::{COUNTDOWN_INTERVAL_MS, COUNTDOWN_TICKS, RESTART_DELAY_MS};
use crate::utils::persistence::KeyValueStore;
use rand::Rng;
use tracing::{debug, info};

/// Host-owned timers the engine may start or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerId {
    /// Repeating, drives [`RulesEngine::on_countdown_tick`].
    Countdown,
    /// One-shot, drives [`RulesEngine::on_restart_timer`].
    Restart,
}

/// Work the host must carry out on the engine's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCommand {
    PausePhysics,
    ResumePhysics,
    LaunchPauseOverlay,
    StopPauseOverlay,
    /// Show "Fly in N".
    ShowCountdown(u32),
    ClearCountdown,
    StartTimer {
        id: TimerId,
        delay_ms: u64,
        repeat: bool,
    },
    StopTimer(TimerId),
    /// Tint the bird to show the crash.
    MarkBirdHit,
    /// Tear the run down and call [`RulesEngine::start_run`] again.
    RestartRun,
}

/// Bird bounds for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub bird_top: f64,
    pub bird_bottom: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameDecision {
    Continue,
    GameOver,
}

/// Result of a recycle scan.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RecycleOutcome {
    pub recycled: bool,
    pub new_pair: Option<PipePair>,
}

/// Everything decided during one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub decision: FrameDecision,
    pub recycle: RecycleOutcome,
    pub score: u32,
    pub commands: Vec<HostCommand>,
}

#[derive(Debug)]
pub struct RulesEngine<S> {
    config: GameConfig,
    run: RunState,
    phase: RunPhase,
    best: BestScore<S>,
    best_at_start: u32,
}

impl<S: KeyValueStore> RulesEngine<S> {
    /// Validate the config and apply the one-time storage reset before any
    /// best score is read.
    pub fn new(config: GameConfig, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut best = BestScore::new(store);
        best.migrate();
        let best_at_start = best.current();
        Ok(Self {
            config,
            run: RunState::default(),
            phase: RunPhase::Running,
            best,
            best_at_start,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.run.score
    }

    pub fn tier(&self) -> DifficultyTier {
        self.run.tier
    }

    /// Best score as read when the current run started.
    pub fn best_score_at_start(&self) -> u32 {
        self.best_at_start
    }

    pub fn best(&self) -> &BestScore<S> {
        &self.best
    }

    /// Begin a fresh run and lay out its pipes.
    pub fn start_run<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Pipe> {
        self.run = RunState::default();
        self.phase = RunPhase::Running;
        self.best_at_start = self.best.current();
        info!(best = self.best_at_start, "run started");
        spawn_pipes(self.run.tier, &self.config, rng)
    }

    /// Per-frame update: bounds check first, then pipe recycling.
    pub fn on_frame<R: Rng + ?Sized>(
        &mut self,
        frame: FrameInput,
        pipes: &mut [Pipe],
        rng: &mut R,
    ) -> FrameReport {
        let mut report = FrameReport {
            decision: FrameDecision::Continue,
            recycle: RecycleOutcome::default(),
            score: self.run.score,
            commands: Vec::new(),
        };
        if !self.phase.is_running() {
            if self.phase.is_game_over() {
                report.decision = FrameDecision::GameOver;
            }
            return report;
        }

        if run::is_game_over(frame.bird_top, frame.bird_bottom, self.config.screen_height) {
            report.decision = FrameDecision::GameOver;
            report.commands = self.game_over();
            return report;
        }

        report.recycle = self.recycle_if_offscreen(pipes, rng);
        report.score = self.run.score;
        report
    }

    /// Reposition the first off-screen upper/lower pair, then score it.
    ///
    /// Placement uses the tier active before the increment; the tier is
    /// recomputed afterwards and applies from the next placement on.
    pub fn recycle_if_offscreen<R: Rng + ?Sized>(
        &mut self,
        pipes: &mut [Pipe],
        rng: &mut R,
    ) -> RecycleOutcome {
        let Some((upper, lower)) = find_offscreen_pair(pipes) else {
            return RecycleOutcome::default();
        };

        let pair = place_pipe_pair(
            rightmost_x(pipes, self.config.rightmost_seed_x),
            self.run.tier,
            &self.config,
            rng,
        );
        let (upper, lower) = pair_mut(pipes, upper, lower);
        pair.apply(upper, lower);

        self.run.score = self.run.score.saturating_add(1);
        self.best.record(self.run.score);

        let tier = current_tier(self.run.score);
        if tier != self.run.tier {
            info!(score = self.run.score, tier = tier.name(), "difficulty increased");
            self.run.tier = tier;
        }
        debug!(score = self.run.score, x = pair.upper_x, "pipe pair recycled");

        RecycleOutcome {
            recycled: true,
            new_pair: Some(pair),
        }
    }

    /// The physics host saw the bird overlap a pipe.
    pub fn on_collision(&mut self) -> Vec<HostCommand> {
        self.game_over()
    }

    pub fn on_flap(&self) -> FlapOutcome {
        if self.phase.is_game_over() {
            return FlapOutcome::Ignored;
        }
        run::on_flap(self.run.is_paused, self.config.flap_velocity)
    }

    /// Pause button pressed.
    pub fn on_pause(&mut self) -> Vec<HostCommand> {
        if !self.phase.is_running() {
            return Vec::new();
        }
        self.run.is_paused = true;
        self.phase = RunPhase::Paused { countdown: None };
        info!(score = self.run.score, "paused");
        vec![HostCommand::PausePhysics, HostCommand::LaunchPauseOverlay]
    }

    /// Pause overlay dismissed: start the countdown. Physics stay paused.
    pub fn on_resume(&mut self) -> Vec<HostCommand> {
        if self.phase != (RunPhase::Paused { countdown: None }) {
            return Vec::new();
        }
        self.phase = RunPhase::Paused {
            countdown: Some(COUNTDOWN_TICKS),
        };
        vec![
            HostCommand::StopPauseOverlay,
            HostCommand::ShowCountdown(COUNTDOWN_TICKS),
            HostCommand::StartTimer {
                id: TimerId::Countdown,
                delay_ms: COUNTDOWN_INTERVAL_MS,
                repeat: true,
            },
        ]
    }

    /// One countdown timer tick.
    pub fn on_countdown_tick(&mut self) -> Vec<HostCommand> {
        let RunPhase::Paused {
            countdown: Some(remaining),
        } = self.phase
        else {
            return vec![HostCommand::StopTimer(TimerId::Countdown)];
        };

        let remaining = remaining.saturating_sub(1);
        if remaining > 0 {
            self.phase = RunPhase::Paused {
                countdown: Some(remaining),
            };
            return vec![HostCommand::ShowCountdown(remaining)];
        }

        self.run.is_paused = false;
        self.phase = RunPhase::Running;
        info!("resumed");
        vec![
            HostCommand::ClearCountdown,
            HostCommand::ResumePhysics,
            HostCommand::StopTimer(TimerId::Countdown),
        ]
    }

    /// Restart delay elapsed after a game over.
    pub fn on_restart_timer(&mut self) -> Vec<HostCommand> {
        if self.phase.is_game_over() {
            vec![HostCommand::RestartRun]
        } else {
            Vec::new()
        }
    }

    fn game_over(&mut self) -> Vec<HostCommand> {
        if !self.phase.is_running() {
            return Vec::new();
        }
        self.phase = RunPhase::GameOver;
        self.best.record(self.run.score);
        info!(score = self.run.score, "game over");
        vec![
            HostCommand::PausePhysics,
            HostCommand::MarkBirdHit,
            HostCommand::StartTimer {
                id: TimerId::Restart,
                delay_ms: RESTART_DELAY_MS,
                repeat: false,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::{BEST_SCORE_KEY, LAST_UPDATE_KEY, STORAGE_VERSION};
    use crate::rules::pipes::PipeKind;
    use crate::utils::persistence::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SAFE_FRAME: FrameInput = FrameInput {
        bird_top: 300.0,
        bird_bottom: 340.0,
    };

    fn create_engine() -> RulesEngine<MemoryStore> {
        RulesEngine::new(GameConfig::default(), MemoryStore::new()).unwrap()
    }

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn push_offscreen(pipes: &mut [Pipe]) {
        pipes[0].x = -30.0;
        pipes[1].x = -30.0;
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.tiers.easy.vertical_gap = crate::core::config::IntRange::new(10, 5);
        assert!(RulesEngine::new(config, MemoryStore::new()).is_err());
    }

    #[test]
    fn test_start_run_spawns_pairs() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let pipes = engine.start_run(&mut rng);
        assert_eq!(pipes.len(), 8);
        assert_eq!(pipes[0].kind, PipeKind::Upper);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.tier(), DifficultyTier::Easy);
        assert!(engine.phase().is_running());
    }

    #[test]
    fn test_frame_without_offscreen_pipes_continues() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let mut pipes = engine.start_run(&mut rng);
        let before = pipes.clone();

        let report = engine.on_frame(SAFE_FRAME, &mut pipes, &mut rng);
        assert_eq!(report.decision, FrameDecision::Continue);
        assert!(!report.recycle.recycled);
        assert!(report.commands.is_empty());
        assert_eq!(pipes, before);
    }

    #[test]
    fn test_recycle_moves_pair_and_scores() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let mut pipes = engine.start_run(&mut rng);
        push_offscreen(&mut pipes);
        let rightmost = rightmost_x(&pipes, 500.0);

        let report = engine.on_frame(SAFE_FRAME, &mut pipes, &mut rng);
        assert!(report.recycle.recycled);
        assert_eq!(report.score, 1);
        let pair = report.recycle.new_pair.unwrap();
        assert_eq!(pipes[0].x, pair.upper_x);
        assert_eq!(pipes[1].y, pair.lower_y);
        assert!(pair.upper_x - rightmost >= 150.0 && pair.upper_x - rightmost <= 200.0);
        assert_eq!(engine.best().current(), 1);
    }

    #[test]
    fn test_single_offscreen_pipe_does_not_recycle() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let mut pipes = engine.start_run(&mut rng);
        pipes[0].x = -30.0;

        let outcome = engine.recycle_if_offscreen(&mut pipes, &mut rng);
        assert!(!outcome.recycled);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_tier_changes_after_recycle_crossing_threshold() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let mut pipes = engine.start_run(&mut rng);
        engine.run.score = 20;

        push_offscreen(&mut pipes);
        let report = engine.on_frame(SAFE_FRAME, &mut pipes, &mut rng);
        // This placement still used the Easy table
        let pair = report.recycle.new_pair.unwrap();
        assert!(pair.vertical_gap() >= 300.0);
        assert_eq!(engine.score(), 21);
        assert_eq!(engine.tier(), DifficultyTier::Normal);
    }

    #[test]
    fn test_bounds_breach_is_game_over() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let mut pipes = engine.start_run(&mut rng);

        let frame = FrameInput {
            bird_top: -1.0,
            bird_bottom: 39.0,
        };
        let report = engine.on_frame(frame, &mut pipes, &mut rng);
        assert_eq!(report.decision, FrameDecision::GameOver);
        assert!(report.commands.contains(&HostCommand::PausePhysics));
        assert!(report.commands.contains(&HostCommand::StartTimer {
            id: TimerId::Restart,
            delay_ms: RESTART_DELAY_MS,
            repeat: false,
        }));
        assert!(engine.phase().is_game_over());
    }

    #[test]
    fn test_game_over_fires_once() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        engine.start_run(&mut rng);

        assert_eq!(engine.on_collision().len(), 3);
        assert!(engine.on_collision().is_empty());
    }

    #[test]
    fn test_game_over_does_not_recycle() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let mut pipes = engine.start_run(&mut rng);
        engine.on_collision();

        push_offscreen(&mut pipes);
        let report = engine.on_frame(SAFE_FRAME, &mut pipes, &mut rng);
        assert_eq!(report.decision, FrameDecision::GameOver);
        assert!(!report.recycle.recycled);
        assert_eq!(engine.score(), 0);
    }

    #[test]
    fn test_game_over_records_best_score() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        engine.start_run(&mut rng);
        engine.on_collision();
        assert_eq!(engine.best().read(), Some(0));
    }

    #[test]
    fn test_restart_flow() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let mut pipes = engine.start_run(&mut rng);
        push_offscreen(&mut pipes);
        engine.on_frame(SAFE_FRAME, &mut pipes, &mut rng);
        assert!(engine.on_restart_timer().is_empty());

        engine.on_collision();
        assert_eq!(engine.on_restart_timer(), vec![HostCommand::RestartRun]);

        engine.start_run(&mut rng);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.best_score_at_start(), 1);
        assert!(engine.phase().is_running());
    }

    #[test]
    fn test_pause_countdown_resume() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        engine.start_run(&mut rng);

        let commands = engine.on_pause();
        assert_eq!(
            commands,
            vec![HostCommand::PausePhysics, HostCommand::LaunchPauseOverlay]
        );
        assert!(engine.run().is_paused);
        assert_eq!(engine.on_flap(), FlapOutcome::Ignored);

        let commands = engine.on_resume();
        assert_eq!(commands[1], HostCommand::ShowCountdown(3));
        assert!(engine.run().is_paused);

        assert_eq!(engine.on_countdown_tick(), vec![HostCommand::ShowCountdown(2)]);
        assert_eq!(engine.on_countdown_tick(), vec![HostCommand::ShowCountdown(1)]);
        assert_eq!(engine.on_flap(), FlapOutcome::Ignored);

        let commands = engine.on_countdown_tick();
        assert!(commands.contains(&HostCommand::ResumePhysics));
        assert!(commands.contains(&HostCommand::StopTimer(TimerId::Countdown)));
        assert!(!engine.run().is_paused);
        assert!(engine.phase().is_running());
        assert_eq!(engine.on_flap(), FlapOutcome::SetVelocity(-250.0));
    }

    #[test]
    fn test_resume_without_pause_is_noop() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        engine.start_run(&mut rng);
        assert!(engine.on_resume().is_empty());
        assert_eq!(
            engine.on_countdown_tick(),
            vec![HostCommand::StopTimer(TimerId::Countdown)]
        );
    }

    #[test]
    fn test_paused_frames_do_nothing() {
        let mut engine = create_engine();
        let mut rng = create_test_rng();
        let mut pipes = engine.start_run(&mut rng);
        engine.on_pause();
        push_offscreen(&mut pipes);

        let frame = FrameInput {
            bird_top: -5.0,
            bird_bottom: 35.0,
        };
        let report = engine.on_frame(frame, &mut pipes, &mut rng);
        assert_eq!(report.decision, FrameDecision::Continue);
        assert!(!report.recycle.recycled);
    }

    #[test]
    fn test_outdated_storage_reset_before_first_read() {
        let mut store = MemoryStore::new();
        store.write_integer(BEST_SCORE_KEY, 50).unwrap();
        store.write_integer(LAST_UPDATE_KEY, STORAGE_VERSION - 1).unwrap();

        let engine = RulesEngine::new(GameConfig::default(), store).unwrap();
        assert_eq!(engine.best_score_at_start(), 0);
        assert_eq!(engine.best().read(), None);
    }
}
