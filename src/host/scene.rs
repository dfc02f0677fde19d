//! The play scene: glues physics and timers to the rules engine and executes
//! the engine's host commands.

use super::physics::PhysicsWorld;
use super::timers::Timers;
use crate::rules::engine::{FrameInput, HostCommand, RulesEngine, TimerId};
use crate::rules::run::FlapOutcome;
use crate::utils::persistence::KeyValueStore;
use rand::Rng;
use std::time::Duration;
use tracing::debug;

pub struct PlayScene<S, R> {
    engine: RulesEngine<S>,
    world: PhysicsWorld,
    timers: Timers,
    rng: R,
    countdown: Option<u32>,
    pause_overlay: bool,
    bird_hit: bool,
    /// Sub-millisecond remainder carried between frames for the timers.
    carry_us: u64,
}

impl<S: KeyValueStore, R: Rng> PlayScene<S, R> {
    /// Build the scene and start the first run.
    pub fn new(mut engine: RulesEngine<S>, mut rng: R) -> Self {
        let pipes = engine.start_run(&mut rng);
        let world = PhysicsWorld::new(engine.config(), pipes);
        Self {
            engine,
            world,
            timers: Timers::new(),
            rng,
            countdown: None,
            pause_overlay: false,
            bird_hit: false,
            carry_us: 0,
        }
    }

    pub fn engine(&self) -> &RulesEngine<S> {
        &self.engine
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    /// Value shown as "Fly in N" while resuming.
    pub fn countdown(&self) -> Option<u32> {
        self.countdown
    }

    pub fn is_pause_overlay_shown(&self) -> bool {
        self.pause_overlay
    }

    pub fn is_bird_hit(&self) -> bool {
        self.bird_hit
    }

    /// Throw the current run away and start a new one.
    pub fn restart(&mut self) {
        let pipes = self.engine.start_run(&mut self.rng);
        self.world = PhysicsWorld::new(self.engine.config(), pipes);
        self.timers.clear();
        self.countdown = None;
        self.pause_overlay = false;
        self.bird_hit = false;
        self.carry_us = 0;
    }

    /// One host frame: timers, physics with collision, then the rules update.
    pub fn update(&mut self, dt: Duration) {
        let total_us = self.carry_us + dt.as_micros() as u64;
        self.carry_us = total_us % 1000;
        for id in self.timers.advance(total_us / 1000) {
            let commands = match id {
                TimerId::Countdown => self.engine.on_countdown_tick(),
                TimerId::Restart => self.engine.on_restart_timer(),
            };
            self.execute(commands);
        }

        if self.world.step(dt.as_secs_f64()) {
            let commands = self.engine.on_collision();
            self.execute(commands);
        }

        let bird = self.world.bird.bounds();
        let frame = FrameInput {
            bird_top: bird.top(),
            bird_bottom: bird.bottom(),
        };
        let report = self
            .engine
            .on_frame(frame, &mut self.world.pipes, &mut self.rng);
        self.execute(report.commands);
    }

    pub fn flap(&mut self) {
        match self.engine.on_flap() {
            FlapOutcome::SetVelocity(v) => self.world.bird.velocity_y = v,
            FlapOutcome::Ignored => {}
        }
    }

    pub fn pause(&mut self) {
        let commands = self.engine.on_pause();
        self.execute(commands);
    }

    pub fn resume(&mut self) {
        let commands = self.engine.on_resume();
        self.execute(commands);
    }

    fn execute(&mut self, commands: Vec<HostCommand>) {
        for command in commands {
            debug!(?command, "host command");
            match command {
                HostCommand::PausePhysics => self.world.pause(),
                HostCommand::ResumePhysics => self.world.resume(),
                HostCommand::LaunchPauseOverlay => self.pause_overlay = true,
                HostCommand::StopPauseOverlay => self.pause_overlay = false,
                HostCommand::ShowCountdown(n) => self.countdown = Some(n),
                HostCommand::ClearCountdown => self.countdown = None,
                HostCommand::StartTimer {
                    id,
                    delay_ms,
                    repeat,
                } => self.timers.start(id, delay_ms, repeat),
                HostCommand::StopTimer(id) => self.timers.stop(id),
                HostCommand::MarkBirdHit => self.bird_hit = true,
                HostCommand::RestartRun => {
                    self.restart();
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::utils::persistence::MemoryStore;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const FRAME: Duration = Duration::from_millis(16);

    fn create_scene() -> PlayScene<MemoryStore, ChaCha8Rng> {
        let engine = RulesEngine::new(GameConfig::default(), MemoryStore::new()).unwrap();
        PlayScene::new(engine, ChaCha8Rng::seed_from_u64(42))
    }

    #[test]
    fn test_flap_sets_velocity() {
        let mut scene = create_scene();
        scene.world_mut().bird.velocity_y = 120.0;
        scene.flap();
        assert_eq!(scene.world().bird.velocity_y, -250.0);
    }

    #[test]
    fn test_falling_bird_ends_run_and_restarts() {
        let mut scene = create_scene();
        // Let the bird drop to the floor; pipes are still far to the right
        let mut frames = 0;
        while !scene.engine().phase().is_game_over() && frames < 200 {
            scene.update(FRAME);
            frames += 1;
        }
        assert!(scene.engine().phase().is_game_over());
        assert!(scene.is_bird_hit());
        assert!(scene.world().is_paused());
        assert!(scene.timers().is_active(TimerId::Restart));

        for _ in 0..70 {
            scene.update(FRAME);
        }
        assert!(scene.engine().phase().is_running());
        assert!(!scene.is_bird_hit());
        assert!(!scene.world().is_paused());
    }

    #[test]
    fn test_pause_and_countdown() {
        let mut scene = create_scene();
        scene.pause();
        assert!(scene.is_pause_overlay_shown());
        assert!(scene.world().is_paused());

        let y = scene.world().bird.y;
        scene.update(FRAME);
        assert_eq!(scene.world().bird.y, y);

        scene.resume();
        assert!(!scene.is_pause_overlay_shown());
        assert_eq!(scene.countdown(), Some(3));

        scene.update(Duration::from_millis(1000));
        assert_eq!(scene.countdown(), Some(2));
        scene.update(Duration::from_millis(1000));
        assert_eq!(scene.countdown(), Some(1));
        assert!(scene.world().is_paused());
        scene.update(Duration::from_millis(999));
        assert_eq!(scene.countdown(), Some(1));
        scene.update(Duration::from_millis(1));
        assert_eq!(scene.countdown(), None);
        assert!(!scene.world().is_paused());
        assert!(!scene.timers().is_active(TimerId::Countdown));
    }

    #[test]
    fn test_pipe_collision_reported_by_physics() {
        let mut scene = create_scene();
        let bird = scene.world().bird.bounds();
        let pipe = &mut scene.world_mut().pipes[0];
        pipe.x = bird.x;
        pipe.y = bird.bottom();
        scene.update(FRAME);
        assert!(scene.engine().phase().is_game_over());
    }
}
