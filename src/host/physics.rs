//! Arcade physics for the bundled terminal host: gravity on the bird, constant
//! leftward scroll for pipes, world-bounds clamping and AABB overlap.

use crate::core::config::GameConfig;
use crate::rules::pipes::{Pipe, PipeKind};

/// Axis-aligned rectangle, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Aabb {
    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Strict overlap; touching edges do not count.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

/// Bird body. `y` is the top of the hitbox.
#[derive(Debug, Clone, PartialEq)]
pub struct BirdBody {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Units per second, positive is downward.
    pub velocity_y: f64,
}

impl BirdBody {
    pub fn new(config: &GameConfig) -> Self {
        let (x, y) = config.bird_start();
        Self {
            x,
            y,
            width: config.bird_width,
            height: config.bird_height,
            velocity_y: 0.0,
        }
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// Hitbox of a pipe sprite. Upper pipes extend up from `y`, lower pipes down.
pub fn pipe_bounds(pipe: &Pipe, pipe_height: f64) -> Aabb {
    let top = match pipe.kind {
        PipeKind::Upper => pipe.y - pipe_height,
        PipeKind::Lower => pipe.y,
    };
    Aabb {
        x: pipe.x,
        y: top,
        width: pipe.width,
        height: pipe_height,
    }
}

/// Bodies simulated by the host for one run.
#[derive(Debug, Clone)]
pub struct PhysicsWorld {
    pub bird: BirdBody,
    pub pipes: Vec<Pipe>,
    paused: bool,
    gravity: f64,
    pipe_x_velocity: f64,
    pipe_height: f64,
    screen_height: f64,
}

impl PhysicsWorld {
    pub fn new(config: &GameConfig, pipes: Vec<Pipe>) -> Self {
        Self {
            bird: BirdBody::new(config),
            pipes,
            paused: false,
            gravity: config.gravity,
            pipe_x_velocity: config.pipe_x_velocity,
            pipe_height: config.pipe_height,
            screen_height: config.screen_height,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pipe_height(&self) -> f64 {
        self.pipe_height
    }

    /// Advance by `dt` seconds. Returns true if the bird overlaps a pipe
    /// afterwards. Does nothing while paused.
    pub fn step(&mut self, dt: f64) -> bool {
        if self.paused {
            return false;
        }

        let bird = &mut self.bird;
        bird.velocity_y += self.gravity * dt;
        bird.y += bird.velocity_y * dt;

        // Clamp to world bounds; resting on an edge is what the bounds check sees
        if bird.y < 0.0 {
            bird.y = 0.0;
            bird.velocity_y = 0.0;
        }
        let floor = self.screen_height - bird.height;
        if bird.y > floor {
            bird.y = floor;
            bird.velocity_y = 0.0;
        }

        for pipe in &mut self.pipes {
            pipe.x -= self.pipe_x_velocity * dt;
        }

        self.bird_hits_pipe()
    }

    pub fn bird_hits_pipe(&self) -> bool {
        let bird = self.bird.bounds();
        self.pipes
            .iter()
            .any(|pipe| pipe_bounds(pipe, self.pipe_height).overlaps(&bird))
    }
}
