//! Pipe pairs: placement policy and off-screen recycling detection.
//!
//! Pipes are kept in group order (upper, lower, upper, lower, ...) and are
//! repositioned in place when they scroll past the left edge. A run never
//! allocates new pipes after `spawn_pipes`.

use super::difficulty::DifficultyTier;
use crate::core::config::GameConfig;
use rand::Rng;

/// Which half of a pair a pipe sprite belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipeKind {
    Upper,
    Lower,
}

/// A single pipe sprite.
///
/// `y` is the edge facing the gap: the bottom edge of an upper pipe, the top
/// edge of a lower pipe.
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub kind: PipeKind,
    /// Left edge.
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

impl Pipe {
    pub fn new(kind: PipeKind, width: f64) -> Self {
        Self {
            kind,
            x: 0.0,
            y: 0.0,
            width,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Eligible for recycling once the right edge reaches the left screen edge.
    pub fn is_offscreen(&self) -> bool {
        self.right() <= 0.0
    }
}

/// Coordinates for one upper/lower pair. Both members share the same x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipePair {
    pub upper_x: f64,
    pub upper_y: f64,
    pub lower_x: f64,
    pub lower_y: f64,
}

impl PipePair {
    pub fn vertical_gap(&self) -> f64 {
        self.lower_y - self.upper_y
    }

    /// Move two pipe sprites to this pair's coordinates.
    pub fn apply(&self, upper: &mut Pipe, lower: &mut Pipe) {
        upper.x = self.upper_x;
        upper.y = self.upper_y;
        lower.x = self.lower_x;
        lower.y = self.lower_y;
    }
}

/// Rightmost pipe x, floored at the configured seed so the first pairs start
/// off the right edge.
pub fn rightmost_x(pipes: &[Pipe], seed_x: f64) -> f64 {
    pipes.iter().fold(seed_x, |acc, pipe| acc.max(pipe.x))
}

/// Draw a new pair: gap size, then the gap's top edge inside the margined
/// field, then the horizontal spacing from `rightmost_x`.
pub fn place_pipe_pair<R: Rng + ?Sized>(
    rightmost_x: f64,
    tier: DifficultyTier,
    config: &GameConfig,
    rng: &mut R,
) -> PipePair {
    let ranges = config.tiers.ranges(tier);
    let margin = config.play_field_margin;

    let gap = ranges.vertical_gap.sample(rng);
    let lowest_top = (config.screen_height as i32 - margin - gap).max(margin);
    let gap_top = rng.gen_range(margin..=lowest_top);
    let spacing = ranges.horizontal_spacing.sample(rng);

    let x = rightmost_x + spacing as f64;
    PipePair {
        upper_x: x,
        upper_y: gap_top as f64,
        lower_x: x,
        lower_y: (gap_top + gap) as f64,
    }
}

/// Create `config.pipes_to_render` pairs in group order, each placed to the
/// right of those before it.
pub fn spawn_pipes<R: Rng + ?Sized>(
    tier: DifficultyTier,
    config: &GameConfig,
    rng: &mut R,
) -> Vec<Pipe> {
    let mut pipes = Vec::with_capacity(config.pipes_to_render * 2);
    for _ in 0..config.pipes_to_render {
        pipes.push(Pipe::new(PipeKind::Upper, config.pipe_width));
        pipes.push(Pipe::new(PipeKind::Lower, config.pipe_width));
    }

    for i in 0..config.pipes_to_render {
        let pair = place_pipe_pair(
            rightmost_x(&pipes, config.rightmost_seed_x),
            tier,
            config,
            rng,
        );
        let (head, tail) = pipes.split_at_mut(2 * i + 1);
        pair.apply(&mut head[2 * i], &mut tail[0]);
    }
    pipes
}

/// Scan in group order and return `(upper, lower)` indices once one upper and
/// one lower pipe have both been found off-screen. A lone off-screen pipe never
/// qualifies.
pub fn find_offscreen_pair(pipes: &[Pipe]) -> Option<(usize, usize)> {
    let mut upper = None;
    let mut lower = None;
    for (i, pipe) in pipes.iter().enumerate() {
        if !pipe.is_offscreen() {
            continue;
        }
        match pipe.kind {
            PipeKind::Upper if upper.is_none() => upper = Some(i),
            PipeKind::Lower if lower.is_none() => lower = Some(i),
            _ => {}
        }
        if let (Some(u), Some(l)) = (upper, lower) {
            return Some((u, l));
        }
    }
    None
}

/// Mutable access to two distinct pipes.
pub(crate) fn pair_mut(pipes: &mut [Pipe], a: usize, b: usize) -> (&mut Pipe, &mut Pipe) {
    debug_assert!(a != b);
    if a < b {
        let (head, tail) = pipes.split_at_mut(b);
        (&mut head[a], &mut tail[0])
    } else {
        let (head, tail) = pipes.split_at_mut(a);
        (&mut tail[0], &mut head[b])
    }
}
