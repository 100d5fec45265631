//! Self-avoiding branching walkers
//!
//! Walkers fill a region with a maze-like line texture. Each step picks one
//! of a fixed set of headings and a length that is a multiple of a base unit,
//! and is only accepted when the new segment neither crosses nor retraces
//! anything drawn so far. An accepted step may branch: the walker moves one
//! generation deeper and a child starts at its position in that generation.
//! Deeper walkers live shorter, so prolific walkers burn out quickly.
//!
//! The population is processed in rounds: every live walker advances one
//! step per round, and survivors plus newborn children form the next round.
//! All walkers share one append-only segment soup used for collision checks.

use log::debug;
use rand::Rng;
use std::f64::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CellsError, Result};
use crate::geometry::{crosses_any, Point, Polygon, Segment};

/// Tuning knobs for walker texture generation
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkerOptions {
    /// Walkers seeded at the start point
    pub initial_walkers: usize,
    /// Step budget of a root walker; a walker at depth `d` gets `max_life / (d + 1)`
    pub max_life: usize,
    /// Longest step length
    pub step_length: f64,
    /// Step lengths are `k * step_length / step_divisions` for `k` in `1..=step_divisions`
    pub step_divisions: u32,
    /// Number of evenly spaced headings to choose from
    pub angle_count: u32,
    /// Candidate steps tried before a walker gives up
    pub retries: usize,
    /// Chance that an accepted step spawns a child
    pub branch_probability: f64,
    /// Walkers at this generation stop branching
    pub max_depth: usize,
    /// Rounds of stepping before generation stops, one step per walker per round
    ///
    /// The default matches `max_life`, so an unbranched root walker can use
    /// its whole lifetime.
    pub rounds: usize,
}

impl Default for WalkerOptions {
    fn default() -> Self {
        Self {
            initial_walkers: 5,
            max_life: 30,
            step_length: 10.0,
            step_divisions: 3,
            angle_count: 4,
            retries: 5,
            branch_probability: 0.9,
            max_depth: 10,
            rounds: 30,
        }
    }
}

impl WalkerOptions {
    /// Check every option for a usable range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !(self.step_length > 0.0 && self.step_length.is_finite()) {
            return Err(CellsError::InvalidConfig(format!(
                "walker step length must be positive (got {})",
                self.step_length
            )));
        }
        if self.step_divisions == 0 {
            return Err(CellsError::InvalidConfig(
                "walker step divisions must be at least 1".to_string(),
            ));
        }
        if self.angle_count == 0 {
            return Err(CellsError::InvalidConfig(
                "walker angle count must be at least 1".to_string(),
            ));
        }
        if self.retries == 0 {
            return Err(CellsError::InvalidConfig(
                "walker retries must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.branch_probability) {
            return Err(CellsError::InvalidConfig(format!(
                "branch probability must be within [0, 1] (got {})",
                self.branch_probability
            )));
        }
        Ok(())
    }
}

/// A single walker
#[derive(Debug, Clone)]
pub struct Walker {
    position: Point,
    depth: usize,
    steps: usize,
    path: Vec<Segment>,
    alive: bool,
}

impl Walker {
    /// Create a live walker at `position` in generation `depth`
    pub fn new(position: Point, depth: usize) -> Self {
        Self {
            position,
            depth,
            steps: 0,
            path: Vec::new(),
            alive: true,
        }
    }

    /// Current position
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Branch generation, 0 for seeded walkers
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Accepted steps so far
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Segments this walker has drawn
    #[inline]
    pub fn path(&self) -> &[Segment] {
        &self.path
    }

    /// Whether the walker can still move
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Step budget at this walker's depth
    pub fn lifetime(&self, options: &WalkerOptions) -> f64 {
        options.max_life as f64 / (self.depth + 1) as f64
    }

    /// Try to take one step, committing it to `soup`
    ///
    /// Returns a newly spawned child, if any. Branching moves this walker one
    /// generation deeper as well, shrinking its lifetime. The walker dies when
    /// no candidate within the retry budget avoids the soup, or when its step
    /// count reaches its lifetime.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        soup: &mut Vec<Segment>,
        options: &WalkerOptions,
        rng: &mut R,
    ) -> Option<Walker> {
        if !self.alive {
            return None;
        }

        let heading_unit = TAU / options.angle_count as f64;
        let length_unit = options.step_length / options.step_divisions as f64;

        let accepted = (0..options.retries).find_map(|_| {
            let heading = rng.gen_range(0..options.angle_count) as f64 * heading_unit;
            let length = rng.gen_range(1..=options.step_divisions) as f64 * length_unit;
            let end = Point::new(
                self.position.x + length * heading.cos(),
                self.position.y + length * heading.sin(),
            );
            let candidate = Segment::new(self.position, end);
            (!crosses_any(soup, &candidate)).then_some(candidate)
        });

        let Some(segment) = accepted else {
            self.alive = false;
            return None;
        };

        soup.push(segment);
        self.path.push(segment);
        self.position = segment.end;
        self.steps += 1;

        if self.steps as f64 >= self.lifetime(options) {
            self.alive = false;
            return None;
        }

        if self.depth < options.max_depth && rng.gen_bool(options.branch_probability) {
            self.depth += 1;
            Some(Walker::new(self.position, self.depth))
        } else {
            None
        }
    }
}

/// Fill a region with walker texture
///
/// The soup starts as the region's boundary edges, so walkers seeded inside
/// stay inside. Returns the boundary segments followed by every walker
/// segment, in acceptance order.
pub fn fill_region<R: Rng + ?Sized>(
    boundary: &Polygon,
    seed: Point,
    options: &WalkerOptions,
    rng: &mut R,
) -> Vec<Segment> {
    let mut soup = boundary.segments();
    let boundary_len = soup.len();

    let mut queue: Vec<Walker> = (0..options.initial_walkers)
        .map(|_| Walker::new(seed, 0))
        .collect();

    for round in 0..options.rounds {
        if queue.is_empty() {
            break;
        }

        let mut next = Vec::with_capacity(queue.len());
        for mut walker in std::mem::take(&mut queue) {
            let child = walker.step(&mut soup, options, rng);
            if walker.is_alive() {
                next.push(walker);
            }
            next.extend(child);
        }
        queue = next;

        debug!(
            "[Walkers] Round {}: {} walkers alive, {} segments drawn",
            round + 1,
            queue.len(),
            soup.len() - boundary_len
        );
    }

    soup
}
