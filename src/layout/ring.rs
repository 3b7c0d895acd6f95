//! Ring layout: subjects on an outer circle, attributes in an inner disc.

use std::collections::VecDeque;
use std::f64::consts::{PI, TAU};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::Position;
use super::{AttributePlacement, LayoutConfig, LayoutStrategy, SubjectSlots, NODE_HEIGHT};

/// Golden angle in radians, π(3 − √5).
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

/// Grid values per axis: -1.0, -0.8, ..., 1.0.
pub const GRID_STEPS: usize = 11;

const MAX_JITTER_FRACTION: f64 = 0.01;

/// Concentric ring layout.
///
/// Counters only ever grow, so the same sequence of creations always yields
/// the same positions for a given seed.
pub struct RingLayout {
    config: LayoutConfig,
    rng: ChaCha8Rng,
    x_pool: VecDeque<f64>,
    y_pool: VecDeque<f64>,
    subjects_placed: usize,
    attributes_placed: usize,
    pool_exhausted: bool,
}

impl RingLayout {
    pub fn new(config: LayoutConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut xs = grid_values();
        let mut ys = grid_values();
        xs.shuffle(&mut rng);
        ys.shuffle(&mut rng);

        Self {
            config,
            rng,
            x_pool: xs.into(),
            y_pool: ys.into(),
            subjects_placed: 0,
            attributes_placed: 0,
            pool_exhausted: false,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Grid entries not yet handed out.
    pub fn remaining_grid_slots(&self) -> usize {
        self.x_pool.len().min(self.y_pool.len())
    }

    fn subject_angle(&self, k: usize) -> f64 {
        match self.config.subject_slots {
            SubjectSlots::Fixed(n) => TAU * k as f64 / n.max(1) as f64 + PI,
            SubjectSlots::GoldenAngle => PI + k as f64 * GOLDEN_ANGLE,
        }
    }

    /// Unit-disc offset for the k-th attribute.
    fn attribute_offset(&mut self, k: usize) -> (f64, f64) {
        match self.config.attribute_placement {
            AttributePlacement::ShuffledGrid => {
                match (self.x_pool.pop_front(), self.y_pool.pop_front()) {
                    (Some(dx), Some(dy)) => (dx, dy),
                    _ => {
                        if !self.pool_exhausted {
                            self.pool_exhausted = true;
                            tracing::warn!(
                                placed = k,
                                "attribute grid exhausted; further attributes share offset (0, 0)"
                            );
                        }
                        (0.0, 0.0)
                    }
                }
            }
            AttributePlacement::Spiral => {
                // First GRID_STEPS attributes fill the unit disc, later ones
                // grow outward until they reach the inside of the subject ring.
                let r = ((k as f64 + 0.5) / GRID_STEPS as f64).sqrt().min(self.spiral_limit());
                let theta = k as f64 * GOLDEN_ANGLE;
                (r * theta.cos(), r * theta.sin())
            }
        }
    }

    /// Largest spiral offset, in units of the attribute radius, that keeps
    /// attributes one node height inside the subject ring.
    fn spiral_limit(&self) -> f64 {
        let radius = self.config.attribute_radius.abs();
        if radius <= 0.0 {
            return 0.0;
        }
        ((self.config.subject_radius - NODE_HEIGHT) / radius).max(0.0)
    }

    fn jitter(&mut self) -> (f64, f64) {
        let amplitude = self.config.attribute_radius.abs()
            * self.config.jitter_fraction.clamp(0.0, MAX_JITTER_FRACTION);
        if amplitude <= 0.0 {
            return (0.0, 0.0);
        }
        (
            self.rng.gen_range(-amplitude..=amplitude),
            self.rng.gen_range(-amplitude..=amplitude),
        )
    }
}

impl Default for RingLayout {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl LayoutStrategy for RingLayout {
    fn place_subject(&mut self, label: &str) -> Position {
        let k = self.subjects_placed;
        self.subjects_placed += 1;

        let angle = self.subject_angle(k);
        let r = self.config.subject_radius;
        let pos = Position::new(
            self.config.origin.x + r * angle.cos(),
            self.config.origin.y + r * angle.sin(),
        );
        tracing::trace!(label, slot = k, x = pos.x, y = pos.y, "placed subject");
        pos
    }

    fn place_attribute(&mut self, label: &str) -> Position {
        let k = self.attributes_placed;
        self.attributes_placed += 1;

        let (dx, dy) = self.attribute_offset(k);
        let (jx, jy) = self.jitter();
        let r = self.config.attribute_radius;
        let pos = Position::new(
            self.config.origin.x + dx * r + jx,
            self.config.origin.y + dy * r + jy,
        );
        tracing::trace!(label, slot = k, x = pos.x, y = pos.y, "placed attribute");
        pos
    }
}

fn grid_values() -> Vec<f64> {
    let half = (GRID_STEPS / 2) as f64;
    (0..GRID_STEPS).map(|i| (i as f64 - half) / half).collect()
}

// ============================================================================
// Tests
// ============================================================================
