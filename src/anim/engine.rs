use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::model::AnimConfig;

use super::grid::Grid;
use super::segment::{Segment, Shape};
use super::walker::{self, Walker};

/// Hard cap on retained segments; the oldest batch drops once exceeded,
/// fade state notwithstanding.
pub const SEGMENT_CAP: usize = 8000;
pub const DROP_BATCH: usize = 1000;

/// Fresh walkers get a turn budget drawn uniformly from this range.
const TURN_BUDGET: std::ops::Range<u32> = 2..5;

/// Tuning for one animation surface.
#[derive(Debug, Clone)]
pub struct FieldConfig {
    /// Grid cell size in surface sub-pixels.
    pub cell_size: u32,
    pub max_walkers: usize,
    /// Segment lifespan range in seconds.
    pub life_min: f64,
    pub life_max: f64,
    pub base_alpha: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            cell_size: 6,
            max_walkers: 10,
            life_min: 6.0,
            life_max: 10.0,
            base_alpha: 0.7,
        }
    }
}

impl From<&AnimConfig> for FieldConfig {
    fn from(anim: &AnimConfig) -> Self {
        FieldConfig {
            cell_size: anim.cell_size.max(1),
            max_walkers: anim.max_walkers,
            life_min: anim.life_min,
            life_max: anim.life_max.max(anim.life_min),
            base_alpha: anim.base_alpha,
        }
    }
}

/// Generative line-art field: random walkers grow non-crossing paths on
/// an occupancy grid, leaving behind segments that fade out on their own
/// clocks.
///
/// The engine is scheduler-agnostic; anything that calls [`tick`] with a
/// monotonic seconds value drives it, which keeps the whole algorithm
/// deterministic under a seeded RNG and a scripted clock.
///
/// [`tick`]: LineField::tick
pub struct LineField {
    config: FieldConfig,
    grid: Grid,
    walkers: Vec<Walker>,
    segments: Vec<Segment>,
    /// Rebuild once open cells drop to this count.
    stop_threshold: usize,
    rng: SmallRng,
}

impl LineField {
    /// A field with no surface yet; call [`resize`](LineField::resize)
    /// once the host dimensions are known.
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// As [`new`](LineField::new), with an injected random source for
    /// deterministic runs.
    pub fn with_rng(config: FieldConfig, rng: SmallRng) -> Self {
        LineField {
            config,
            grid: Grid::empty(),
            walkers: Vec::new(),
            segments: Vec::new(),
            stop_threshold: 0,
            rng,
        }
    }

    /// Rebuild the grid for a new surface size (in sub-pixels). This is
    /// the one event that clears segments along with the grid.
    pub fn resize(&mut self, width: u32, height: u32) {
        let fw = (width / self.config.cell_size) as usize;
        let fh = (height / self.config.cell_size) as usize;
        self.grid = Grid::new(fw, fh);
        self.walkers.clear();
        self.segments.clear();
        self.stop_threshold = self.draw_stop_threshold();
    }

    /// Restart the field: fresh grid, fresh walkers, new threshold.
    /// In-flight segments keep fading, so the surface never blanks.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.walkers.clear();
        self.stop_threshold = self.draw_stop_threshold();
    }

    /// Advance one frame at `now` seconds.
    pub fn tick(&mut self, now: f64) {
        if self.grid.is_empty() {
            return;
        }

        if self.grid.open_count() <= self.stop_threshold {
            self.grid.clear();
            self.walkers.clear();
            self.stop_threshold = self.draw_stop_threshold();
        }

        self.spawn_walkers();
        self.step_walkers(now);
        self.walkers.retain(|w| !w.is_stuck());
        self.segments.retain(|s| !s.expired(now));
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn walker_count(&self) -> usize {
        self.walkers.len()
    }

    pub fn grid_size(&self) -> (usize, usize) {
        (self.grid.width(), self.grid.height())
    }

    /// True when the surface is too small to animate.
    pub fn is_inert(&self) -> bool {
        self.grid.is_empty()
    }

    fn spawn_walkers(&mut self) {
        if self.walkers.len() >= self.config.max_walkers {
            return;
        }
        let open = self.grid.open_cells();
        if open.is_empty() {
            return;
        }
        while self.walkers.len() < self.config.max_walkers {
            let cell = open[self.rng.random_range(0..open.len())];
            let turns = self.rng.random_range(TURN_BUDGET);
            self.walkers.push(Walker::spawn(cell, turns));
        }
    }

    fn step_walkers(&mut self, now: f64) {
        let s = self.config.cell_size as f64;
        let center = |c: i32| c as f64 * s + s / 2.0;

        for i in 0..self.walkers.len() {
            let at = self.walkers[i].pos;
            let moved = walker::advance(&mut self.walkers[i], &mut self.grid, &mut self.rng);

            if let Some((nx, ny)) = moved {
                let seg = Segment {
                    shape: Shape::Line {
                        from: (center(at.0), center(at.1)),
                        to: (center(nx), center(ny)),
                    },
                    born: now,
                    life: self.draw_life(),
                    base_alpha: self.config.base_alpha,
                };
                self.push_segment(seg);
            }

            // fresh spawns and dead ends get a dot where they stood
            if self.walkers[i].tail_length <= 1 || self.walkers[i].is_stuck() {
                let seg = Segment {
                    shape: Shape::Dot {
                        center: (center(at.0), center(at.1)),
                        radius: s / 4.0,
                    },
                    born: now,
                    life: self.draw_life(),
                    base_alpha: self.config.base_alpha,
                };
                self.push_segment(seg);
            }
        }
    }

    fn push_segment(&mut self, segment: Segment) {
        if self.segments.len() > SEGMENT_CAP {
            self.segments.drain(0..DROP_BATCH);
        }
        self.segments.push(segment);
    }

    fn draw_life(&mut self) -> f64 {
        if self.config.life_max > self.config.life_min {
            self.rng.random_range(self.config.life_min..self.config.life_max)
        } else {
            self.config.life_min
        }
    }

    fn draw_stop_threshold(&mut self) -> usize {
        let size = self.grid.len();
        let lo = size / 3;
        let hi = size / 2;
        if lo >= hi {
            lo
        } else {
            self.rng.random_range(lo..hi)
        }
    }
}
