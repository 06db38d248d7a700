//! Constructive placement search.
//!
//! The default engine is the randomized heuristic: shuffle the required
//! shape instances, anchor each one at a random already-occupied cell,
//! cycle through the four orientations, and walk outward along the
//! cardinal rays when the anchor is blocked. It is order-sensitive and
//! incomplete, so every attempt is seeded and the per-item restart loop
//! is capped; hitting the cap yields [`FillOutcome::Inconclusive`]
//! instead of looping forever.
//!
//! An exhaustive backtracking mode is available for verification when a
//! definitive answer matters more than speed.

use itertools::{iproduct, repeat_n};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::geometry::{translate, Coord, BOX_DIM, CARDINALS};
use crate::shape::{Catalog, PlacedShape, Shape, CATALOG_SIZE};
use crate::surface::Surface;

/// Outcome of one fill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillOutcome {
    /// Every required shape instance was placed without overlap.
    Filled,
    /// The required shapes provably cannot fit.
    Infeasible,
    /// The search gave up before finding a packing; one may still exist.
    Inconclusive,
}

impl FillOutcome {
    #[inline]
    pub fn is_filled(self) -> bool {
        matches!(self, FillOutcome::Filled)
    }
}

/// Default cap on anchor-search restarts per work-list item.
const DEFAULT_MAX_RESTARTS: usize = 256;

/// Tuning knobs for the placement search.
#[derive(Debug, Clone, Copy)]
pub struct SearchConfig {
    /// Seed for the work-order shuffle and anchor sampling.
    pub seed: u64,
    /// Anchor-search restarts allowed per item before giving up.
    pub max_restarts: usize,
    /// Replace the randomized heuristic with exhaustive backtracking.
    pub exhaustive: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_restarts: DEFAULT_MAX_RESTARTS,
            exhaustive: false,
        }
    }
}

/// The constructive search that places every required shape instance
/// onto a surface without collision.
pub struct PlacementEngine {
    config: SearchConfig,
    rng: StdRng,
}

impl PlacementEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Attempts to place every required shape instance onto the surface.
    ///
    /// Any placements left over from a previous attempt are discarded
    /// first. On [`FillOutcome::Filled`] the surface holds the complete
    /// packing; on any other outcome it holds whatever partial state the
    /// search reached.
    pub fn attempt_fill(&mut self, surface: &mut Surface, catalog: &Catalog) -> FillOutcome {
        surface.clear_placements();

        // necessary-but-not-sufficient area check
        let min_area = catalog.min_area(surface.requirements());
        if min_area > surface.cell_count() {
            debug!(
                "{}x{}: area {} exceeds {} cells, rejecting without search",
                surface.width(),
                surface.height(),
                min_area,
                surface.cell_count()
            );
            return FillOutcome::Infeasible;
        }

        if self.config.exhaustive {
            return fill_exhaustive(surface, catalog);
        }

        let mut work = expand_requirements(surface, catalog);
        work.shuffle(&mut self.rng);

        for shape in work {
            if !self.place_item(surface, shape) {
                debug!(
                    "{}x{}: gave up after {} placements",
                    surface.width(),
                    surface.height(),
                    surface.placed().len()
                );
                return FillOutcome::Inconclusive;
            }
        }

        debug_assert_eq!(surface.placed().len(), surface.required_total());
        FillOutcome::Filled
    }

    /// Places a single work-list item, or gives up after the configured
    /// number of anchor restarts.
    ///
    /// The orientation reached after a failed anchor carries over to the
    /// outward scan and the next anchor, so successive restarts probe
    /// different orientations.
    fn place_item(&mut self, surface: &mut Surface, mut shape: Shape) -> bool {
        let scan_limit = surface.width().max(surface.height());
        let mut anchor = match self.random_occupied(surface) {
            Some(cell) => cell,
            // empty surface: start from the first grid coordinate
            None => (0, 0),
        };

        for _ in 0..=self.config.max_restarts {
            loop {
                for turn in 0..4 {
                    if surface.admits(&shape, anchor) {
                        surface.place(PlacedShape::new(shape, anchor));
                        return true;
                    }
                    if turn < 3 {
                        shape = shape.rotate_clockwise();
                    }
                }
                match scan_outward(surface, &shape, anchor, scan_limit) {
                    // the scan only returns admissible origins, so the
                    // next pass over the orientations places immediately
                    Some(free) => anchor = free,
                    None => break,
                }
            }
            match self.random_occupied(surface) {
                Some(cell) => anchor = cell,
                None => return false,
            }
        }
        false
    }

    /// A uniformly random occupied cell, or `None` while the surface is
    /// still empty.
    fn random_occupied(&mut self, surface: &Surface) -> Option<Coord> {
        let occupied = surface.occupied();
        if occupied.is_empty() {
            return None;
        }
        let pick = self.rng.gen_range(0..occupied.len());
        occupied.iter().nth(pick).copied()
    }
}

/// Expands requirement counts into a flat work list, one shape instance
/// per required unit.
fn expand_requirements(surface: &Surface, catalog: &Catalog) -> Vec<Shape> {
    surface
        .requirements()
        .iter()
        .enumerate()
        .flat_map(|(kind, &count)| repeat_n(catalog.get(kind).clone(), count))
        .collect()
}

/// Walks outward from `anchor` along the four cardinal rays, nearest
/// step first, returning the first origin whose translated shape lands
/// entirely on free in-bounds cells.
fn scan_outward(surface: &Surface, shape: &Shape, anchor: Coord, limit: i32) -> Option<Coord> {
    for step in 1..=limit {
        for direction in CARDINALS {
            let origin = translate(anchor, (direction.0 * step, direction.1 * step));
            if surface.admits(shape, origin) {
                return Some(origin);
            }
        }
    }
    None
}

/// Deterministic backtracking over every orientation and origin.
///
/// Complete for the surface sizes this puzzle deals in, so a negative
/// answer is a definitive [`FillOutcome::Infeasible`].
fn fill_exhaustive(surface: &mut Surface, catalog: &Catalog) -> FillOutcome {
    let orientations: Vec<Vec<Shape>> = catalog
        .shapes()
        .iter()
        .map(Shape::unique_orientations)
        .collect();
    let origins = candidate_origins(surface);
    let mut remaining = *surface.requirements();

    if backtrack(surface, &origins, &orientations, &mut remaining, 0) {
        debug_assert_eq!(surface.placed().len(), surface.required_total());
        FillOutcome::Filled
    } else {
        FillOutcome::Infeasible
    }
}

/// Every origin whose 3x3 bounding box overlaps the grid, in row-major
/// order.
fn candidate_origins(surface: &Surface) -> Vec<Coord> {
    iproduct!(
        -(BOX_DIM - 1)..surface.height(),
        -(BOX_DIM - 1)..surface.width()
    )
    .map(|(y, x)| (x, y))
    .collect()
}

/// Places the next instance of the first kind still owed, trying every
/// orientation at every origin from `min_origin` on.
///
/// Identical instances of a kind are interchangeable, so they are placed
/// in non-decreasing origin order to avoid revisiting permutations.
fn backtrack(
    surface: &mut Surface,
    origins: &[Coord],
    orientations: &[Vec<Shape>],
    remaining: &mut [usize; CATALOG_SIZE],
    min_origin: usize,
) -> bool {
    let Some(kind) = remaining.iter().position(|&count| count > 0) else {
        return true;
    };
    remaining[kind] -= 1;

    for index in min_origin..origins.len() {
        let origin = origins[index];
        for oriented in &orientations[kind] {
            if !surface.admits(oriented, origin) {
                continue;
            }
            surface.place(PlacedShape::new(oriented.clone(), origin));
            let next_min = if remaining[kind] > 0 { index } else { 0 };
            if backtrack(surface, origins, orientations, remaining, next_min) {
                return true;
            }
            surface.unplace_last();
        }
    }

    remaining[kind] += 1;
    false
}
