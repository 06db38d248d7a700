//! Batch feasibility evaluation.

use log::debug;

use crate::shape::Catalog;
use crate::solver::{FillOutcome, PlacementEngine, SearchConfig};
use crate::surface::Surface;

/// Drives the placement engine over a batch of surfaces and tallies how
/// many could be filled.
pub struct FeasibilityOracle {
    engine: PlacementEngine,
}

impl FeasibilityOracle {
    pub fn new(config: SearchConfig) -> Self {
        Self {
            engine: PlacementEngine::new(config),
        }
    }

    /// Runs a single fill attempt per surface and returns the number
    /// that filled completely.
    ///
    /// Each surface keeps its final placement state, so callers can
    /// render the packings afterwards.
    pub fn evaluate_batch(&mut self, surfaces: &mut [Surface], catalog: &Catalog) -> usize {
        let mut feasible = 0;
        for (index, surface) in surfaces.iter_mut().enumerate() {
            let outcome = self.engine.attempt_fill(surface, catalog);
            debug!(
                "surface {index} ({}x{}): {outcome:?}",
                surface.width(),
                surface.height()
            );
            if outcome.is_filled() {
                feasible += 1;
            }
        }
        feasible
    }

    /// Evaluates one surface.
    pub fn evaluate(&mut self, surface: &mut Surface, catalog: &Catalog) -> FillOutcome {
        self.engine.attempt_fill(surface, catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle() -> FeasibilityOracle {
        FeasibilityOracle::new(SearchConfig {
            seed: 5,
            max_restarts: 10_000,
            exhaustive: false,
        })
    }

    #[test]
    fn tallies_only_filled_surfaces() {
        let catalog = Catalog::standard();
        let mut surfaces = vec![
            // fits: one area-7 shape on a 6x6 grid
            Surface::parse("6x6: 1 0 0 0 0 0").unwrap(),
            // area check alone rules this out
            Surface::parse("1x1: 0 0 0 0 0 1").unwrap(),
            // nothing required, trivially filled
            Surface::parse("2x2: 0 0 0 0 0 0").unwrap(),
        ];

        let feasible = oracle().evaluate_batch(&mut surfaces, &catalog);
        assert_eq!(feasible, 2);
    }

    #[test]
    fn count_matches_the_placement_artifacts() {
        let catalog = Catalog::standard();
        let mut surfaces = vec![
            Surface::parse("6x6: 1 0 0 0 0 0").unwrap(),
            Surface::parse("1x1: 0 0 0 0 0 1").unwrap(),
            Surface::parse("9x6: 1 1 0 0 0 0").unwrap(),
        ];

        let feasible = oracle().evaluate_batch(&mut surfaces, &catalog);
        let filled = surfaces.iter().filter(|s| s.is_filled()).count();
        assert_eq!(feasible, filled);
        assert!(feasible <= surfaces.len());
    }

    #[test]
    fn empty_batch_counts_zero() {
        let catalog = Catalog::standard();
        assert_eq!(oracle().evaluate_batch(&mut [], &catalog), 0);
    }
}
