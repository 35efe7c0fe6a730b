//! Board generator - random fills that leave a stable, playable board
//!
//! A board is accepted when it has no run of three (nothing pops on its own)
//! and at least one legal swap. Fills are retried until both hold, up to a
//! fixed number of attempts.

use tracing::{debug, warn};

use crate::catalog::ItemCatalog;
use crate::error::{EngineError, Result};
use crate::grid::Grid;
use crate::matcher::has_run;
use crate::oracle::MoveOracle;
use crate::rng::SimpleRng;
use crate::types::DEFAULT_MAX_GENERATION_ATTEMPTS;

#[derive(Debug, Clone, Copy)]
pub struct BoardGenerator<'a> {
    catalog: &'a ItemCatalog,
    max_attempts: u32,
}

impl<'a> BoardGenerator<'a> {
    pub fn new(catalog: &'a ItemCatalog) -> Self {
        Self {
            catalog,
            max_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Overwrite every cell with a random ordinary item. With
    /// `preserve_specials`, cells holding a special item keep it.
    pub fn fill(&self, grid: &mut Grid, rng: &mut SimpleRng, preserve_specials: bool) {
        let positions: Vec<_> = grid.positions().collect();
        for pos in positions {
            let keep = preserve_specials && grid.item_at(pos).is_some_and(|item| item.is_special());
            if !keep {
                grid.set(pos, self.catalog.random_ordinary(rng));
            }
        }
    }

    /// Refill until the board has no run and at least one legal move.
    ///
    /// Returns the number of fills it took. Fails with `UnsolvableCatalog`
    /// when the catalog has fewer than two ordinary items or the attempt
    /// limit runs out.
    pub fn generate_solvable(
        &self,
        grid: &mut Grid,
        rng: &mut SimpleRng,
        preserve_specials: bool,
    ) -> Result<u32> {
        if self.catalog.ordinary_count() < 2 {
            warn!(
                ordinary = self.catalog.ordinary_count(),
                "catalog cannot produce a stable board"
            );
            return Err(EngineError::UnsolvableCatalog { attempts: 0 });
        }

        for attempt in 1..=self.max_attempts {
            self.fill(grid, rng, preserve_specials);
            if !has_run(grid) && MoveOracle::exists_legal_move(grid) {
                debug!(attempt, preserve_specials, "generated solvable board");
                return Ok(attempt);
            }
        }

        warn!(attempts = self.max_attempts, "gave up generating a solvable board");
        Err(EngineError::UnsolvableCatalog {
            attempts: self.max_attempts,
        })
    }
}
