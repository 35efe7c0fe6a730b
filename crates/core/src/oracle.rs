//! Move oracle - does the board still have a legal swap?
//!
//! Every cell is trial-swapped with its right and bottom neighbor (which
//! covers every adjacent pair exactly once), tested with [`can_pop`], and
//! swapped back. The board is left exactly as it was found.

use crate::grid::Grid;
use crate::matcher::can_pop;
use crate::types::Position;

/// Stateless move oracle
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOracle;

impl MoveOracle {
    /// True if some adjacent swap would pop
    pub fn exists_legal_move(grid: &mut Grid) -> bool {
        Self::find_legal_move(grid).is_some()
    }

    /// First adjacent pair, in row-major order of the first cell, whose swap
    /// would pop
    pub fn find_legal_move(grid: &mut Grid) -> Option<(Position, Position)> {
        let positions: Vec<Position> = grid.positions().collect();
        for pos in positions {
            let candidates = [grid.right(pos), grid.bottom(pos)];
            for other in candidates.into_iter().flatten() {
                grid.swap(pos, other);
                let pops = can_pop(grid);
                grid.swap(pos, other);
                if pops {
                    return Some((pos, other));
                }
            }
        }
        None
    }
}
