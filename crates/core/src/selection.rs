//! Selection - the player's pending picks (at most two)

use arrayvec::ArrayVec;

use crate::error::{EngineError, Result};
use crate::types::Position;

/// Outcome of pushing a pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// First pick stored, waiting for a neighbor
    First(Position),
    /// Same cell picked again; nothing changed
    Repeated(Position),
    /// Second pick adjacent to the first; the selection is now empty
    Pair(Position, Position),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    picks: ArrayVec<Position, 2>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first(&self) -> Option<Position> {
        self.picks.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn as_slice(&self) -> &[Position] {
        &self.picks
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }

    /// Add a pick. A non-adjacent second pick clears the selection and
    /// fails with `InvalidSelection`.
    pub fn push(&mut self, pos: Position) -> Result<Pick> {
        let Some(first) = self.first() else {
            self.picks.push(pos);
            return Ok(Pick::First(pos));
        };

        if first == pos {
            return Ok(Pick::Repeated(pos));
        }

        self.picks.clear();
        if first.is_adjacent(pos) {
            Ok(Pick::Pair(first, pos))
        } else {
            Err(EngineError::InvalidSelection { first, second: pos })
        }
    }
}
