//! Match finding - runs of equal items along one axis
//!
//! A run is the maximal contiguous sequence of cells holding the same item
//! (family + name) along one axis. Runs are returned ordered left to right
//! or top to bottom, origin included. Nothing here mutates the grid.

use crate::grid::Grid;
use crate::types::{Axis, ItemFamily, Position, MIN_RUN};

/// Both runs through one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runs {
    pub horizontal: Vec<Position>,
    pub vertical: Vec<Position>,
}

impl Runs {
    pub fn along(&self, axis: Axis) -> &[Position] {
        match axis {
            Axis::Horizontal => &self.horizontal,
            Axis::Vertical => &self.vertical,
        }
    }

    /// True when either run is long enough to pop
    pub fn pops(&self) -> bool {
        self.horizontal.len() >= MIN_RUN || self.vertical.len() >= MIN_RUN
    }
}

fn step_back(grid: &Grid, pos: Position, axis: Axis) -> Option<Position> {
    match axis {
        Axis::Horizontal => grid.left(pos),
        Axis::Vertical => grid.top(pos),
    }
}

fn step_forward(grid: &Grid, pos: Position, axis: Axis) -> Option<Position> {
    match axis {
        Axis::Horizontal => grid.right(pos),
        Axis::Vertical => grid.bottom(pos),
    }
}

/// Contiguous run of `origin`'s item along `axis`, including `origin`.
/// Empty if `origin` is out of bounds.
pub fn connected_run(grid: &Grid, origin: Position, axis: Axis) -> Vec<Position> {
    let Some(item) = grid.item_at(origin) else {
        return Vec::new();
    };
    let same = |pos: &Position| grid.item_at(*pos) == Some(item);

    let mut start = origin;
    while let Some(prev) = step_back(grid, start, axis).filter(same) {
        start = prev;
    }

    let mut run = vec![start];
    let mut cursor = start;
    while let Some(next) = step_forward(grid, cursor, axis).filter(same) {
        run.push(next);
        cursor = next;
    }
    run
}

/// Horizontal and vertical runs through `origin`
pub fn runs_at(grid: &Grid, origin: Position) -> Runs {
    Runs {
        horizontal: connected_run(grid, origin, Axis::Horizontal),
        vertical: connected_run(grid, origin, Axis::Vertical),
    }
}

/// Length of the run through `origin` along `axis`, without collecting it
pub fn run_len(grid: &Grid, origin: Position, axis: Axis) -> usize {
    let Some(item) = grid.item_at(origin) else {
        return 0;
    };
    let same = |pos: &Position| grid.item_at(*pos) == Some(item);

    let mut len = 1;
    let mut cursor = origin;
    while let Some(prev) = step_back(grid, cursor, axis).filter(same) {
        len += 1;
        cursor = prev;
    }
    cursor = origin;
    while let Some(next) = step_forward(grid, cursor, axis).filter(same) {
        len += 1;
        cursor = next;
    }
    len
}

/// True if any cell sits in a run of at least [`MIN_RUN`]
pub fn has_run(grid: &Grid) -> bool {
    grid.positions().any(|pos| {
        run_len(grid, pos, Axis::Horizontal) >= MIN_RUN
            || run_len(grid, pos, Axis::Vertical) >= MIN_RUN
    })
}

/// The predicate that decides whether a swap counts: a run of at least
/// [`MIN_RUN`] anywhere, or a universal item anywhere.
pub fn can_pop(grid: &Grid) -> bool {
    grid.contains_family(ItemFamily::Universal) || has_run(grid)
}
