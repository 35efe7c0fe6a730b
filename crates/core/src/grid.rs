//! Grid module - owns the cells of the board
//!
//! The grid is a `width x height` rectangle stored as a flat row-major array
//! (`y * width + x`). Dimensions are fixed at construction. Neighbors are
//! derived from coordinates on every query, never stored.
//! Coordinates: `x` ranges `0..width` (left to right), `y` ranges `0..height` (top to bottom)

use std::fmt;
use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::catalog::{Item, ItemCatalog};
use crate::error::{EngineError, Result};
use crate::types::{ItemFamily, ItemKind, Position};

/// One board cell. Its position never changes; only `item` does.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub item: Item,
}

impl Cell {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell holding `item`
    pub fn new(width: usize, height: usize, item: Item) -> Result<Self> {
        Self::from_fn(width, height, |_| Arc::clone(&item))
    }

    /// Create a grid by asking `item_at` for every position, row by row
    pub fn from_fn(
        width: usize,
        height: usize,
        mut item_at: impl FnMut(Position) -> Item,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "grid dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell {
                    x,
                    y,
                    item: item_at(Position::new(x, y)),
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from a text layout, one string per row.
    ///
    /// Tokens are whitespace separated: an ordinary item's initial (`B`),
    /// the initial plus `|` for its line-of-4 special, plus `-` for its
    /// cross special, and `*` or `**` for the universal item. Initials are
    /// matched case-insensitively against the catalog's ordinary names.
    pub fn from_layout(catalog: &ItemCatalog, rows: &[&str]) -> Result<Self> {
        let tokens: Vec<Vec<&str>> = rows
            .iter()
            .map(|row| row.split_whitespace().collect())
            .collect();
        let height = tokens.len();
        let width = tokens.first().map_or(0, Vec::len);
        if let Some(bad) = tokens.iter().position(|row| row.len() != width) {
            return Err(EngineError::InvalidConfig(format!(
                "layout row {} has {} cells, expected {}",
                bad,
                tokens[bad].len(),
                width
            )));
        }

        let mut items = Vec::with_capacity(width * height);
        for token in tokens.iter().flatten() {
            items.push(Self::parse_token(catalog, token)?);
        }
        let mut items = items.into_iter();
        Self::from_fn(width, height, |_| {
            items.next().unwrap_or_else(|| catalog.universal())
        })
    }

    fn parse_token(catalog: &ItemCatalog, token: &str) -> Result<Item> {
        if token.chars().all(|c| c == '*') {
            return Ok(catalog.universal());
        }
        let unknown = || EngineError::InvalidConfig(format!("unknown layout token `{token}`"));

        let mut chars = token.chars();
        let initial = chars.next().ok_or_else(unknown)?.to_ascii_lowercase();
        let mut candidates = catalog.ordinary().iter().filter(|item| {
            item.name
                .chars()
                .next()
                .is_some_and(|c| c.to_ascii_lowercase() == initial)
        });
        let base = candidates.next().cloned().ok_or_else(unknown)?;
        if let Some(other) = candidates.next() {
            return Err(EngineError::InvalidConfig(format!(
                "ambiguous layout token `{token}`: matches both `{}` and `{}`",
                base.name, other.name
            )));
        }

        match chars.as_str() {
            "" => Ok(base),
            "|" => catalog.four_piece_for(&base),
            "-" => catalog.double_three_for(&base),
            _ => Err(unknown()),
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.index(pos.x, pos.y).is_some()
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index(x, y).map(|idx| &self.cells[idx])
    }

    pub fn item_at(&self, pos: Position) -> Option<&Item> {
        self.get(pos.x, pos.y).map(|cell| &cell.item)
    }

    /// Replace the item at `pos`
    /// Returns false if out of bounds
    pub fn set(&mut self, pos: Position, item: Item) -> bool {
        match self.index(pos.x, pos.y) {
            Some(idx) => {
                self.cells[idx].item = item;
                true
            }
            None => false,
        }
    }

    /// Exchange the items of two cells. Coordinates are untouched, so calling
    /// it twice with the same arguments restores the grid.
    /// Returns false (and does nothing) if either position is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        match (self.index(a.x, a.y), self.index(b.x, b.y)) {
            (Some(ia), Some(ib)) => {
                if ia != ib {
                    let item_a = Arc::clone(&self.cells[ia].item);
                    self.cells[ia].item = Arc::clone(&self.cells[ib].item);
                    self.cells[ib].item = item_a;
                }
                true
            }
            _ => false,
        }
    }

    pub fn left(&self, pos: Position) -> Option<Position> {
        (pos.x > 0 && self.contains(pos)).then(|| Position::new(pos.x - 1, pos.y))
    }

    pub fn right(&self, pos: Position) -> Option<Position> {
        (pos.x + 1 < self.width && self.contains(pos)).then(|| Position::new(pos.x + 1, pos.y))
    }

    pub fn top(&self, pos: Position) -> Option<Position> {
        (pos.y > 0 && self.contains(pos)).then(|| Position::new(pos.x, pos.y - 1))
    }

    pub fn bottom(&self, pos: Position) -> Option<Position> {
        (pos.y + 1 < self.height && self.contains(pos)).then(|| Position::new(pos.x, pos.y + 1))
    }

    /// Left, right, top, bottom neighbors that exist
    pub fn neighbors(&self, pos: Position) -> ArrayVec<Position, 4> {
        [self.left(pos), self.right(pos), self.top(pos), self.bottom(pos)]
            .into_iter()
            .flatten()
            .collect()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn for_each_cell(&self, f: impl FnMut(&Cell)) {
        self.cells.iter().for_each(f);
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(Cell::position)
    }

    /// Every position of row `y`, left to right
    pub fn row(&self, y: usize) -> Vec<Position> {
        if y >= self.height {
            return Vec::new();
        }
        (0..self.width).map(|x| Position::new(x, y)).collect()
    }

    /// Every position of column `x`, top to bottom
    pub fn column(&self, x: usize) -> Vec<Position> {
        if x >= self.width {
            return Vec::new();
        }
        (0..self.height).map(|y| Position::new(x, y)).collect()
    }

    /// Every position holding an item equal to `item`
    pub fn positions_of(&self, item: &Item) -> Vec<Position> {
        self.cells
            .iter()
            .filter(|cell| cell.item == *item)
            .map(Cell::position)
            .collect()
    }

    pub fn contains_family(&self, family: ItemFamily) -> bool {
        self.cells.iter().any(|cell| cell.item.family == family)
    }

    /// Item names in row-major order (for comparisons and snapshots)
    pub fn item_names(&self) -> Vec<&str> {
        self.cells.iter().map(|cell| cell.item.name.as_str()).collect()
    }
}

/// One token per cell, space separated: the item's initial, then a family
/// marker (`|` column clear, `-` row clear); `**` is the universal item.
/// The output parses back with [`Grid::from_layout`].
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for x in 0..self.width {
                let token = layout_token(&self.cells[y * self.width + x].item);
                if x + 1 == self.width {
                    write!(f, "{}", token.trim_end())?;
                } else {
                    write!(f, "{:<2} ", token)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn layout_token(item: &ItemKind) -> String {
    let initial = item
        .color_name()
        .and_then(|color| color.chars().next())
        .map(|c| c.to_ascii_uppercase())
        .unwrap_or('?');
    match item.family {
        ItemFamily::Ordinary => initial.to_string(),
        ItemFamily::FourPiece => format!("{initial}|"),
        ItemFamily::DoubleThree => format!("{initial}-"),
        ItemFamily::Universal => "**".to_string(),
    }
}
