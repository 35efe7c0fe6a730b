//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no engine behavior attached, so they can be
//! shared by the resolver, the session layer, snapshots and any renderer.
//!
//! # Item Families
//!
//! | Family | Clear effect when chain-triggered | Spawned by |
//! |--------|-----------------------------------|------------|
//! | `Ordinary` | none | the random refill |
//! | `FourPiece` | its whole column | a line of exactly 4 |
//! | `DoubleThree` | its whole row | a cross / T / L shape |
//! | `Universal` | every cell holding the same item | a line of 5 or more |
//!
//! Special items of a color carry a derived name: `"<color>_FourPiece"` and
//! `"<color>_DoubleThree"`. The universal item has no color.
//!
//! # Defaults
//!
//! | Constant | Value |
//! |----------|-------|
//! | `DEFAULT_WIDTH` x `DEFAULT_HEIGHT` | 8 x 8 |
//! | `DEFAULT_MOVE_BUDGET` | 20 |
//! | `DEFAULT_GOAL_SCORE` | 1000 |
//! | `MIN_RUN` | 3 |
//!
//! # Examples
//!
//! ```
//! use match3_types::{ItemFamily, ItemKind, Position};
//!
//! let frog = ItemKind::ordinary("frog", 10);
//! assert_eq!(frog.color_name(), Some("frog"));
//! assert_eq!(frog.four_piece_name().as_deref(), Some("frog_FourPiece"));
//!
//! let special = ItemKind::new(ItemFamily::DoubleThree, "frog_DoubleThree", 20);
//! assert_eq!(special.color_name(), Some("frog"));
//!
//! // Equality is by family + name, never by score value.
//! assert_eq!(frog, ItemKind::ordinary("frog", 99));
//!
//! assert!(Position::new(2, 3).is_adjacent(Position::new(2, 4)));
//! assert!(!Position::new(2, 3).is_adjacent(Position::new(3, 4)));
//! ```

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Default board width in cells
pub const DEFAULT_WIDTH: usize = 8;

/// Default board height in cells
pub const DEFAULT_HEIGHT: usize = 8;

/// Default number of moves per stage
pub const DEFAULT_MOVE_BUDGET: u32 = 20;

/// Default score needed to win a stage
pub const DEFAULT_GOAL_SCORE: u32 = 1000;

/// Shortest run that pops
pub const MIN_RUN: usize = 3;

/// Fills attempted before the generator gives up on a catalog
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 10_000;

/// Clusters resolved by one sweep before it stops
pub const DEFAULT_MAX_CASCADE_CLUSTERS: u32 = 1_000;

/// Suffix of the line-of-4 special item name
pub const FOUR_PIECE_SUFFIX: &str = "_FourPiece";

/// Suffix of the cross-shape special item name
pub const DOUBLE_THREE_SUFFIX: &str = "_DoubleThree";

/// Closed set of item families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemFamily {
    Ordinary,
    FourPiece,
    DoubleThree,
    Universal,
}

impl ItemFamily {
    /// Parse family from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "ordinary" => Some(ItemFamily::Ordinary),
            "fourpiece" => Some(ItemFamily::FourPiece),
            "doublethree" => Some(ItemFamily::DoubleThree),
            "universal" => Some(ItemFamily::Universal),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemFamily::Ordinary => "Ordinary",
            ItemFamily::FourPiece => "FourPiece",
            ItemFamily::DoubleThree => "DoubleThree",
            ItemFamily::Universal => "Universal",
        }
    }

    pub fn is_special(&self) -> bool {
        !matches!(self, ItemFamily::Ordinary)
    }
}

/// Item definition held by a cell.
///
/// Two items are the same item when family and name match; `score_value`
/// is ignored by equality and hashing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemKind {
    pub family: ItemFamily,
    pub name: String,
    pub score_value: u32,
}

impl ItemKind {
    pub fn new(family: ItemFamily, name: impl Into<String>, score_value: u32) -> Self {
        Self {
            family,
            name: name.into(),
            score_value,
        }
    }

    pub fn ordinary(name: impl Into<String>, score_value: u32) -> Self {
        Self::new(ItemFamily::Ordinary, name, score_value)
    }

    pub fn is_special(&self) -> bool {
        self.family.is_special()
    }

    /// Color this item belongs to.
    ///
    /// Ordinary items are their own color; colored specials strip their
    /// suffix. The universal item has none.
    pub fn color_name(&self) -> Option<&str> {
        match self.family {
            ItemFamily::Ordinary => Some(&self.name),
            ItemFamily::FourPiece => Some(
                self.name
                    .strip_suffix(FOUR_PIECE_SUFFIX)
                    .unwrap_or(&self.name),
            ),
            ItemFamily::DoubleThree => Some(
                self.name
                    .strip_suffix(DOUBLE_THREE_SUFFIX)
                    .unwrap_or(&self.name),
            ),
            ItemFamily::Universal => None,
        }
    }

    /// Derived name of the line-of-4 special for this item's color
    pub fn four_piece_name(&self) -> Option<String> {
        self.color_name()
            .map(|color| format!("{color}{FOUR_PIECE_SUFFIX}"))
    }

    /// Derived name of the cross-shape special for this item's color
    pub fn double_three_name(&self) -> Option<String> {
        self.color_name()
            .map(|color| format!("{color}{DOUBLE_THREE_SUFFIX}"))
    }
}

impl PartialEq for ItemKind {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.name == other.name
    }
}

impl Eq for ItemKind {}

impl Hash for ItemKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Grid coordinates: `x` is the column (left to right), `y` the row (top to bottom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// True when `other` is directly left, right, above or below `self`
    pub fn is_adjacent(&self, other: Position) -> bool {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y) == 1
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Search axis for runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn perpendicular(&self) -> Self {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// Session lifecycle: `Playing` until the goal is met or moves run out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Playing,
    Won,
    Lost,
}

impl SessionState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, SessionState::Playing)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Playing => "playing",
            SessionState::Won => "won",
            SessionState::Lost => "lost",
        }
    }
}
