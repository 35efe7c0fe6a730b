//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the match-three rules: finding runs, resolving
//! clusters into score and special items, chain reactions, and keeping the
//! board playable. It has **zero dependencies** on rendering, audio or I/O,
//! so it runs the same in a terminal, a GUI, or a headless test.
//!
//! # Module Structure
//!
//! - [`grid`]: flat row-major board of cells, swaps and neighbor lookups
//! - [`catalog`]: item definitions, random ordinary draws, special lookups
//! - [`matcher`]: runs along one axis and the `can_pop` predicate
//! - [`resolver`]: cluster shapes, special spawns, chain expansion, scoring
//! - [`oracle`]: exhaustive legal-move search
//! - [`generator`]: random fills until the board is stable and playable
//! - [`session`]: selections, move budget, win/loss, stepped resolution
//! - [`snapshot`]: serializable read-only view for renderers
//! - [`rng`]: seeded LCG so the same seed replays the same game
//!
//! # Rules
//!
//! - A swap counts when afterwards some run of 3+ exists, or a universal
//!   item is on the board. Otherwise it is reverted and costs nothing.
//! - A line of exactly 4 spawns the color's `_FourPiece` (clears its column
//!   when matched), a line of 5+ the universal item, and a cross / T / L
//!   shape the color's `_DoubleThree` (clears its row).
//! - Swapping a universal item with an ordinary one clears that item
//!   board-wide; with any special, the whole board.
//! - One move is consumed per accepted swap, however long the cascade.
//!
//! # Example
//!
//! ```
//! use match3_core::{EngineConfig, GameSession, ItemCatalog, SelectionResult};
//!
//! let config = EngineConfig::default().with_seed(7);
//! let mut session = GameSession::initialize(config, ItemCatalog::standard())?;
//!
//! // A fresh board always has at least one legal swap
//! let (a, b) = session.hint().unwrap();
//! session.select_cell(a.x, a.y)?;
//!
//! match session.select_cell(b.x, b.y)? {
//!     SelectionResult::Resolved(events) => assert!(!events.is_empty()),
//!     other => panic!("unexpected {:?}", other),
//! }
//! assert_eq!(session.moves_remaining(), 19);
//! # Ok::<(), match3_core::EngineError>(())
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod oracle;
pub mod resolver;
pub mod rng;
pub mod selection;
pub mod session;
pub mod snapshot;

pub use match3_types as types;

// Re-export commonly used types for convenience
pub use catalog::{Item, ItemCatalog};
pub use config::{EngineConfig, ResolveMode};
pub use error::{EngineError, Result};
pub use generator::BoardGenerator;
pub use grid::{Cell, Grid};
pub use matcher::{can_pop, connected_run, has_run};
pub use oracle::MoveOracle;
pub use resolver::{ClusterShape, EventKind, ResolutionEvent, Resolver, SpawnedSpecial};
pub use rng::SimpleRng;
pub use selection::Selection;
pub use session::{GameSession, SelectionResult};
pub use snapshot::{CellSnapshot, GameSnapshot};
