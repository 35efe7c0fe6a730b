//! Engine error type.
//!
//! Gameplay outcomes (a swap that does not pop, a board that needs a
//! reshuffle) are ordinary control flow and never show up here.

use thiserror::Error;

use crate::types::Position;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Second pick was not a grid neighbor of the first; the selection is cleared.
    #[error("invalid selection: {second} is not adjacent to {first}")]
    InvalidSelection { first: Position, second: Position },

    /// A selection arrived while a resolution was still in progress.
    #[error("engine busy: a resolution is still in progress")]
    EngineBusy,

    /// No special item definition matches a derived name.
    #[error("no special item definition named `{name}` in the catalog")]
    CatalogLookupFailure { name: String },

    /// The generator could not produce a solvable board.
    #[error("could not generate a solvable board after {attempts} attempts")]
    UnsolvableCatalog { attempts: u32 },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to parse catalog definition: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
