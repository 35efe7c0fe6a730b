//! Match-three engine (workspace facade crate).
//!
//! The engine lives in dedicated crates under `crates/`; this package
//! re-exports them as `match3::{core, types}` and hosts the terminal driver.

pub mod cli;

pub use match3_core as core;
pub use match3_types as types;
