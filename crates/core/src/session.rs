//! Game session - selection handling, move accounting and win/loss
//!
//! The session owns the grid, the catalog and the RNG, and is the only
//! writer of the grid. A player swap is resolved in ordered phases:
//!
//! 1. pair passes (universal item swapped with something)
//! 2. the cluster sweep, one cluster per step
//! 3. finish: one move consumed, win/loss checked, and a reshuffle when
//!    no legal move is left
//!
//! In [`ResolveMode::Immediate`] all phases run inside `select_cell`. In
//! [`ResolveMode::Stepped`] the caller pulls one event at a time with
//! [`GameSession::advance`], and selections are rejected until it returns
//! `None`.

use std::collections::VecDeque;

use tracing::{debug, info, warn};

use crate::catalog::ItemCatalog;
use crate::config::{EngineConfig, ResolveMode};
use crate::error::{EngineError, Result};
use crate::generator::BoardGenerator;
use crate::grid::Grid;
use crate::matcher::can_pop;
use crate::oracle::MoveOracle;
use crate::resolver::{pair_interaction, EventKind, PairPass, ResolutionEvent, Resolver};
use crate::rng::SimpleRng;
use crate::selection::{Pick, Selection};
use crate::snapshot::{CellSnapshot, GameSnapshot};
use crate::types::{Position, SessionState};

/// What a call to [`GameSession::select_cell`] did
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionResult {
    /// Nothing happened (out of range, repeated pick, or game over)
    None,
    /// First pick stored
    PendingFirst(Position),
    /// Swap resolved; events in the order they happened
    Resolved(Vec<ResolutionEvent>),
    /// Swap accepted; drive it with `advance`
    Resolving,
    /// Swap would not pop and was reverted; no move consumed
    NoMatch,
    /// A resolution is still in progress
    RejectedBusy,
    /// Second pick was not adjacent; selection cleared
    RejectedNonAdjacent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pairs,
    Sweep,
    Finish,
    Done,
}

#[derive(Debug, Clone)]
struct PendingResolution {
    swapped: (Position, Position),
    passes: VecDeque<PairPass>,
    phase: Phase,
    clusters: u32,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: EngineConfig,
    catalog: ItemCatalog,
    grid: Grid,
    rng: SimpleRng,
    selection: Selection,
    score: u32,
    moves_remaining: u32,
    state: SessionState,
    pending: Option<PendingResolution>,
}

impl GameSession {
    /// Start a session on a freshly generated solvable board.
    ///
    /// Fails before play begins with `InvalidConfig` or `UnsolvableCatalog`.
    pub fn initialize(config: EngineConfig, catalog: ItemCatalog) -> Result<Self> {
        config.validate()?;
        let mut grid = Grid::new(config.width, config.height, catalog.universal())?;
        let mut rng = SimpleRng::new(config.seed);

        let attempts = BoardGenerator::new(&catalog)
            .with_max_attempts(config.max_generation_attempts)
            .generate_solvable(&mut grid, &mut rng, false)?;
        info!(
            width = config.width,
            height = config.height,
            seed = config.seed,
            attempts,
            "session started"
        );

        Ok(Self::assemble(config, catalog, grid, rng))
    }

    /// Start a session on a given board, as is. The board's size overrides
    /// the configured one.
    pub fn with_grid(mut config: EngineConfig, catalog: ItemCatalog, grid: Grid) -> Result<Self> {
        config.width = grid.width();
        config.height = grid.height();
        config.validate()?;
        let rng = SimpleRng::new(config.seed);
        Ok(Self::assemble(config, catalog, grid, rng))
    }

    fn assemble(config: EngineConfig, catalog: ItemCatalog, grid: Grid, rng: SimpleRng) -> Self {
        Self {
            moves_remaining: config.move_budget,
            config,
            catalog,
            grid,
            rng,
            selection: Selection::new(),
            score: 0,
            state: SessionState::Playing,
            pending: None,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn goal_score(&self) -> u32 {
        self.config.goal_score
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selection(&self) -> &[Position] {
        self.selection.as_slice()
    }

    pub fn is_resolving(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle a tap on cell `(x, y)`
    pub fn select_cell(&mut self, x: usize, y: usize) -> Result<SelectionResult> {
        if let Err(err) = self.ensure_idle() {
            debug!(x, y, %err, "selection rejected");
            return Ok(SelectionResult::RejectedBusy);
        }
        if self.state.is_terminal() {
            return Ok(SelectionResult::None);
        }

        let pos = Position::new(x, y);
        if !self.grid.contains(pos) {
            self.selection.clear();
            return Ok(SelectionResult::None);
        }

        match self.selection.push(pos) {
            Ok(Pick::First(first)) => Ok(SelectionResult::PendingFirst(first)),
            Ok(Pick::Repeated(_)) => Ok(SelectionResult::None),
            Ok(Pick::Pair(a, b)) => self.try_swap(a, b),
            Err(EngineError::InvalidSelection { first, second }) => {
                debug!(%first, %second, "non-adjacent selection cleared");
                Ok(SelectionResult::RejectedNonAdjacent)
            }
            Err(err) => Err(err),
        }
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.pending {
            Some(_) => Err(EngineError::EngineBusy),
            None => Ok(()),
        }
    }

    fn try_swap(&mut self, a: Position, b: Position) -> Result<SelectionResult> {
        self.grid.swap(a, b);
        if !can_pop(&self.grid) {
            self.grid.swap(a, b);
            debug!(%a, %b, "swap reverted, nothing pops");
            return Ok(SelectionResult::NoMatch);
        }

        debug!(%a, %b, "swap accepted");
        self.pending = Some(PendingResolution {
            swapped: (a, b),
            passes: pair_interaction(&self.grid, a, b).into_iter().collect(),
            phase: Phase::Pairs,
            clusters: 0,
        });

        match self.config.resolve_mode {
            ResolveMode::Stepped => Ok(SelectionResult::Resolving),
            ResolveMode::Immediate => {
                let mut events = Vec::new();
                while let Some(event) = self.advance()? {
                    events.push(event);
                }
                Ok(SelectionResult::Resolved(events))
            }
        }
    }

    /// Run the next phase of the resolution in progress.
    ///
    /// Returns `None` once the move is complete (or when nothing is in
    /// progress). An error aborts the resolution; the grid stays consistent.
    pub fn advance(&mut self) -> Result<Option<ResolutionEvent>> {
        let Some(mut pending) = self.pending.take() else {
            return Ok(None);
        };

        let step = self.step(&mut pending);
        if let Ok(Some(_)) = step {
            self.pending = Some(pending);
        }
        step
    }

    fn step(&mut self, pending: &mut PendingResolution) -> Result<Option<ResolutionEvent>> {
        loop {
            match pending.phase {
                Phase::Pairs => match pending.passes.pop_front() {
                    Some(pass) => {
                        let event = Resolver::new(&self.catalog).apply_pair_pass(
                            &mut self.grid,
                            &mut self.rng,
                            &pass,
                        );
                        self.score = self.score.saturating_add(event.score_delta);
                        return Ok(Some(event));
                    }
                    None => pending.phase = Phase::Sweep,
                },
                Phase::Sweep => {
                    if pending.clusters >= self.config.max_cascade_clusters {
                        warn!(
                            max_clusters = self.config.max_cascade_clusters,
                            "cascade cap reached, stopping sweep"
                        );
                        pending.phase = Phase::Finish;
                        continue;
                    }
                    let next = Resolver::new(&self.catalog)
                        .resolve_next_cluster(&mut self.grid, &mut self.rng)?;
                    match next {
                        Some(event) => {
                            pending.clusters += 1;
                            self.score = self.score.saturating_add(event.score_delta);
                            return Ok(Some(event));
                        }
                        None => pending.phase = Phase::Finish,
                    }
                }
                Phase::Finish => {
                    pending.phase = Phase::Done;
                    let (a, b) = pending.swapped;
                    self.finish_move(a, b, pending.clusters);
                    if self.state == SessionState::Playing
                        && !MoveOracle::exists_legal_move(&mut self.grid)
                    {
                        return self.reshuffle().map(Some);
                    }
                }
                Phase::Done => return Ok(None),
            }
        }
    }

    fn finish_move(&mut self, a: Position, b: Position, clusters: u32) {
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        debug!(
            %a,
            %b,
            clusters,
            score = self.score,
            moves_remaining = self.moves_remaining,
            "move finished"
        );

        if self.score >= self.config.goal_score {
            self.state = SessionState::Won;
        } else if self.moves_remaining == 0 {
            self.state = SessionState::Lost;
        }
        if self.state.is_terminal() {
            self.selection.clear();
            info!(
                state = self.state.as_str(),
                score = self.score,
                goal = self.config.goal_score,
                "session over"
            );
        }
    }

    /// Refill every non-special cell until the board is stable and has a
    /// legal move again. Specials stay where they are.
    pub fn reshuffle(&mut self) -> Result<ResolutionEvent> {
        self.ensure_idle()?;
        let refilled: Vec<Position> = self
            .grid
            .cells()
            .iter()
            .filter(|cell| !cell.item.is_special())
            .map(|cell| cell.position())
            .collect();

        let attempts = BoardGenerator::new(&self.catalog)
            .with_max_attempts(self.config.max_generation_attempts)
            .generate_solvable(&mut self.grid, &mut self.rng, true)?;
        debug!(cells = refilled.len(), attempts, "board reshuffled");

        Ok(ResolutionEvent {
            kind: EventKind::Reshuffle,
            cleared: refilled,
            spawned: Vec::new(),
            score_delta: 0,
        })
    }

    /// First legal swap on the board, if any. `None` while resolving.
    pub fn hint(&mut self) -> Option<(Position, Position)> {
        if self.is_resolving() {
            return None;
        }
        MoveOracle::find_legal_move(&mut self.grid)
    }

    pub fn current_state(&self) -> GameSnapshot {
        let mut snapshot = GameSnapshot::default();
        self.snapshot_into(&mut snapshot);
        snapshot
    }

    /// Fill an existing snapshot, reusing its buffers
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.width = self.grid.width();
        out.height = self.grid.height();
        out.cells.clear();
        self.grid.for_each_cell(|cell| {
            out.cells.push(CellSnapshot {
                name: cell.item.name.clone(),
                family: cell.item.family,
            })
        });
        out.moves_remaining = self.moves_remaining;
        out.score = self.score;
        out.goal_score = self.config.goal_score;
        out.state = self.state;
        out.selection.clear();
        out.selection.extend_from_slice(self.selection.as_slice());
        out.resolving = self.is_resolving();
    }
}
