//! Resolver - turns matches into clears, score and special spawns
//!
//! One resolution of a player swap runs in ordered phases:
//!
//! 1. **Pair interactions** ([`pair_interaction`]): when a universal item was
//!    one of the two swapped tiles, it clears a color or the whole board.
//! 2. **Sweep** ([`Resolver::resolve_next_cluster`], repeated): scan the board
//!    row by row from `(0, 0)`, resolve the first cluster found, and restart
//!    from `(0, 0)`, until no cell sits in a run of three.
//!
//! Every call returns with the grid fully consistent, so callers may pause
//! between clusters (to animate) without ever seeing a half-resolved cluster.
//!
//! # Cluster resolution
//!
//! - The cluster is the primary run through the origin plus every
//!   perpendicular run of three or more crossing it ([`Cluster::find`]).
//! - Special items inside it pull in more cells, transitively
//!   ([`expand_special_tiles`]).
//! - Score is `origin value x cluster size`.
//! - Shape decides spawns, all of which apply: a line of exactly 4 puts the
//!   color's `_FourPiece` at index 1, a line of 5+ puts the universal item at
//!   index `len / 2 + 1`, and a cross / T / L puts the color's `_DoubleThree`
//!   at index 0. Every other cleared cell gets a random ordinary item.

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use arrayvec::ArrayVec;
use tracing::{debug, warn};

use crate::catalog::{Item, ItemCatalog};
use crate::error::Result;
use crate::grid::Grid;
use crate::matcher::{connected_run, runs_at};
use crate::rng::SimpleRng;
use crate::types::{Axis, ItemFamily, Position, MIN_RUN};

/// Shape flags of a cluster. More than one may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClusterShape {
    pub line_of_four: bool,
    pub line_of_five: bool,
    pub cross: bool,
}

/// What produced a [`ResolutionEvent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A matched cluster from the sweep
    Cluster(ClusterShape),
    /// Universal swapped with an ordinary item: that item cleared board-wide
    ColorClear,
    /// Universal swapped with a special (or another universal): whole board cleared
    BoardClear,
    /// No legal move was left; non-special cells were refilled
    Reshuffle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedSpecial {
    pub position: Position,
    pub item: Item,
}

/// One discrete, renderable phase of a resolution
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionEvent {
    pub kind: EventKind,
    /// Cells whose items were removed and refilled, in cluster order
    pub cleared: Vec<Position>,
    /// Specials placed on cleared cells after the refill
    pub spawned: Vec<SpawnedSpecial>,
    pub score_delta: u32,
}

impl ResolutionEvent {
    /// The highest-priority special spawned, if any
    pub fn spawned_special(&self) -> Option<&SpawnedSpecial> {
        self.spawned.last()
    }

    pub fn spawned_family(&self, family: ItemFamily) -> Option<&SpawnedSpecial> {
        self.spawned.iter().find(|spawn| spawn.item.family == family)
    }
}

/// A matched group of cells, before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub origin: Position,
    pub primary_axis: Axis,
    /// Primary run first (in axis order), then crossing runs; deduplicated
    pub cells: Vec<Position>,
    pub horizontal_len: usize,
    pub vertical_len: usize,
    /// Longest perpendicular run through any cell of the primary run
    pub cross_len: usize,
}

impl Cluster {
    /// Cluster with `origin` on its primary run, or `None` when neither run
    /// through `origin` reaches [`MIN_RUN`]
    pub fn find(grid: &Grid, origin: Position) -> Option<Self> {
        let runs = runs_at(grid, origin);
        let (primary_axis, primary) = if runs.horizontal.len() >= MIN_RUN {
            (Axis::Horizontal, &runs.horizontal)
        } else if runs.vertical.len() >= MIN_RUN {
            (Axis::Vertical, &runs.vertical)
        } else {
            return None;
        };

        let mut seen: HashSet<Position> = primary.iter().copied().collect();
        let mut cells = primary.clone();
        let mut cross_len = 0;

        for pos in primary {
            let local = connected_run(grid, *pos, primary_axis.perpendicular());
            cross_len = cross_len.max(local.len());
            if local.len() >= MIN_RUN {
                cells.extend(local.into_iter().filter(|p| seen.insert(*p)));
            }
        }

        Some(Self {
            origin,
            primary_axis,
            cells,
            horizontal_len: runs.horizontal.len(),
            vertical_len: runs.vertical.len(),
            cross_len,
        })
    }

    pub fn shape(&self) -> ClusterShape {
        let h = self.horizontal_len;
        let v = self.vertical_len;
        let (local_h, local_v) = match self.primary_axis {
            Axis::Horizontal => (0, self.cross_len),
            Axis::Vertical => (self.cross_len, 0),
        };
        let lens = [h, v, local_h, local_v];

        ClusterShape {
            line_of_four: lens.contains(&4),
            line_of_five: lens.iter().any(|&len| len >= 5),
            cross: (v >= MIN_RUN && local_h >= MIN_RUN)
                || (h >= MIN_RUN && local_v >= MIN_RUN)
                || (v >= MIN_RUN && h >= MIN_RUN),
        }
    }
}

/// Chain reaction: cells pulled in by the special items among `cells`.
///
/// A `FourPiece` adds its column, a `DoubleThree` its row, a `Universal`
/// every cell holding the same item. Added cells are expanded in turn.
/// Cells already in `visited` are not expanded again, and every expanded
/// cell is added to it, so the walk is bounded by the board size.
/// Returns only cells not already in `cells`, each once, in discovery order.
pub fn expand_special_tiles(
    grid: &Grid,
    cells: &[Position],
    visited: &mut HashSet<Position>,
) -> Vec<Position> {
    let mut known: HashSet<Position> = cells.iter().copied().collect();
    let mut queue: VecDeque<Position> = cells.iter().copied().collect();
    let mut added = Vec::new();

    while let Some(pos) = queue.pop_front() {
        if !visited.insert(pos) {
            continue;
        }
        let Some(item) = grid.item_at(pos) else {
            continue;
        };
        let affected = match item.family {
            ItemFamily::Ordinary => continue,
            ItemFamily::FourPiece => grid.column(pos.x),
            ItemFamily::DoubleThree => grid.row(pos.y),
            ItemFamily::Universal => grid.positions_of(item),
        };
        for p in affected {
            if known.insert(p) {
                added.push(p);
                queue.push_back(p);
            }
        }
    }

    added
}

/// A clear triggered directly by swapping a universal item
#[derive(Debug, Clone, PartialEq)]
pub enum PairPass {
    /// Clear every cell holding `target`, plus the universal at `trigger`
    ColorClear { target: Item, trigger: Position },
    /// Clear every cell
    BoardClear,
}

/// Pair passes for a swap that left items at `a` and `b`. Empty unless a
/// universal item is involved.
pub fn pair_interaction(grid: &Grid, a: Position, b: Position) -> ArrayVec<PairPass, 2> {
    let mut passes = ArrayVec::new();
    let (Some(item_a), Some(item_b)) = (grid.item_at(a), grid.item_at(b)) else {
        return passes;
    };

    match (item_a.family, item_b.family) {
        (ItemFamily::Universal, ItemFamily::Universal) => {
            // Second pass clears whatever the first refill happened to seed.
            passes.push(PairPass::BoardClear);
            passes.push(PairPass::BoardClear);
        }
        (ItemFamily::Universal, ItemFamily::Ordinary) => passes.push(PairPass::ColorClear {
            target: Arc::clone(item_b),
            trigger: a,
        }),
        (ItemFamily::Ordinary, ItemFamily::Universal) => passes.push(PairPass::ColorClear {
            target: Arc::clone(item_a),
            trigger: b,
        }),
        (ItemFamily::Universal, _) | (_, ItemFamily::Universal) => {
            passes.push(PairPass::BoardClear)
        }
        _ => {}
    }
    passes
}

/// Applies clears to a grid using items from a catalog
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a ItemCatalog,
}

impl<'a> Resolver<'a> {
    pub fn new(catalog: &'a ItemCatalog) -> Self {
        Self { catalog }
    }

    /// Apply one pair pass. Scores the sum of the cleared items' values.
    pub fn apply_pair_pass(
        &self,
        grid: &mut Grid,
        rng: &mut SimpleRng,
        pass: &PairPass,
    ) -> ResolutionEvent {
        let (kind, cleared) = match pass {
            PairPass::ColorClear { target, trigger } => {
                let mut cleared = grid.positions_of(target);
                if grid.contains(*trigger) && !cleared.contains(trigger) {
                    cleared.push(*trigger);
                }
                (EventKind::ColorClear, cleared)
            }
            PairPass::BoardClear => (EventKind::BoardClear, grid.positions().collect()),
        };

        let score_delta = cleared
            .iter()
            .filter_map(|pos| grid.item_at(*pos))
            .fold(0u32, |total, item| total.saturating_add(item.score_value));
        self.refill(grid, rng, &cleared);

        debug!(?kind, cleared = cleared.len(), score_delta, "pair pass");
        ResolutionEvent {
            kind,
            cleared,
            spawned: Vec::new(),
            score_delta,
        }
    }

    /// Resolve the first cluster in row-major order, if any.
    ///
    /// Fails with `CatalogLookupFailure` before touching the grid when a
    /// spawned special has no definition.
    pub fn resolve_next_cluster(
        &self,
        grid: &mut Grid,
        rng: &mut SimpleRng,
    ) -> Result<Option<ResolutionEvent>> {
        let cluster = grid.positions().find_map(|pos| Cluster::find(grid, pos));
        match cluster {
            Some(cluster) => self.resolve_cluster(grid, rng, cluster).map(Some),
            None => Ok(None),
        }
    }

    /// Resolve one cluster: chain expansion, scoring, spawns, refill
    pub fn resolve_cluster(
        &self,
        grid: &mut Grid,
        rng: &mut SimpleRng,
        cluster: Cluster,
    ) -> Result<ResolutionEvent> {
        let shape = cluster.shape();
        let origin_item = match grid.item_at(cluster.origin) {
            Some(item) => Arc::clone(item),
            None => return Ok(self.empty_cluster_event(shape)),
        };

        let mut cells = cluster.cells;
        let mut visited = HashSet::new();
        let chained = expand_special_tiles(grid, &cells, &mut visited);
        cells.extend(chained);

        let score_delta = origin_item
            .score_value
            .saturating_mul(u32::try_from(cells.len()).unwrap_or(u32::MAX));
        let spawned = self.plan_spawns(&origin_item, &cells, shape)?;

        self.refill(grid, rng, &cells);
        for spawn in &spawned {
            grid.set(spawn.position, Arc::clone(&spawn.item));
        }

        debug!(
            origin = %cluster.origin,
            item = %origin_item,
            size = cells.len(),
            ?shape,
            spawned = spawned.len(),
            score_delta,
            "resolved cluster"
        );
        Ok(ResolutionEvent {
            kind: EventKind::Cluster(shape),
            cleared: cells,
            spawned,
            score_delta,
        })
    }

    /// Run the sweep until no cluster is left or `max_clusters` were resolved
    pub fn sweep(
        &self,
        grid: &mut Grid,
        rng: &mut SimpleRng,
        max_clusters: u32,
    ) -> Result<Vec<ResolutionEvent>> {
        let mut events = Vec::new();
        while let Some(event) = self.resolve_next_cluster(grid, rng)? {
            events.push(event);
            if events.len() as u32 >= max_clusters {
                warn!(max_clusters, "cascade cap reached, stopping sweep");
                break;
            }
        }
        Ok(events)
    }

    fn plan_spawns(
        &self,
        cleared_item: &Item,
        cells: &[Position],
        shape: ClusterShape,
    ) -> Result<Vec<SpawnedSpecial>> {
        let mut spawned = Vec::new();
        let colored = cleared_item.color_name().is_some();
        if !colored && (shape.line_of_four || shape.cross) {
            debug!(item = %cleared_item, "no color to derive a special from");
        }

        if shape.line_of_four && colored {
            spawned.push(SpawnedSpecial {
                position: cells[1],
                item: self.catalog.four_piece_for(cleared_item)?,
            });
        }
        if shape.line_of_five {
            let index = (cells.len() / 2 + 1).min(cells.len() - 1);
            spawned.push(SpawnedSpecial {
                position: cells[index],
                item: self.catalog.universal(),
            });
        }
        if shape.cross && colored {
            spawned.push(SpawnedSpecial {
                position: cells[0],
                item: self.catalog.double_three_for(cleared_item)?,
            });
        }
        Ok(spawned)
    }

    fn refill(&self, grid: &mut Grid, rng: &mut SimpleRng, cells: &[Position]) {
        for pos in cells {
            grid.set(*pos, self.catalog.random_ordinary(rng));
        }
    }

    fn empty_cluster_event(&self, shape: ClusterShape) -> ResolutionEvent {
        ResolutionEvent {
            kind: EventKind::Cluster(shape),
            cleared: Vec::new(),
            spawned: Vec::new(),
            score_delta: 0,
        }
    }
}
