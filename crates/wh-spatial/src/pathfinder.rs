//! Pathfinding trait and default A* implementation.
//!
//! # Pluggability
//!
//! `wh-mobility` plans routes through the [`Pathfinder`] trait, so a fleet can
//! be driven by a different search (jump-point search, reservation tables)
//! without touching the bot state machine.  The default [`AStarPathfinder`]
//! is stateless and cheap to share.
//!
//! # Search model
//!
//! 4-connected grid, every step costs 1, Manhattan heuristic (admissible and
//! consistent, so the first time the goal is popped the path is shortest).
//! Neighbours are expanded in the order +x, −x, +y, −y and equal-f entries
//! leave the open set in insertion order, which makes the returned path a
//! pure function of `(bounds, start, goal, blocked)`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use wh_core::{Bounds, Coord};

use crate::{BlockedSet, SpatialError, SpatialResult};

// ── GridPath ──────────────────────────────────────────────────────────────────

/// The result of a search: every cell from start to goal, both inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPath {
    cells: Vec<Coord>,
}

impl GridPath {
    /// All cells, start first.
    #[inline]
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of moves, i.e. cells minus one.
    #[inline]
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    /// `true` if start and goal are the same cell.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.cells.len() <= 1
    }

    pub fn start(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn goal(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    /// Drop the start cell and return the waypoints a bot still has to visit.
    pub fn into_waypoints(self) -> Vec<Coord> {
        let mut cells = self.cells;
        if !cells.is_empty() {
            cells.remove(0);
        }
        cells
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable grid search.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one instance can be shared by
/// every bot in a fleet.
pub trait Pathfinder: Send + Sync {
    /// Find a path from `start` to `goal` that avoids every cell in `blocked`
    /// except `goal` itself.
    ///
    /// Returns a single-cell path when `start == goal`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::OutOfBounds`] if either endpoint is off the grid, and
    /// [`SpatialError::NoPath`] if the goal cannot be reached.
    fn find_path(
        &self,
        bounds: Bounds,
        start: Coord,
        goal: Coord,
        blocked: &BlockedSet,
    ) -> SpatialResult<GridPath>;
}

// ── AStarPathfinder ───────────────────────────────────────────────────────────

/// A* over the warehouse floor.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathfinder;

impl Pathfinder for AStarPathfinder {
    fn find_path(
        &self,
        bounds: Bounds,
        start: Coord,
        goal: Coord,
        blocked: &BlockedSet,
    ) -> SpatialResult<GridPath> {
        astar(bounds, start, goal, blocked)
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

const UNREACHED: u32 = u32::MAX;

fn astar(bounds: Bounds, start: Coord, goal: Coord, blocked: &BlockedSet) -> SpatialResult<GridPath> {
    let start_idx = bounds.index_of(start).ok_or(SpatialError::OutOfBounds(start))?;
    let goal_idx = bounds.index_of(goal).ok_or(SpatialError::OutOfBounds(goal))?;

    if start == goal {
        return Ok(GridPath { cells: vec![start] });
    }

    let n = bounds.area();
    // g[v] = best known step count from start to v.
    let mut g = vec![UNREACHED; n];
    // came_from[v] = predecessor index; None for start and unreached cells.
    let mut came_from: Vec<Option<usize>> = vec![None; n];
    let mut closed = vec![false; n];

    // Min-heap on (f, insertion counter, cell).  The counter gives FIFO order
    // among equal f, independent of cell index.
    let mut heap: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
    let mut counter: u64 = 0;

    g[start_idx] = 0;
    heap.push(Reverse((start.manhattan(goal), counter, start_idx)));

    while let Some(Reverse((_, _, idx))) = heap.pop() {
        if idx == goal_idx {
            return Ok(reconstruct(bounds, &came_from, goal_idx));
        }
        // Skip stale heap entries.
        if closed[idx] {
            continue;
        }
        closed[idx] = true;

        let current = bounds.coord_of(idx);
        let next_g = g[idx] + 1;
        for neighbor in current.neighbors4() {
            let Some(n_idx) = bounds.index_of(neighbor) else { continue };
            if neighbor != goal && blocked.contains(neighbor) {
                continue;
            }
            if next_g < g[n_idx] {
                g[n_idx] = next_g;
                came_from[n_idx] = Some(idx);
                counter += 1;
                heap.push(Reverse((next_g + neighbor.manhattan(goal), counter, n_idx)));
            }
        }
    }

    Err(SpatialError::NoPath { from: start, to: goal })
}

fn reconstruct(bounds: Bounds, came_from: &[Option<usize>], goal_idx: usize) -> GridPath {
    let mut cells = vec![bounds.coord_of(goal_idx)];
    let mut cur = goal_idx;
    while let Some(prev) = came_from[cur] {
        cells.push(bounds.coord_of(prev));
        cur = prev;
    }
    cells.reverse();
    GridPath { cells }
}
