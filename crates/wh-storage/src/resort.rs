//! Re-stacking a cell into preference order using spare floor capacity.
//!
//! Only the top of a stack is reachable, so a cell cannot reorder itself in
//! place.  Items are unstacked onto *scratch cells* (other storage cells with
//! free slots) and then restacked in order:
//!
//! ```text
//! 1. pop target top → push onto current scratch cell
//!    (a scratch cell takes items until full; then a fresh one is picked at
//!     random, never the target or a cell already used)
//! 2. repeat until the target is empty or no scratch cell remains
//! 3. take back exactly the items placed on each scratch cell
//! 4. stable-sort them by descending preference
//! 5. push lowest first, so the highest ends on top
//! ```
//!
//! Scratch cells may already hold goods of their own.  Only the items pushed
//! during step 1 are taken back, so those goods are never disturbed.
//!
//! If the floor runs out of spare capacity the resort is partial: the moved
//! items are restacked on top of whatever stayed in the target, nothing is
//! lost, and the target keeps reporting `needs_resort()` so it can be retried.

use tracing::debug;

use wh_core::{Coord, SimRng};

use crate::{Cell, Grid, Item, StorageError, StorageResult};

/// What a call to [`Grid::resort`] achieved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResortOutcome {
    /// Items that went through scratch cells and were restacked.
    pub moved: usize,
    /// Scratch cells used, in the order they were picked.
    pub scratch_cells: Vec<Coord>,
    /// `false` if spare capacity ran out before the target was emptied.
    pub complete: bool,
}

impl Grid {
    /// Restack the cell at `target` in non-increasing preference order
    /// (top to bottom), using scratch cells picked with `rng`.
    ///
    /// # Errors
    ///
    /// [`StorageError::OutOfBounds`] if `target` is not on the grid.
    pub fn resort(&mut self, target: Coord, rng: &mut SimRng) -> StorageResult<ResortOutcome> {
        if self.cell(target).is_none() {
            return Err(StorageError::OutOfBounds(target));
        }

        // (scratch cell, number of our items on it)
        let mut scratch: Vec<(Coord, usize)> = Vec::new();
        let mut exclude = vec![target];

        // ── Unstack ───────────────────────────────────────────────────────
        loop {
            if self.cell(target).is_none_or(Cell::is_empty) {
                break;
            }
            let current_open = scratch
                .last()
                .is_some_and(|&(c, _)| self.cell(c).is_some_and(Cell::has_capacity));
            if !current_open {
                match self.find_empty_storage_cell(&exclude, rng) {
                    Some(c) => {
                        exclude.push(c);
                        scratch.push((c, 0));
                    }
                    None => break,
                }
            }
            let Some((dest, placed)) = scratch.last_mut() else { break };
            let Some(item) = self.cell_mut(target).and_then(Cell::remove_item) else { break };
            if let Err(err) = self.add_item(*dest, item) {
                // Unreachable while `has_capacity` holds; put the item back.
                if let Some(item) = err.into_item() {
                    self.add_item(target, item)?;
                }
                break;
            }
            *placed += 1;
        }

        let complete = self.cell(target).is_none_or(Cell::is_empty);

        // ── Collect in original top-to-bottom order ───────────────────────
        let mut held: Vec<Item> = Vec::new();
        for &(c, placed) in &scratch {
            let Some(cell) = self.cell_mut(c) else { continue };
            let mut batch: Vec<Item> = (0..placed).filter_map(|_| cell.remove_item()).collect();
            batch.reverse();
            held.extend(batch);
        }
        let moved = held.len();

        // ── Restack ───────────────────────────────────────────────────────
        held.sort_by(|a, b| b.preference().cmp(&a.preference()));
        for item in held.into_iter().rev() {
            self.add_item(target, item)?;
        }

        debug!(
            %target,
            moved,
            scratch = scratch.len(),
            complete,
            "resorted cell"
        );

        Ok(ResortOutcome {
            moved,
            scratch_cells: scratch.into_iter().map(|(c, _)| c).collect(),
            complete,
        })
    }
}
