//! The warehouse floor: a fixed matrix of cells and the queries over it.
//!
//! # Layout
//!
//! Cells are stored row-major (`index = y * width + x`).  Queries that must
//! return "the first" match scan **column by column** (x outer, y inner) so
//! the inbound column is searched before any storage column.
//!
//! Cell kinds are assigned once at construction:
//!
//! ```text
//! column 0,       rows 0..inbound_cells   → Inbound
//! column width-1, rows 0..outbound_cells  → Outbound
//! everything else                         → Storage
//! ```
//!
//! The grid owns every cell and every item resting on a cell.  It does not
//! know about bots.

use wh_core::{Bounds, Coord, SimRng, WarehouseConfig};

use crate::{Cell, CellKind, Item, StorageError, StorageResult};

#[derive(Debug, Clone)]
pub struct Grid {
    bounds: Bounds,
    cells:  Vec<Cell>,
}

impl Grid {
    /// Build the floor described by `config`.  All cells start empty.
    pub fn new(config: &WarehouseConfig) -> Self {
        let bounds = config.bounds();
        let last_col = config.grid_width as i32 - 1;
        let cells = (0..bounds.area())
            .map(|i| {
                let c = bounds.coord_of(i);
                let kind = if c.x == 0 && (c.y as u32) < config.inbound_cells {
                    CellKind::Inbound
                } else if c.x == last_col && (c.y as u32) < config.outbound_cells {
                    CellKind::Outbound
                } else {
                    CellKind::Storage
                };
                Cell::new(c, kind, config.max_items_per_cell)
            })
            .collect();
        Self { bounds, cells }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn cell(&self, c: Coord) -> Option<&Cell> {
        self.bounds.index_of(c).map(|i| &self.cells[i])
    }

    #[inline]
    pub fn cell_mut(&mut self, c: Coord) -> Option<&mut Cell> {
        self.bounds.index_of(c).map(|i| &mut self.cells[i])
    }

    /// Cell at column `x`, row `y`, or `None` when out of bounds.
    #[inline]
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.cell(Coord::new(x, y))
    }

    /// Every cell, column by column.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        let (w, h) = (self.bounds.width as usize, self.bounds.height as usize);
        (0..w).flat_map(move |x| (0..h).map(move |y| &self.cells[y * w + x]))
    }

    /// Coordinates of every cell of `kind`, column by column.
    pub fn coords_of_kind(&self, kind: CellKind) -> Vec<Coord> {
        self.cells().filter(|c| c.kind() == kind).map(Cell::coord).collect()
    }

    /// Push `item` onto the cell at `c`.
    ///
    /// # Errors
    ///
    /// [`StorageError::OutOfBounds`] for a coordinate off the grid, or
    /// [`StorageError::CellFull`] (item handed back) for a full storage cell.
    pub fn add_item(&mut self, c: Coord, item: Item) -> StorageResult<()> {
        self.cell_mut(c)
            .ok_or(StorageError::OutOfBounds(c))?
            .add_item(item)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// A storage cell with spare capacity chosen uniformly at random, skipping
    /// anything in `exclude`.
    pub fn find_empty_storage_cell(&self, exclude: &[Coord], rng: &mut SimRng) -> Option<Coord> {
        let candidates: Vec<Coord> = self
            .cells()
            .filter(|c| c.kind() == CellKind::Storage && c.has_capacity())
            .map(Cell::coord)
            .filter(|c| !exclude.contains(c))
            .collect();
        rng.choose(&candidates).copied()
    }

    /// Locate an item by code among inbound and storage cells.  Outbound
    /// cells hold shipped goods and are never searched.
    pub fn find_item(&self, code: &str) -> Option<(Coord, &Item)> {
        self.cells()
            .filter(|c| matches!(c.kind(), CellKind::Inbound | CellKind::Storage))
            .find_map(|c| c.items().find(|it| it.code() == code).map(|it| (c.coord(), it)))
    }

    /// The item with the strictly highest preference among cells of the given
    /// kinds.  The first one found wins ties.
    pub fn highest_preference_item(&self, kinds: &[CellKind]) -> Option<(Coord, &Item)> {
        let mut best: Option<(Coord, &Item)> = None;
        for cell in self.cells().filter(|c| kinds.contains(&c.kind())) {
            for item in cell.items() {
                if best.is_none_or(|(_, b)| item.preference() > b.preference()) {
                    best = Some((cell.coord(), item));
                }
            }
        }
        best
    }

    /// Storage cells whose stacks are out of preference order.
    pub fn cells_needing_resort(&self) -> Vec<Coord> {
        self.cells()
            .filter(|c| c.kind() == CellKind::Storage && c.needs_resort())
            .map(Cell::coord)
            .collect()
    }

    /// Total items resting on the floor (excludes anything a bot carries).
    pub fn total_items(&self) -> usize {
        self.cells.iter().map(Cell::len).sum()
    }

    // ── Evolution ─────────────────────────────────────────────────────────

    /// Apply one preference evolution step to every item on the floor.
    pub fn evolve_preferences(&mut self, rng: &mut SimRng) {
        for cell in &mut self.cells {
            for item in cell.items_mut() {
                item.update_preference(rng);
            }
        }
    }
}
