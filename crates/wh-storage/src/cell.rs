//! A single grid location holding a stack of items.

use std::collections::VecDeque;
use std::fmt;

use wh_core::Coord;

use crate::{Item, StorageError, StorageResult};

// ── CellKind ──────────────────────────────────────────────────────────────────

/// Role of a cell on the warehouse floor.  Fixed at grid construction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum CellKind {
    /// Receiving dock where new items arrive.  Uncapped.
    Inbound,
    /// Regular storage: a capacity-limited stack.
    Storage,
    /// Shipping dock; delivered items leave the system here.  Uncapped.
    Outbound,
}

impl CellKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CellKind::Inbound  => "inbound",
            CellKind::Storage  => "storage",
            CellKind::Outbound => "outbound",
        }
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One addressable grid location and the stack of items on it.
///
/// The stack is only reachable through top-of-stack operations
/// (`add_item`/`remove_item`/`peek_top`) plus the code-targeted
/// [`take_item`](Self::take_item) a bot uses for a specific pickup.
#[derive(Debug, Clone)]
pub struct Cell {
    coord:    Coord,
    kind:     CellKind,
    /// `Some(n)` for storage cells, `None` for uncapped docks.
    capacity: Option<usize>,
    /// Front = top of stack.
    items:    VecDeque<Item>,
}

impl Cell {
    /// Create an empty cell.  `storage_capacity` only applies when `kind` is
    /// [`CellKind::Storage`].
    pub fn new(coord: Coord, kind: CellKind, storage_capacity: usize) -> Self {
        let capacity = (kind == CellKind::Storage).then_some(storage_capacity);
        Self { coord, kind, capacity, items: VecDeque::new() }
    }

    #[inline]
    pub fn coord(&self) -> Coord {
        self.coord
    }

    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Stack height limit; `None` means uncapped.
    #[inline]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` if another item can be pushed.
    #[inline]
    pub fn has_capacity(&self) -> bool {
        self.capacity.is_none_or(|cap| self.items.len() < cap)
    }

    /// Free slots left; `None` for uncapped cells.
    #[inline]
    pub fn spare_capacity(&self) -> Option<usize> {
        self.capacity.map(|cap| cap.saturating_sub(self.items.len()))
    }

    // ── Stack operations ──────────────────────────────────────────────────

    /// Push `item` onto the top of the stack.
    ///
    /// # Errors
    ///
    /// [`StorageError::CellFull`] if this is a storage cell at capacity.  The
    /// stack is left unchanged and the item is returned inside the error.
    pub fn add_item(&mut self, item: Item) -> StorageResult<()> {
        match self.capacity {
            Some(capacity) if self.items.len() >= capacity => {
                return Err(StorageError::CellFull { coord: self.coord, capacity, item });
            }
            _ => {}
        }
        self.items.push_front(item);
        Ok(())
    }

    /// Pop the top item, or `None` if the stack is empty.
    #[inline]
    pub fn remove_item(&mut self) -> Option<Item> {
        self.items.pop_front()
    }

    #[inline]
    pub fn peek_top(&self) -> Option<&Item> {
        self.items.front()
    }

    /// Remove the first item with `code`, scanning from the top down.
    pub fn take_item(&mut self, code: &str) -> Option<Item> {
        let pos = self.items.iter().position(|it| it.code() == code)?;
        self.items.remove(pos)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.items.iter().any(|it| it.code() == code)
    }

    /// Items from top to bottom.
    pub fn items(&self) -> impl ExactSizeIterator<Item = &Item> + '_ {
        self.items.iter()
    }

    /// Mutable access for preference evolution; stack order is not exposed
    /// for rearrangement.
    pub(crate) fn items_mut(&mut self) -> impl Iterator<Item = &mut Item> + '_ {
        self.items.iter_mut()
    }

    // ── Ordering ──────────────────────────────────────────────────────────

    /// `true` when some item sits directly above one with a strictly higher
    /// preference, i.e. the stack is not non-increasing top to bottom.
    pub fn needs_resort(&self) -> bool {
        self.items
            .iter()
            .zip(self.items.iter().skip(1))
            .any(|(upper, lower)| upper.preference() < lower.preference())
    }

    /// Reorder in place so preference is non-increasing from the top.  Stable:
    /// equal preferences keep their relative order.
    pub fn sort_items_by_preference(&mut self) {
        self.items
            .make_contiguous()
            .sort_by(|a, b| b.preference().cmp(&a.preference()));
    }

    /// The `n` highest-preference items, highest first.
    pub fn top_items(&self, n: usize) -> Vec<&Item> {
        let mut sorted: Vec<&Item> = self.items.iter().collect();
        sorted.sort_by(|a, b| b.preference().cmp(&a.preference()));
        sorted.truncate(n);
        sorted
    }

    /// The `n` lowest-preference items, lowest first.
    pub fn bottom_items(&self, n: usize) -> Vec<&Item> {
        let mut sorted: Vec<&Item> = self.items.iter().collect();
        sorted.sort_by(|a, b| b.preference().cmp(&a.preference()));
        let mut lowest = sorted.split_off(sorted.len().saturating_sub(n));
        lowest.sort_by_key(|it| it.preference());
        lowest
    }
}
