//! Storage-subsystem error type.

use thiserror::Error;

use wh_core::Coord;

use crate::Item;

/// Errors produced by `wh-storage`.
///
/// Both variants are expected outcomes of normal operation; callers choose a
/// different cell and carry on.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The storage cell is at capacity.  The rejected item is handed back so
    /// it is never lost.
    #[error("cell {coord} is full ({capacity} items)")]
    CellFull {
        coord:    Coord,
        capacity: usize,
        item:     Item,
    },

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Coord),
}

impl StorageError {
    /// Recover the item a failed push was carrying, if any.
    pub fn into_item(self) -> Option<Item> {
        match self {
            StorageError::CellFull { item, .. } => Some(item),
            StorageError::OutOfBounds(_) => None,
        }
    }
}

pub type StorageResult<T> = Result<T, StorageError>;
