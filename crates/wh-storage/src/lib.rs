//! `wh-storage` — items, stack cells, and the warehouse grid.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`item`]   | `Item` — code + evolving preference score                    |
//! | [`cell`]   | `Cell`, `CellKind` — one grid location holding a stack       |
//! | [`grid`]   | `Grid` — fixed matrix of cells plus lookup queries           |
//! | [`resort`] | `Grid::resort` and `ResortOutcome` (scratch-cell re-stacking) |
//! | [`error`]  | `StorageError`, `StorageResult<T>`                           |
//!
//! # Stack convention
//!
//! A cell's items form a stack whose **top** is the most recently pushed item
//! and the first one removed.  Every iterator in this crate yields items top
//! to bottom.

pub mod cell;
pub mod error;
pub mod grid;
pub mod item;
pub mod resort;

#[cfg(test)]
mod tests;

pub use cell::{Cell, CellKind};
pub use error::{StorageError, StorageResult};
pub use grid::Grid;
pub use item::{Item, PREFERENCE_MAX, PREFERENCE_MIN};
pub use resort::ResortOutcome;
