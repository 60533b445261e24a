//! Spatial-subsystem error type.

use thiserror::Error;

use wh_core::Coord;

/// Errors produced by `wh-spatial`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpatialError {
    /// The goal is unreachable under the current blocked set.  Expected
    /// whenever bots crowd a corridor; callers hold and retry.
    #[error("no path from {from} to {to}")]
    NoPath { from: Coord, to: Coord },

    #[error("coordinate {0} is outside the grid")]
    OutOfBounds(Coord),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
