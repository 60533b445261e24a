use thiserror::Error;

use wh_core::{BotId, Coord};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MobilityError {
    #[error("bot {0} not found")]
    BotNotFound(BotId),

    #[error("cell {0} is outside the grid")]
    OutOfBounds(Coord),

    #[error("cell {0} is already occupied by a bot")]
    Occupied(Coord),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
