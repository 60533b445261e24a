use thiserror::Error;

use wh_core::CoreError;
use wh_mobility::MobilityError;
use wh_storage::StorageError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    /// No inbound or storage cell could accept an item that had to be put
    /// somewhere.
    #[error("no cell can take item {0}")]
    NoRoom(String),
}

pub type SimResult<T> = Result<T, SimError>;
