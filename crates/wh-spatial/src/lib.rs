//! `wh-spatial` — grid pathfinding.
//!
//! # Crate layout
//!
//! | Module         | Contents                                              |
//! |----------------|-------------------------------------------------------|
//! | [`pathfinder`] | `Pathfinder` trait, `GridPath`, `AStarPathfinder`     |
//! | [`blocked`]    | `BlockedSet` — cells a search must route around       |
//! | [`error`]      | `SpatialError`, `SpatialResult<T>`                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `GridPath`.             |

pub mod blocked;
pub mod error;
pub mod pathfinder;


pub use blocked::BlockedSet;
pub use error::{SpatialError, SpatialResult};
pub use pathfinder::{AStarPathfinder, GridPath, Pathfinder};
