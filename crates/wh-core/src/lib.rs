//! `wh-core` — foundational types for the warehouse simulator.
//!
//! This crate is a dependency of every other `wh-*` crate.  It has no `wh-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `BotId`                                                   |
//! | [`geo`]     | `Coord` (grid cell), `Point` (continuous), `Bounds`       |
//! | [`time`]    | `Tick`, `SimClock`                                        |
//! | [`rng`]     | `SimRng`, `seed_for_code`                                 |
//! | [`config`]  | `WarehouseConfig`                                         |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::WarehouseConfig;
pub use error::{CoreError, CoreResult};
pub use geo::{Bounds, Coord, Point};
pub use ids::BotId;
pub use rng::{SimRng, seed_for_code};
pub use time::{SimClock, Tick};
