//! `wh-sim` — tick loop orchestrator for the warehouse simulator.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Evolve    — every preference_update_interval_secs, drift every
//!                 item's preference.
//!   ② Dispatch  — Dispatcher::dispatch sees the floor and the idle bots
//!                 and returns Assignments.
//!   ③ Apply     — in the order returned:
//!                   Delivery{..} → fleet.assign_delivery
//!                   Resort{..}   → fleet.assign_resort
//!                   Park{..}     → fleet.assign_park
//!                 rejected assignments are logged and skipped.
//!   ④ Move      — every bot advances by dt in ascending id order and acts
//!                 on arrival; the resulting BotEvents go to the observer.
//! ```
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`dispatch`] | `Dispatcher`, `DispatchContext`, `Assignment`, `NoopDispatcher` |
//! | [`greedy`]   | `GreedyDispatcher`, `OutboundRequest`                    |
//! | [`sim`]      | `Sim`, `SimStats`                                        |
//! | [`builder`]  | `SimBuilder`                                             |
//! | [`observer`] | `SimObserver`, `NoopObserver`                            |
//! | [`error`]    | `SimError`, `SimResult<T>`                               |
//!
//! # Cargo features
//!
//! | Feature | Effect                                    |
//! |---------|-------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on `SimStats`.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wh_core::{Coord, WarehouseConfig};
//! use wh_sim::{GreedyDispatcher, NoopObserver, SimBuilder};
//! use wh_spatial::AStarPathfinder;
//!
//! let mut sim = SimBuilder::new(WarehouseConfig::default(), GreedyDispatcher::new(), AStarPathfinder)
//!     .bots([Coord::new(0, 9), Coord::new(1, 9), Coord::new(2, 9)])
//!     .build()?;
//! sim.dispatcher.request_outbound("ITEM001", 1);
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod dispatch;
pub mod error;
pub mod greedy;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use dispatch::{Assignment, DispatchContext, Dispatcher, NoopDispatcher};
pub use error::{SimError, SimResult};
pub use greedy::{GreedyDispatcher, OutboundRequest, outbound_dock};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{Sim, SimStats};
