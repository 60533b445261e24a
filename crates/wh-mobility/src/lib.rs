//! `wh-mobility` — bots, their tasks, and how they move.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`task`]     | `BotTask` (sum type), `BotState` label, `Abandoned`, `BotEvent` |
//! | [`motion`]   | `MotionParams` — acceleration / deceleration rules              |
//! | [`roster`]   | `RosterView` — read-only snapshot of where every bot is         |
//! | [`navigate`] | `Navigator` — two-phase obstacle-aware planning                 |
//! | [`bot`]      | `Bot` — continuous position, path, task state machine           |
//! | [`fleet`]    | `Fleet<P>` — all bots plus the shared `Pathfinder`              |
//! | [`error`]    | `MobilityError`, `MobilityResult<T>`                            |
//!
//! # Movement model (continuous, per-tick integration)
//!
//! 1. An assignment sets a task and plans a grid path to its first target.
//! 2. Every tick, [`Fleet::update_all`] updates bots in ascending id order.
//!    Each bot accelerates towards its next waypoint, snaps onto it when the
//!    step would reach it, and pops it.
//! 3. Before moving, a bot checks the [`RosterView`]: if its next waypoint is
//!    another bot's cell, or a cell another bot is already moving into, it
//!    holds (speed 0) and replans.
//! 4. When the path empties the bot handles arrival (pick up, drop off,
//!    resort or park), mutating the grid directly.
//!
//! A bot's rounded cell only ever changes to its next waypoint, and the
//! roster entry of each bot is refreshed right after it moves, so no two bots
//! ever share a rounded cell at the end of a bot update.

pub mod bot;
pub mod error;
pub mod fleet;
pub mod motion;
pub mod navigate;
pub mod roster;
pub mod task;


pub use bot::Bot;
pub use error::{MobilityError, MobilityResult};
pub use fleet::Fleet;
pub use motion::MotionParams;
pub use navigate::Navigator;
pub use roster::{RosterEntry, RosterView};
pub use task::{Abandoned, BotEvent, BotState, BotTask};
