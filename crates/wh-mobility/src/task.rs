//! What a bot is doing, and what it reports back.

use std::fmt;

use wh_core::{BotId, Coord};
use wh_storage::{Item, ResortOutcome};

// ── BotTask ───────────────────────────────────────────────────────────────────

/// The task a bot is executing.
///
/// A delivery is two legs: `ToPickup` travels to `source`, takes the item, and
/// becomes `ToDropoff`, which travels to `dest`.  Cargo only exists inside
/// `ToDropoff`, so a bot can never carry something while idle or resorting.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BotTask {
    #[default]
    Idle,

    ToPickup {
        source:    Coord,
        dest:      Coord,
        /// `None` takes whatever is on top of `source`.
        item_code: Option<String>,
    },

    ToDropoff {
        source:  Coord,
        dest:    Coord,
        /// `None` if `source` had nothing matching on arrival.
        carried: Option<Item>,
    },

    ToResort {
        cell: Coord,
    },

    /// Walk to `cell` and wait there, out of the way of other work.
    ToRest {
        cell: Coord,
    },
}

impl BotTask {
    pub fn state(&self) -> BotState {
        match self {
            BotTask::Idle             => BotState::Idle,
            BotTask::ToPickup { .. }  => BotState::MovingToPickup,
            BotTask::ToDropoff { .. } => BotState::MovingToDropoff,
            BotTask::ToResort { .. }  => BotState::MovingToResortTarget,
            BotTask::ToRest { .. }    => BotState::MovingToRest,
        }
    }

    /// The cell this task is currently heading for.
    pub fn target(&self) -> Option<Coord> {
        match self {
            BotTask::Idle                     => None,
            BotTask::ToPickup { source, .. }  => Some(*source),
            BotTask::ToDropoff { dest, .. }   => Some(*dest),
            BotTask::ToResort { cell }
            | BotTask::ToRest { cell }        => Some(*cell),
        }
    }

    /// Every cell the task will still touch.  Dispatchers use this to avoid
    /// sending two bots to the same stack.
    pub fn reserved_cells(&self) -> Vec<Coord> {
        match self {
            BotTask::Idle                              => vec![],
            BotTask::ToPickup { source, dest, .. }     => vec![*source, *dest],
            BotTask::ToDropoff { dest, .. }            => vec![*dest],
            BotTask::ToResort { cell }
            | BotTask::ToRest { cell }                 => vec![*cell],
        }
    }

    pub fn carried(&self) -> Option<&Item> {
        match self {
            BotTask::ToDropoff { carried, .. } => carried.as_ref(),
            _ => None,
        }
    }
}

// ── BotState ──────────────────────────────────────────────────────────────────

/// Coarse label of a [`BotTask`], for display and statistics.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BotState {
    Idle,
    MovingToPickup,
    MovingToDropoff,
    MovingToResortTarget,
    MovingToRest,
}

impl BotState {
    pub fn as_str(self) -> &'static str {
        match self {
            BotState::Idle                 => "idle",
            BotState::MovingToPickup       => "moving_to_pickup",
            BotState::MovingToDropoff      => "moving_to_dropoff",
            BotState::MovingToResortTarget => "moving_to_resort_target",
            BotState::MovingToRest         => "moving_to_rest",
        }
    }
}

impl fmt::Display for BotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Abandoned ─────────────────────────────────────────────────────────────────

/// Cargo a bot was carrying when its task was cancelled.  The caller owns it
/// now and must put it somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abandoned {
    pub item:   Item,
    /// Where the item was picked up.
    pub source: Coord,
}

// ── BotEvent ──────────────────────────────────────────────────────────────────

/// Something a bot did to the grid during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotEvent {
    /// Arrived at a pickup cell.  `item_code` is `None` if nothing was there.
    PickedUp { bot: BotId, cell: Coord, item_code: Option<String> },

    /// Finished a delivery.  `item_code` is `None` for an empty-handed finish.
    Delivered { bot: BotId, cell: Coord, item_code: Option<String> },

    /// The drop-off cell was full; the bot is now heading for `to` instead.
    Redirected { bot: BotId, from: Coord, to: Coord },

    /// Finished a resort at `cell`.
    Resorted { bot: BotId, cell: Coord, outcome: ResortOutcome },

    /// Reached its resting cell and went idle.
    Parked { bot: BotId, cell: Coord },
}

impl BotEvent {
    pub fn bot(&self) -> BotId {
        match self {
            BotEvent::PickedUp { bot, .. }
            | BotEvent::Delivered { bot, .. }
            | BotEvent::Redirected { bot, .. }
            | BotEvent::Resorted { bot, .. }
            | BotEvent::Parked { bot, .. } => *bot,
        }
    }
}
