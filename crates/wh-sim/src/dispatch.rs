//! The `Dispatcher` trait: the extension point that decides which idle bot
//! does what.

use wh_core::{BotId, Coord, SimRng, Tick};
use wh_storage::Grid;

// ── Assignment ────────────────────────────────────────────────────────────────

/// A task a dispatcher wants started this tick.
///
/// Assignments are applied in the order returned.  One that fails validation
/// (unknown bot, coordinate off the grid) is logged and skipped; it never
/// aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assignment {
    /// Carry an item from `source` to `dest`.  `item_code: None` takes
    /// whatever is on top of `source` when the bot gets there.
    Delivery {
        bot:       BotId,
        source:    Coord,
        dest:      Coord,
        item_code: Option<String>,
    },

    /// Restack `cell` by preference.
    Resort {
        bot:  BotId,
        cell: Coord,
    },

    /// Walk to `cell` and wait there.
    Park {
        bot:  BotId,
        cell: Coord,
    },
}

impl Assignment {
    pub fn bot(&self) -> BotId {
        match self {
            Assignment::Delivery { bot, .. }
            | Assignment::Resort { bot, .. }
            | Assignment::Park { bot, .. } => *bot,
        }
    }
}

// ── DispatchContext ───────────────────────────────────────────────────────────

/// Read-only view of the warehouse handed to [`Dispatcher::dispatch`].
pub struct DispatchContext<'a> {
    pub tick: Tick,
    pub grid: &'a Grid,
    /// Idle bots, ascending id.
    pub idle: &'a [BotId],
    /// The cell every bot stands on, indexed by id.
    pub bot_cells: &'a [Coord],
    /// Next waypoints of bots that are on the move.
    pub next_cells: &'a [Coord],
    /// Cells that in-flight tasks are still going to touch.
    pub busy_targets: &'a [Coord],
    /// `true` on the tick a preference evolution pass just ran.
    pub preferences_evolved: bool,
}

// ── Dispatcher ────────────────────────────────────────────────────────────────

/// Pluggable task assignment policy.
///
/// Called once per tick, after preference evolution and before the fleet
/// moves.  The dispatcher may keep its own state (request queues and the
/// like), hence `&mut self`.  Any randomness must come from `rng` so runs stay
/// reproducible.
///
/// # Example
///
/// ```rust,ignore
/// struct ResortOnly;
///
/// impl Dispatcher for ResortOnly {
///     fn dispatch(&mut self, ctx: &DispatchContext<'_>, _rng: &mut SimRng) -> Vec<Assignment> {
///         ctx.grid
///             .cells_needing_resort()
///             .into_iter()
///             .zip(ctx.idle)
///             .map(|(cell, &bot)| Assignment::Resort { bot, cell })
///             .collect()
///     }
/// }
/// ```
pub trait Dispatcher: Send + 'static {
    fn dispatch(&mut self, ctx: &DispatchContext<'_>, rng: &mut SimRng) -> Vec<Assignment>;
}

/// A [`Dispatcher`] that never assigns anything.  Bots only move when tasks
/// are handed to the fleet directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDispatcher;

impl Dispatcher for NoopDispatcher {
    fn dispatch(&mut self, _ctx: &DispatchContext<'_>, _rng: &mut SimRng) -> Vec<Assignment> {
        vec![]
    }
}
