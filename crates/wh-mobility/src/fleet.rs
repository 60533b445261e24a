//! The fleet: every bot plus the shared pathfinder and motion limits.

use tracing::debug;

use wh_core::{Bounds, BotId, Coord, SimRng};
use wh_spatial::Pathfinder;
use wh_storage::Grid;

use crate::{Abandoned, Bot, BotEvent, MobilityError, MobilityResult, MotionParams, Navigator, RosterView};

/// All bots in the warehouse.
///
/// # Type parameter
///
/// `P` is the search used for every plan (e.g. [`wh_spatial::AStarPathfinder`]).
/// Swap it at compile time for a different algorithm with no runtime
/// overhead.
///
/// Bot ids equal their index in the fleet.  Bots are only ever added at the
/// end and removed from the end, so ids stay dense.
pub struct Fleet<P: Pathfinder> {
    pathfinder: P,
    bots:       Vec<Bot>,
    params:     MotionParams,
}

impl<P: Pathfinder> Fleet<P> {
    pub fn new(pathfinder: P, params: MotionParams) -> Self {
        Self { pathfinder, bots: Vec::new(), params }
    }

    // ── Membership ────────────────────────────────────────────────────────

    /// Place a new idle bot at `start`.
    ///
    /// # Errors
    ///
    /// [`MobilityError::OutOfBounds`] if `start` is off the grid, or
    /// [`MobilityError::Occupied`] if another bot already stands there.
    pub fn add_bot(&mut self, start: Coord, bounds: Bounds) -> MobilityResult<BotId> {
        if !bounds.contains(start) {
            return Err(MobilityError::OutOfBounds(start));
        }
        if self.bots.iter().any(|b| b.cell() == start) {
            return Err(MobilityError::Occupied(start));
        }
        let id = BotId(self.bots.len() as u32);
        self.bots.push(Bot::new(id, start));
        debug!(bot = %id, %start, "bot added");
        Ok(id)
    }

    /// Remove the highest-id bot.  Returns its id and any cargo it held.
    pub fn remove_last(&mut self) -> Option<(BotId, Option<Abandoned>)> {
        let mut bot = self.bots.pop()?;
        let cargo = bot.cancel();
        debug!(bot = %bot.id(), "bot removed");
        Some((bot.id(), cargo))
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn len(&self) -> usize {
        self.bots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    #[inline]
    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    pub fn bot(&self, id: BotId) -> MobilityResult<&Bot> {
        self.bots.get(id.index()).ok_or(MobilityError::BotNotFound(id))
    }

    /// Ids of idle bots, ascending.
    pub fn idle_bots(&self) -> Vec<BotId> {
        self.bots.iter().filter(|b| b.is_idle()).map(Bot::id).collect()
    }

    /// Cells some busy bot is still going to touch.
    pub fn busy_targets(&self) -> Vec<Coord> {
        self.bots.iter().flat_map(|b| b.task().reserved_cells()).collect()
    }

    /// Snapshot of every bot's cell and next waypoint.
    pub fn roster(&self) -> RosterView {
        RosterView::from_bots(&self.bots)
    }

    // ── Assignment ────────────────────────────────────────────────────────

    /// Send `bot` to fetch an item from `source` and drop it on `dest`.
    ///
    /// # Errors
    ///
    /// [`MobilityError::BotNotFound`] or [`MobilityError::OutOfBounds`].  The
    /// bot is untouched on error.
    pub fn assign_delivery(
        &mut self,
        bot:       BotId,
        source:    Coord,
        dest:      Coord,
        item_code: Option<String>,
        grid:      &Grid,
    ) -> MobilityResult<Option<Abandoned>> {
        let bounds = grid.bounds();
        check_in_bounds(bounds, source)?;
        check_in_bounds(bounds, dest)?;
        let roster = self.roster();
        let nav = Navigator::new(&self.pathfinder, bounds, &roster);
        let target = self.bots.get_mut(bot.index()).ok_or(MobilityError::BotNotFound(bot))?;
        debug!(%bot, %source, %dest, item = ?item_code, "delivery assigned");
        Ok(target.assign_delivery(source, dest, item_code, &nav))
    }

    /// Send `bot` to restack `cell`.
    ///
    /// # Errors
    ///
    /// [`MobilityError::BotNotFound`] or [`MobilityError::OutOfBounds`].
    pub fn assign_resort(&mut self, bot: BotId, cell: Coord, grid: &Grid) -> MobilityResult<Option<Abandoned>> {
        let bounds = grid.bounds();
        check_in_bounds(bounds, cell)?;
        let roster = self.roster();
        let nav = Navigator::new(&self.pathfinder, bounds, &roster);
        let target = self.bots.get_mut(bot.index()).ok_or(MobilityError::BotNotFound(bot))?;
        debug!(%bot, %cell, "resort assigned");
        Ok(target.assign_resort(cell, &nav))
    }

    /// Send `bot` to wait on `cell`.
    ///
    /// # Errors
    ///
    /// [`MobilityError::BotNotFound`] or [`MobilityError::OutOfBounds`].
    pub fn assign_park(&mut self, bot: BotId, cell: Coord, grid: &Grid) -> MobilityResult<Option<Abandoned>> {
        let bounds = grid.bounds();
        check_in_bounds(bounds, cell)?;
        let roster = self.roster();
        let nav = Navigator::new(&self.pathfinder, bounds, &roster);
        let target = self.bots.get_mut(bot.index()).ok_or(MobilityError::BotNotFound(bot))?;
        debug!(%bot, %cell, "park assigned");
        Ok(target.assign_park(cell, &nav))
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance every bot by `dt` seconds in ascending id order.
    ///
    /// The roster is built once, then each bot's entry is refreshed right
    /// after it moves so later bots see the new position.
    pub fn update_all(&mut self, dt: f32, grid: &mut Grid, rng: &mut SimRng) -> Vec<BotEvent> {
        let mut roster = self.roster();
        let mut events = Vec::new();
        for bot in &mut self.bots {
            let nav = Navigator::new(&self.pathfinder, grid.bounds(), &roster);
            let event = bot.update(dt, grid, &nav, &self.params, rng);
            roster.refresh(bot);
            events.extend(event);
        }
        events
    }
}

fn check_in_bounds(bounds: Bounds, c: Coord) -> MobilityResult<()> {
    if bounds.contains(c) { Ok(()) } else { Err(MobilityError::OutOfBounds(c)) }
}
