//! The `Sim` struct and its tick loop.

use tracing::{debug, error, info, warn};

use wh_core::{BotId, Coord, SimClock, SimRng, Tick, WarehouseConfig};
use wh_mobility::{Abandoned, BotEvent, Fleet};
use wh_spatial::Pathfinder;
use wh_storage::{Cell, CellKind, Grid, Item};

use crate::{Assignment, DispatchContext, Dispatcher, SimError, SimObserver, SimResult};

// ── SimStats ──────────────────────────────────────────────────────────────────

/// Running totals collected from assignments and bot events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimStats {
    /// Assignments the fleet accepted.
    pub assignments:          u64,
    /// Assignments rejected (unknown bot, coordinate off the grid).
    pub rejected_assignments: u64,
    /// Pickups that actually lifted an item.
    pub pickups:              u64,
    /// Items put down at their drop-off.
    pub deliveries:           u64,
    /// Deliveries that landed on an outbound cell.
    pub shipped:              u64,
    pub redirects:            u64,
    pub resorts:              u64,
    /// Idle bots that walked off a dock or a targeted cell.
    pub parks:                u64,
    pub evolutions:           u64,
    /// Cargo put back on the floor after its task was cancelled.
    pub restocked:            u64,
    /// Cancelled cargo that found no cell with room.
    pub dropped:              u64,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<D, P>` owns the whole warehouse and drives the tick loop:
///
/// 1. **Evolution**: every `preference_update_interval_secs` of simulated
///    time, each item's preference drifts.
/// 2. **Dispatch**: the [`Dispatcher`] sees the floor and the idle bots and
///    returns [`Assignment`]s.
/// 3. **Apply** (in the order returned): each assignment is handed to the
///    fleet.  Rejections are logged and skipped; cargo a reassigned bot was
///    carrying goes back on the floor.
/// 4. **Move**: every bot advances by `dt` in ascending id order, picking up,
///    dropping off and resorting as it arrives.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<D: Dispatcher, P: Pathfinder> {
    pub config: WarehouseConfig,

    /// Tracks the current tick; `tick_secs` is the integration step.
    pub clock: SimClock,

    pub grid: Grid,

    pub fleet: Fleet<P>,

    /// The assignment policy.  Public so callers can feed it requests
    /// between ticks.
    pub dispatcher: D,

    /// The single RNG every random choice in the run draws from.
    pub rng: SimRng,

    pub stats: SimStats,

    /// Ticks between preference evolution passes (at least 1).
    pub(crate) evolution_interval: u64,

    /// Ticks between `on_snapshot` calls; 0 disables snapshots.
    pub(crate) snapshot_interval: u64,
}

impl<D: Dispatcher, P: Pathfinder> Sim<D, P> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            ticks = self.config.total_ticks,
            bots = self.fleet.len(),
            items = self.grid.total_items(),
            "simulation started"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        info!(clock = %self.clock, stats = ?self.stats, "simulation finished");
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and for callers that inject work between ticks.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let events = self.process_tick(now)?;
        observer.on_tick_end(now, &events);
        if self.snapshot_interval > 0 && now.0.is_multiple_of(self.snapshot_interval) {
            observer.on_snapshot(now, &self.grid, self.fleet.bots());
        }
        self.clock.advance();
        Ok(())
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<Vec<BotEvent>> {
        // ── Phase 1: preference evolution ─────────────────────────────────
        let evolved = now.0 > 0 && now.0.is_multiple_of(self.evolution_interval);
        if evolved {
            self.grid.evolve_preferences(&mut self.rng);
            self.stats.evolutions += 1;
            debug!(tick = %now, "preferences evolved");
        }

        // ── Phase 2: dispatch ─────────────────────────────────────────────
        let idle = self.fleet.idle_bots();
        let cells: Vec<Coord> = self.fleet.bots().iter().map(|b| b.cell()).collect();
        let next: Vec<Coord> = self.fleet.bots().iter().filter_map(|b| b.next_waypoint()).collect();
        let busy = self.fleet.busy_targets();
        let ctx = DispatchContext {
            tick:                now,
            grid:                &self.grid,
            idle:                &idle,
            bot_cells:           &cells,
            next_cells:          &next,
            busy_targets:        &busy,
            preferences_evolved: evolved,
        };
        let assignments = self.dispatcher.dispatch(&ctx, &mut self.rng);

        // ── Phase 3: apply ────────────────────────────────────────────────
        for assignment in assignments {
            self.apply(assignment);
        }

        // ── Phase 4: move ─────────────────────────────────────────────────
        let dt = self.clock.tick_secs;
        let events = self.fleet.update_all(dt, &mut self.grid, &mut self.rng);
        self.record(&events);
        Ok(events)
    }

    fn apply(&mut self, assignment: Assignment) {
        let (bot, result) = match assignment {
            Assignment::Delivery { bot, source, dest, item_code } => {
                (bot, self.fleet.assign_delivery(bot, source, dest, item_code, &self.grid))
            }
            Assignment::Resort { bot, cell } => (bot, self.fleet.assign_resort(bot, cell, &self.grid)),
            Assignment::Park { bot, cell } => (bot, self.fleet.assign_park(bot, cell, &self.grid)),
        };
        match result {
            Ok(abandoned) => {
                self.stats.assignments += 1;
                if let Some(cargo) = abandoned {
                    self.restock(cargo);
                }
            }
            Err(err) => {
                self.stats.rejected_assignments += 1;
                warn!(%bot, %err, "assignment rejected");
            }
        }
    }

    fn record(&mut self, events: &[BotEvent]) {
        for event in events {
            match event {
                BotEvent::PickedUp { item_code: Some(_), .. } => self.stats.pickups += 1,
                BotEvent::PickedUp { item_code: None, .. } => {}
                BotEvent::Delivered { cell, item_code: Some(_), .. } => {
                    self.stats.deliveries += 1;
                    if self.grid.cell(*cell).is_some_and(|c| c.kind() == CellKind::Outbound) {
                        self.stats.shipped += 1;
                    }
                }
                BotEvent::Delivered { item_code: None, .. } => {}
                BotEvent::Redirected { .. } => self.stats.redirects += 1,
                BotEvent::Resorted { .. } => self.stats.resorts += 1,
                BotEvent::Parked { .. } => self.stats.parks += 1,
            }
        }
    }

    // ── Floor helpers ─────────────────────────────────────────────────────

    /// Put an arriving item on a random inbound cell.
    ///
    /// # Errors
    ///
    /// [`SimError::NoRoom`] if the grid has no inbound cells.
    pub fn receive_inbound(&mut self, item: Item) -> SimResult<Coord> {
        let docks = self.grid.coords_of_kind(CellKind::Inbound);
        let Some(&at) = self.rng.choose(&docks) else {
            return Err(SimError::NoRoom(item.code().to_owned()));
        };
        debug!(%at, %item, "inbound received");
        self.grid.add_item(at, item)?;
        Ok(at)
    }

    /// Put cancelled cargo back: on its source if that has room, else on a
    /// random storage cell with room, else on the first inbound cell, else on
    /// the first outbound cell.  Returns where it landed.
    ///
    /// A floor with no docks and every storage cell full has nowhere to put
    /// it; the item is logged and dropped rather than failing the tick.
    fn restock(&mut self, Abandoned { item, source }: Abandoned) -> Option<Coord> {
        let Some(to) = self.room_for(source) else {
            error!(%item, %source, "no room to restock cargo, item dropped");
            self.stats.dropped += 1;
            return None;
        };
        match self.grid.add_item(to, item) {
            Ok(()) => {
                info!(%to, "cargo restocked");
                self.stats.restocked += 1;
                Some(to)
            }
            Err(err) => {
                error!(%to, %err, "restock failed, item dropped");
                self.stats.dropped += 1;
                None
            }
        }
    }

    fn room_for(&mut self, preferred: Coord) -> Option<Coord> {
        if self.grid.cell(preferred).is_some_and(Cell::has_capacity) {
            return Some(preferred);
        }
        self.grid
            .find_empty_storage_cell(&[], &mut self.rng)
            .or_else(|| self.grid.coords_of_kind(CellKind::Inbound).first().copied())
            .or_else(|| self.grid.coords_of_kind(CellKind::Outbound).first().copied())
    }

    // ── Fleet helpers ─────────────────────────────────────────────────────

    /// Place a new idle bot at `start`.
    ///
    /// # Errors
    ///
    /// [`SimError::Mobility`] if `start` is off the grid or occupied.
    pub fn add_bot(&mut self, start: Coord) -> SimResult<BotId> {
        Ok(self.fleet.add_bot(start, self.grid.bounds())?)
    }

    /// Remove the highest-id bot, restocking anything it carried.  Returns
    /// `None` when the fleet is already empty.
    pub fn remove_last_bot(&mut self) -> Option<BotId> {
        let (id, cargo) = self.fleet.remove_last()?;
        if let Some(cargo) = cargo {
            self.restock(cargo);
        }
        Some(id)
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Items on the floor plus items bots are carrying.
    pub fn items_in_system(&self) -> usize {
        let carried = self.fleet.bots().iter().filter(|b| b.carried().is_some()).count();
        self.grid.total_items() + carried
    }

    #[inline]
    pub fn evolution_interval(&self) -> u64 {
        self.evolution_interval
    }
}
