//! Fluent builder for constructing a [`Sim`].

use tracing::info;

use wh_core::{Coord, SimRng, WarehouseConfig};
use wh_mobility::{Fleet, MotionParams};
use wh_spatial::Pathfinder;
use wh_storage::{Grid, Item};

use crate::{Dispatcher, Sim, SimResult, SimStats};

/// Fluent builder for [`Sim<D, P>`].
///
/// # Required inputs
///
/// - [`WarehouseConfig`]: grid layout, motion limits, timing, seed
/// - `D: Dispatcher`: the assignment policy (e.g. [`crate::GreedyDispatcher`])
/// - `P: Pathfinder`: the search (e.g. [`wh_spatial::AStarPathfinder`])
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default             |
/// |------------------------|---------------------|
/// | `.bots(starts)`        | No bots             |
/// | `.stock(items)`        | Empty floor         |
/// | `.snapshot_every(n)`   | 0 (no snapshots)    |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, GreedyDispatcher::new(), AStarPathfinder)
///     .bots([Coord::new(0, 9), Coord::new(1, 9)])
///     .stock([(Coord::new(0, 0), Item::new("X1"))])
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<D: Dispatcher, P: Pathfinder> {
    config:            WarehouseConfig,
    dispatcher:        D,
    pathfinder:        P,
    starts:            Vec<Coord>,
    stock:             Vec<(Coord, Item)>,
    snapshot_interval: u64,
}

impl<D: Dispatcher, P: Pathfinder> SimBuilder<D, P> {
    pub fn new(config: WarehouseConfig, dispatcher: D, pathfinder: P) -> Self {
        Self {
            config,
            dispatcher,
            pathfinder,
            starts:            Vec::new(),
            stock:             Vec::new(),
            snapshot_interval: 0,
        }
    }

    /// Starting cells for the fleet.  Bot ids follow the order given.
    pub fn bots(mut self, starts: impl IntoIterator<Item = Coord>) -> Self {
        self.starts.extend(starts);
        self
    }

    /// Items placed on the floor before tick 0, pushed in the order given.
    pub fn stock(mut self, items: impl IntoIterator<Item = (Coord, Item)>) -> Self {
        self.stock.extend(items);
        self
    }

    /// Call [`SimObserver::on_snapshot`][crate::SimObserver::on_snapshot]
    /// every `ticks` ticks.  Zero disables snapshots.
    pub fn snapshot_every(mut self, ticks: u64) -> Self {
        self.snapshot_interval = ticks;
        self
    }

    /// Validate the configuration, lay out the floor, place stock and bots,
    /// and return a ready-to-run [`Sim`].
    ///
    /// # Errors
    ///
    /// - [`SimError::Core`][crate::SimError::Core] for an invalid config.
    /// - [`SimError::Storage`][crate::SimError::Storage] for stock off the
    ///   grid or beyond a cell's capacity.
    /// - [`SimError::Mobility`][crate::SimError::Mobility] for a start cell
    ///   off the grid or shared by two bots.
    pub fn build(self) -> SimResult<Sim<D, P>> {
        self.config.validate()?;

        let mut grid = Grid::new(&self.config);
        for (at, item) in self.stock {
            grid.add_item(at, item)?;
        }

        let mut fleet = Fleet::new(self.pathfinder, MotionParams::from_config(&self.config));
        for start in self.starts {
            fleet.add_bot(start, grid.bounds())?;
        }

        let clock = self.config.make_clock();
        let evolution_interval = clock.ticks_for_secs(self.config.preference_update_interval_secs);
        info!(
            width = grid.width(),
            height = grid.height(),
            bots = fleet.len(),
            items = grid.total_items(),
            seed = self.config.seed,
            "simulation built"
        );

        Ok(Sim {
            rng: SimRng::new(self.config.seed),
            clock,
            grid,
            fleet,
            dispatcher: self.dispatcher,
            stats: SimStats::default(),
            evolution_interval,
            snapshot_interval: self.snapshot_interval,
            config: self.config,
        })
    }
}
