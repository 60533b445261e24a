//! Simulation observer trait for progress reporting and data collection.

use wh_core::Tick;
use wh_mobility::{Bot, BotEvent};
use wh_storage::Grid;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: delivery counter
///
/// ```rust,ignore
/// struct Deliveries(usize);
///
/// impl SimObserver for Deliveries {
///     fn on_tick_end(&mut self, _tick: Tick, events: &[BotEvent]) {
///         self.0 += events.iter().filter(|e| matches!(e, BotEvent::Delivered { .. })).count();
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick with everything bots did to the grid,
    /// in ascending bot order.
    fn on_tick_end(&mut self, _tick: Tick, _events: &[BotEvent]) {}

    /// Called every `snapshot_interval` ticks (see
    /// [`SimBuilder::snapshot_every`][crate::SimBuilder::snapshot_every]).
    ///
    /// Read-only access to the floor and the fleet, so output writers can
    /// record state without the sim knowing any output format.
    fn on_snapshot(&mut self, _tick: Tick, _grid: &Grid, _bots: &[Bot]) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
