//! Warehouse configuration.
//!
//! Every tunable the simulation core reads lives in [`WarehouseConfig`].  The
//! values are plain scalars with no cross-validation beyond positivity
//! ([`WarehouseConfig::validate`]).  Applications typically load one from
//! JSON (with the `serde` feature) and pass it to the simulation builder.

use crate::{Bounds, CoreError, CoreResult, SimClock, Tick};

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WarehouseConfig {
    /// Grid columns.
    pub grid_width: u32,

    /// Grid rows.
    pub grid_height: u32,

    /// Inbound cells along column 0, rows `0..inbound_cells`.
    pub inbound_cells: u32,

    /// Outbound cells along the last column, rows `0..outbound_cells`.
    pub outbound_cells: u32,

    /// Stack height limit of a storage cell.  Inbound/outbound are uncapped.
    pub max_items_per_cell: usize,

    /// Cruise speed in cells per second.
    pub max_speed: f32,

    /// Seconds to accelerate from standstill to `max_speed`.
    pub accel_time: f32,

    /// Seconds to decelerate from `max_speed` to standstill.
    pub decel_time: f32,

    /// Speed floor on the final approach so a bot never creeps asymptotically
    /// towards its last waypoint.
    pub min_final_speed: f32,

    /// Seconds between item preference evolution passes.
    pub preference_update_interval_secs: f32,

    /// Integration step `dt` in seconds.
    pub tick_secs: f32,

    /// Total ticks a full run simulates.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            grid_width:                      10,
            grid_height:                     10,
            inbound_cells:                   5,
            outbound_cells:                  5,
            max_items_per_cell:              20,
            max_speed:                       2.0,
            accel_time:                      0.1,
            decel_time:                      0.1,
            min_final_speed:                 0.5,
            preference_update_interval_secs: 60.0,
            tick_secs:                       1.0 / 60.0,
            total_ticks:                     60 * 60 * 5, // five simulated minutes
            seed:                            42,
        }
    }
}

impl WarehouseConfig {
    /// Reject non-positive dimensions, capacities, speeds and durations.
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(CoreError::Config(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.max_items_per_cell == 0 {
            return Err(CoreError::Config("max_items_per_cell must be positive".into()));
        }
        let positive = [
            ("max_speed", self.max_speed),
            ("accel_time", self.accel_time),
            ("decel_time", self.decel_time),
            ("min_final_speed", self.min_final_speed),
            ("preference_update_interval_secs", self.preference_update_interval_secs),
            ("tick_secs", self.tick_secs),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(CoreError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.grid_width, self.grid_height)
    }

    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_secs)
    }
}
