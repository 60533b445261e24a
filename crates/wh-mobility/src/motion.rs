//! Speed control.

use wh_core::WarehouseConfig;

/// Kinematic limits shared by every bot in a fleet.
///
/// Rates are in cells/s².  Acceleration and deceleration are linear: a bot
/// reaches `max_speed` in `accel_time` seconds from standstill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionParams {
    pub max_speed:       f32,
    pub accel_rate:      f32,
    pub decel_rate:      f32,
    pub min_final_speed: f32,
}

impl MotionParams {
    pub fn from_config(config: &WarehouseConfig) -> Self {
        Self {
            max_speed:       config.max_speed,
            accel_rate:      config.max_speed / config.accel_time,
            decel_rate:      config.max_speed / config.decel_time,
            min_final_speed: config.min_final_speed,
        }
    }

    /// Speed after one step of `dt` seconds.
    ///
    /// Accelerate (capped at `max_speed`), then on the final hop decelerate,
    /// never below `min_final_speed` so the bot still reaches its goal.
    pub fn next_speed(&self, speed: f32, dt: f32, final_hop: bool) -> f32 {
        let mut next = speed;
        if next < self.max_speed {
            next = (next + self.accel_rate * dt).min(self.max_speed);
        }
        if final_hop {
            let floor = self.min_final_speed.min(self.max_speed);
            next = (next - self.decel_rate * dt).max(floor);
        }
        next
    }
}

impl Default for MotionParams {
    fn default() -> Self {
        Self::from_config(&WarehouseConfig::default())
    }
}
