//! Simulated time.
//!
//! The tick counter is the only clock.  Seconds are derived from it
//! (`elapsed = tick * tick_secs`), so "every 60 s" checks are integer modulo
//! tests on ticks and never drift.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Ticks since the run started.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per tick (the integration step `dt`).
    pub tick_secs: f32,
    /// The current tick, advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_secs: f32) -> Self {
        Self { tick_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_secs as f64
    }

    /// How many ticks span `secs` seconds?  Rounds up and never returns 0, so
    /// an interval shorter than one tick fires every tick.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f32) -> u64 {
        ((secs / self.tick_secs).ceil() as u64).max(1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} s)", self.current_tick, self.elapsed_secs())
    }
}
