//! Deterministic simulation RNG and item-code seeding.
//!
//! # Determinism strategy
//!
//! The simulation owns exactly one [`SimRng`], seeded from
//! `WarehouseConfig::seed`, and passes `&mut SimRng` into every operation that
//! needs randomness (scratch-cell choice, preference drift, dispatch).  There
//! is no ambient global generator, so a run is fully reproducible from its
//! seed and its sequence of external commands.
//!
//! Item preferences are seeded independently of the run seed via
//! [`seed_for_code`], so the same item code always starts with the same
//! preference no matter when or where it enters the warehouse.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Stable seed derived from an item code.
///
/// The code is read as a base-36 number when it is one (`"ITEM042"` is valid
/// base-36).  Codes with other characters, or too long for a `u64`, fall back
/// to the sum of their character values.
pub fn seed_for_code(code: &str) -> u64 {
    u64::from_str_radix(code, 36)
        .unwrap_or_else(|_| code.chars().map(|c| c as u64).sum())
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// The run's random stream: scratch cells, put-away destinations, preference
/// drift and inbound docks all draw from it in tick order.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// A value drawn uniformly from `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A uniformly chosen element, or `None` for an empty slice.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }
}
