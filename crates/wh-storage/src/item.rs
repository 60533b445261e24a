//! Items and their preference score.

use std::fmt;

use wh_core::{SimRng, seed_for_code};

/// Lowest preference an item can have.
pub const PREFERENCE_MIN: u8 = 1;
/// Highest preference an item can have.
pub const PREFERENCE_MAX: u8 = 100;
/// Largest change a single evolution step applies, in either direction.
const PREFERENCE_DRIFT: i16 = 5;

/// A stored good: an immutable identity code and a mutable preference.
///
/// Preference drives stack ordering (higher on top) and which item the
/// dispatcher ships out next.  It always stays within
/// `PREFERENCE_MIN..=PREFERENCE_MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    code:       String,
    preference: u8,
}

impl Item {
    /// Create an item whose starting preference is derived from its code.
    ///
    /// The same code always yields the same starting preference.
    pub fn new(code: impl Into<String>) -> Self {
        let code = code.into();
        let preference = SimRng::new(seed_for_code(&code)).gen_range(PREFERENCE_MIN..=PREFERENCE_MAX);
        Self { code, preference }
    }

    /// Create an item with an explicit starting preference (clamped).
    pub fn with_preference(code: impl Into<String>, preference: u8) -> Self {
        Self {
            code:       code.into(),
            preference: preference.clamp(PREFERENCE_MIN, PREFERENCE_MAX),
        }
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn preference(&self) -> u8 {
        self.preference
    }

    /// Override the preference (clamped).
    pub fn set_preference(&mut self, preference: u8) {
        self.preference = preference.clamp(PREFERENCE_MIN, PREFERENCE_MAX);
    }

    /// One evolution step: nudge preference by a random delta in
    /// `-5..=5`, clamped to the valid range.
    pub fn update_preference(&mut self, rng: &mut SimRng) {
        let delta: i16 = rng.gen_range(-PREFERENCE_DRIFT..=PREFERENCE_DRIFT);
        let next = (self.preference as i16 + delta)
            .clamp(PREFERENCE_MIN as i16, PREFERENCE_MAX as i16);
        self.preference = next as u8;
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.code, self.preference)
    }
}
