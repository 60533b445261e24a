//! Strongly typed, zero-cost identifier wrappers.
//!
//! IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  Bots are updated in ascending id
//! order within a tick, so the ordering is load-bearing for tie-breaks.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of a bot in the fleet.  Assigned sequentially from 0 and never
    /// reused while the simulation runs.
    pub struct BotId(u32);
}

impl BotId {
    /// Short human label in the style of the warehouse floor: `a`, `b`, … `z`,
    /// then `aa`, `ab`, …
    pub fn label(self) -> String {
        let mut n = self.0 as u64;
        let mut out = Vec::new();
        loop {
            out.push(b'a' + (n % 26) as u8);
            if n < 26 {
                break;
            }
            n = n / 26 - 1;
        }
        out.reverse();
        String::from_utf8_lossy(&out).into_owned()
    }
}
