//! The set of cells a single search treats as impassable.

use rustc_hash::FxHashSet;

use wh_core::Coord;

/// Cells occupied or claimed by other bots for the duration of one search.
///
/// Built fresh for every plan.  The pathfinder never treats the goal as
/// blocked, so callers may insert it freely.
#[derive(Debug, Clone, Default)]
pub struct BlockedSet(FxHashSet<Coord>);

impl BlockedSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn insert(&mut self, c: Coord) -> bool {
        self.0.insert(c)
    }

    #[inline]
    pub fn remove(&mut self, c: Coord) -> bool {
        self.0.remove(&c)
    }

    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.0.contains(&c)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Coord> for BlockedSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        BlockedSet(iter.into_iter().collect())
    }
}

impl Extend<Coord> for BlockedSet {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
