//! Grid geometry: discrete cell coordinates and continuous positions.
//!
//! All distances are in **grid units** (one cell = 1.0).  `Coord` addresses a
//! cell; `Point` is where a bot actually is while it travels between cell
//! centres.  A bot "occupies" the cell its position rounds to.

use std::fmt;

// ── Coord ─────────────────────────────────────────────────────────────────────

/// Integer grid coordinate of a cell.  `x` is the column, `y` the row.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan (L1) distance: the exact path length on an obstacle-free
    /// 4-connected grid.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four axis-aligned neighbours in expansion order: +x, −x, +y, −y.
    #[inline]
    pub fn neighbors4(self) -> [Coord; 4] {
        [
            Coord::new(self.x + 1, self.y),
            Coord::new(self.x - 1, self.y),
            Coord::new(self.x, self.y + 1),
            Coord::new(self.x, self.y - 1),
        ]
    }

    /// `true` if `other` is exactly one step away along one axis.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Coord::new(x, y)
    }
}

// ── Point ─────────────────────────────────────────────────────────────────────

/// Continuous 2-D position in grid units.
///
/// `f32` gives far more precision than a warehouse floor needs; bots always
/// snap exactly onto cell centres when they reach a waypoint, so error never
/// accumulates across hops.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// The cell this point is considered to occupy.
    #[inline]
    pub fn rounded(self) -> Coord {
        Coord::new(self.x.round() as i32, self.y.round() as i32)
    }

    /// Move `step` units towards `target`.  The caller guarantees
    /// `0 < step < distance(target)`; overshoot handling lives with the caller.
    #[inline]
    pub fn advanced_towards(self, target: Point, step: f32) -> Point {
        let d = self.distance(target);
        if d == 0.0 {
            return self;
        }
        Point::new(
            self.x + (target.x - self.x) / d * step,
            self.y + (target.y - self.y) / d * step,
        )
    }
}

impl From<Coord> for Point {
    #[inline]
    fn from(c: Coord) -> Self {
        Point::new(c.x as f32, c.y as f32)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Bounds ────────────────────────────────────────────────────────────────────

/// Dimensions of the grid.  Valid coordinates are `0..width` × `0..height`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.x >= 0 && c.y >= 0 && (c.x as u32) < self.width && (c.y as u32) < self.height
    }

    /// Number of cells.
    #[inline]
    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Row-major index of `c`, or `None` when out of bounds.
    #[inline]
    pub fn index_of(self, c: Coord) -> Option<usize> {
        self.contains(c)
            .then(|| c.y as usize * self.width as usize + c.x as usize)
    }

    /// Inverse of [`index_of`](Self::index_of).
    #[inline]
    pub fn coord_of(self, index: usize) -> Coord {
        let w = self.width as usize;
        Coord::new((index % w) as i32, (index / w) as i32)
    }
}
