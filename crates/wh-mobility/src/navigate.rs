//! Obstacle-aware planning on top of a [`Pathfinder`].

use tracing::debug;

use wh_core::{Bounds, BotId, Coord};
use wh_spatial::{GridPath, Pathfinder, SpatialError, SpatialResult};

use crate::RosterView;

/// Plans paths for one bot against a roster snapshot.
///
/// Planning is two-phase.  The dense phase treats both the cells of other
/// bots and their next waypoints as walls, which steers clear of bots about
/// to move.  If that leaves no route, the sparse phase retries with only the
/// cells bots currently stand on.
pub struct Navigator<'a, P: ?Sized> {
    pathfinder: &'a P,
    bounds:     Bounds,
    roster:     &'a RosterView,
}

impl<'a, P: Pathfinder + ?Sized> Navigator<'a, P> {
    pub fn new(pathfinder: &'a P, bounds: Bounds, roster: &'a RosterView) -> Self {
        Self { pathfinder, bounds, roster }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[inline]
    pub fn roster(&self) -> &RosterView {
        self.roster
    }

    /// Waypoints from `start` (exclusive) to `goal` (inclusive) for `bot`.
    ///
    /// # Errors
    ///
    /// [`SpatialError::NoPath`] when neither phase finds a route, or
    /// [`SpatialError::OutOfBounds`] for an endpoint off the grid.
    pub fn plan(&self, bot: BotId, start: Coord, goal: Coord) -> SpatialResult<Vec<Coord>> {
        let dense = self.roster.obstacles(bot, goal, true);
        match self.pathfinder.find_path(self.bounds, start, goal, &dense) {
            Ok(path) => return Ok(path.into_waypoints()),
            Err(SpatialError::NoPath { .. }) => {
                debug!(%bot, %start, %goal, "dense plan failed, retrying around positions only");
            }
            Err(e) => return Err(e),
        }
        let sparse = self.roster.obstacles(bot, goal, false);
        self.pathfinder
            .find_path(self.bounds, start, goal, &sparse)
            .map(GridPath::into_waypoints)
    }
}
