//! A single bot: continuous position, planned path, and task state machine.

use std::collections::VecDeque;

use tracing::{debug, info, trace, warn};

use wh_core::{BotId, Coord, Point, SimRng};
use wh_spatial::Pathfinder;
use wh_storage::{Grid, Item, StorageError};

use crate::{Abandoned, BotEvent, BotState, BotTask, MotionParams, Navigator};

/// One warehouse bot.
///
/// `pos` is continuous (grid units); the bot occupies the cell `pos` rounds
/// to.  `path` holds the waypoints still to visit, excluding the current
/// cell.  `goal` is remembered separately so a bot whose path was lost (no
/// route last time it planned) can retry.
#[derive(Debug, Clone)]
pub struct Bot {
    id:    BotId,
    pos:   Point,
    goal:  Option<Coord>,
    path:  VecDeque<Coord>,
    task:  BotTask,
    /// Cells per second.
    speed: f32,
}

impl Bot {
    /// An idle bot standing still at the centre of `start`.
    pub fn new(id: BotId, start: Coord) -> Self {
        Self {
            id,
            pos: Point::from(start),
            goal: None,
            path: VecDeque::new(),
            task: BotTask::Idle,
            speed: 0.0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> BotId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// The cell this bot occupies.
    #[inline]
    pub fn cell(&self) -> Coord {
        self.pos.rounded()
    }

    #[inline]
    pub fn goal(&self) -> Option<Coord> {
        self.goal
    }

    pub fn path(&self) -> impl ExactSizeIterator<Item = Coord> + '_ {
        self.path.iter().copied()
    }

    #[inline]
    pub fn next_waypoint(&self) -> Option<Coord> {
        self.path.front().copied()
    }

    #[inline]
    pub fn task(&self) -> &BotTask {
        &self.task
    }

    #[inline]
    pub fn state(&self) -> BotState {
        self.task.state()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.task, BotTask::Idle)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn carried(&self) -> Option<&Item> {
        self.task.carried()
    }

    // ── Assignment ────────────────────────────────────────────────────────

    /// Fetch an item from `source` and drop it on `dest`.  With no
    /// `item_code` the top of `source` is taken.
    ///
    /// Any current task is cancelled; cargo it held is returned.
    pub fn assign_delivery<P: Pathfinder + ?Sized>(
        &mut self,
        source:    Coord,
        dest:      Coord,
        item_code: Option<String>,
        nav:       &Navigator<'_, P>,
    ) -> Option<Abandoned> {
        let abandoned = self.cancel();
        self.task = BotTask::ToPickup { source, dest, item_code };
        self.plan_to(source, nav);
        abandoned
    }

    /// Go to `cell` and restack it by preference.
    ///
    /// Any current task is cancelled; cargo it held is returned.
    pub fn assign_resort<P: Pathfinder + ?Sized>(
        &mut self,
        cell: Coord,
        nav:  &Navigator<'_, P>,
    ) -> Option<Abandoned> {
        let abandoned = self.cancel();
        self.task = BotTask::ToResort { cell };
        self.plan_to(cell, nav);
        abandoned
    }

    /// Walk to `cell` and go idle there.
    ///
    /// Any current task is cancelled; cargo it held is returned.
    pub fn assign_park<P: Pathfinder + ?Sized>(
        &mut self,
        cell: Coord,
        nav:  &Navigator<'_, P>,
    ) -> Option<Abandoned> {
        let abandoned = self.cancel();
        self.task = BotTask::ToRest { cell };
        self.plan_to(cell, nav);
        abandoned
    }

    /// Drop the current task and stop where the bot is.
    pub fn cancel(&mut self) -> Option<Abandoned> {
        self.goal = None;
        self.path.clear();
        match std::mem::take(&mut self.task) {
            BotTask::ToDropoff { source, carried: Some(item), .. } => {
                warn!(bot = %self.id, item = %item, %source, "task cancelled while carrying");
                Some(Abandoned { item, source })
            }
            _ => None,
        }
    }

    // ── Planning ──────────────────────────────────────────────────────────

    fn plan_to<P: Pathfinder + ?Sized>(&mut self, goal: Coord, nav: &Navigator<'_, P>) {
        self.goal = Some(goal);
        self.replan(nav);
    }

    fn replan<P: Pathfinder + ?Sized>(&mut self, nav: &Navigator<'_, P>) {
        self.path.clear();
        let Some(goal) = self.goal else { return };
        let start = self.cell();
        match nav.plan(self.id, start, goal) {
            Ok(waypoints) => {
                self.path.extend(waypoints);
                // Mid-hop inside the goal cell: finish the hop first.
                if self.path.is_empty() && self.pos != Point::from(start) {
                    self.path.push_back(start);
                }
                debug!(bot = %self.id, %start, %goal, hops = self.path.len(), "planned");
            }
            Err(err) => {
                debug!(bot = %self.id, %start, %goal, %err, "no path, holding");
            }
        }
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance this bot by `dt` seconds.
    ///
    /// Returns the event for whatever the bot did to the grid this tick, if
    /// anything.
    pub fn update<P: Pathfinder + ?Sized>(
        &mut self,
        dt:     f32,
        grid:   &mut Grid,
        nav:    &Navigator<'_, P>,
        params: &MotionParams,
        rng:    &mut SimRng,
    ) -> Option<BotEvent> {
        if self.path.is_empty() {
            let goal = self.goal?;
            if self.pos == Point::from(goal) {
                return self.arrive(grid, nav, rng);
            }
            self.replan(nav);
            if self.path.is_empty() {
                return None;
            }
        }

        let next = self.next_waypoint()?;
        let roster = nav.roster();
        if roster.is_occupied_by_other(self.id, next) || roster.is_claimed_by_other(self.id, next) {
            debug!(bot = %self.id, %next, "next waypoint taken, holding");
            self.speed = 0.0;
            self.replan(nav);
            return None;
        }

        self.speed = params.next_speed(self.speed, dt, self.path.len() == 1);
        let target = Point::from(next);
        let distance = self.pos.distance(target);
        let step = self.speed * dt;

        if step >= distance {
            self.pos = target;
            self.path.pop_front();
            trace!(bot = %self.id, at = %next, speed = self.speed, "reached waypoint");
            if self.path.is_empty() {
                return self.arrive(grid, nav, rng);
            }
        } else {
            self.pos = self.pos.advanced_towards(target, step);
        }
        None
    }

    // ── Arrival ───────────────────────────────────────────────────────────

    fn arrive<P: Pathfinder + ?Sized>(
        &mut self,
        grid: &mut Grid,
        nav:  &Navigator<'_, P>,
        rng:  &mut SimRng,
    ) -> Option<BotEvent> {
        match std::mem::take(&mut self.task) {
            BotTask::Idle => {
                self.finish();
                None
            }

            BotTask::ToPickup { source, dest, item_code } => {
                let carried = grid.cell_mut(source).and_then(|cell| match item_code.as_deref() {
                    Some(code) => cell.take_item(code),
                    None => cell.remove_item(),
                });
                let picked = carried.as_ref().map(|it| it.code().to_owned());
                match &picked {
                    Some(code) => debug!(bot = %self.id, %source, item = %code, "picked up"),
                    None => debug!(bot = %self.id, %source, "nothing to pick up"),
                }
                self.task = BotTask::ToDropoff { source, dest, carried };
                self.plan_to(dest, nav);
                Some(BotEvent::PickedUp { bot: self.id, cell: source, item_code: picked })
            }

            BotTask::ToDropoff { dest, carried: None, .. } => {
                self.finish();
                info!(bot = %self.id, %dest, "delivery finished empty-handed");
                Some(BotEvent::Delivered { bot: self.id, cell: dest, item_code: None })
            }

            BotTask::ToDropoff { source, dest, carried: Some(item) } => {
                let code = item.code().to_owned();
                let rejected = match grid.cell_mut(dest) {
                    Some(cell) => cell.add_item(item).err().and_then(StorageError::into_item),
                    None => Some(item),
                };
                let Some(item) = rejected else {
                    self.finish();
                    info!(bot = %self.id, %dest, item = %code, "delivered");
                    return Some(BotEvent::Delivered { bot: self.id, cell: dest, item_code: Some(code) });
                };

                match grid.find_empty_storage_cell(&[dest], rng) {
                    Some(to) => {
                        warn!(bot = %self.id, from = %dest, %to, item = %code, "drop-off full, redirecting");
                        self.task = BotTask::ToDropoff { source, dest: to, carried: Some(item) };
                        self.plan_to(to, nav);
                        Some(BotEvent::Redirected { bot: self.id, from: dest, to })
                    }
                    None => {
                        // Stay put with the goal kept; arrival is retried next tick.
                        debug!(bot = %self.id, %dest, item = %code, "drop-off full, waiting for space");
                        self.task = BotTask::ToDropoff { source, dest, carried: Some(item) };
                        None
                    }
                }
            }

            BotTask::ToResort { cell } => {
                let result = grid.resort(cell, rng);
                self.finish();
                match result {
                    Ok(outcome) => {
                        info!(
                            bot = %self.id,
                            %cell,
                            moved = outcome.moved,
                            complete = outcome.complete,
                            "resort finished"
                        );
                        Some(BotEvent::Resorted { bot: self.id, cell, outcome })
                    }
                    Err(err) => {
                        warn!(bot = %self.id, %cell, %err, "resort failed");
                        None
                    }
                }
            }

            BotTask::ToRest { cell } => {
                self.finish();
                debug!(bot = %self.id, %cell, "parked");
                Some(BotEvent::Parked { bot: self.id, cell })
            }
        }
    }

    fn finish(&mut self) {
        self.task = BotTask::Idle;
        self.goal = None;
        self.path.clear();
    }
}
