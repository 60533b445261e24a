//! A read-only view of the fleet used for planning and collision checks.
//!
//! Bots never look at each other directly.  The fleet builds a `RosterView`
//! once per tick and refreshes one entry after each bot moves, so a bot
//! updated later in the tick sees where earlier bots ended up.

use wh_core::{BotId, Coord, Point};
use wh_spatial::BlockedSet;

use crate::Bot;

/// One bot as the rest of the fleet sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RosterEntry {
    pub id:   BotId,
    /// The cell the bot's position rounds to.
    pub cell: Coord,
    /// The bot's next waypoint, if it has a path.
    pub next: Option<Coord>,
    /// `true` once the bot has left its cell centre, i.e. it is committed to
    /// the hop into `next`.
    pub moving: bool,
}

impl RosterEntry {
    pub fn of(bot: &Bot) -> Self {
        let cell = bot.cell();
        Self {
            id: bot.id(),
            cell,
            next: bot.next_waypoint(),
            moving: bot.pos() != Point::from(cell),
        }
    }

    /// The cell this bot is committed to entering, if any.
    #[inline]
    pub fn claim(&self) -> Option<Coord> {
        if self.moving { self.next } else { None }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RosterView {
    entries: Vec<RosterEntry>,
}

impl RosterView {
    pub fn from_bots<'a>(bots: impl IntoIterator<Item = &'a Bot>) -> Self {
        Self { entries: bots.into_iter().map(RosterEntry::of).collect() }
    }

    /// Replace the entry for `bot` with its current state.  Unknown bots are
    /// appended.
    pub fn refresh(&mut self, bot: &Bot) {
        let entry = RosterEntry::of(bot);
        match self.entries.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => *slot = entry,
            None => self.entries.push(entry),
        }
    }

    pub fn get(&self, id: BotId) -> Option<&RosterEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterEntry> + '_ {
        self.entries.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every bot except `id`.
    pub fn others(&self, id: BotId) -> impl Iterator<Item = &RosterEntry> + '_ {
        self.entries.iter().filter(move |e| e.id != id)
    }

    /// `true` if some bot other than `id` sits on `c`.
    pub fn is_occupied_by_other(&self, id: BotId, c: Coord) -> bool {
        self.others(id).any(|e| e.cell == c)
    }

    /// `true` if some bot other than `id` is already moving into `c`.
    pub fn is_claimed_by_other(&self, id: BotId, c: Coord) -> bool {
        self.others(id).any(|e| e.claim() == Some(c))
    }

    /// Cells a search for `id` should avoid: other bots' cells, plus their
    /// next waypoints when `with_next` is set.  `goal` is never included.
    pub fn obstacles(&self, id: BotId, goal: Coord, with_next: bool) -> BlockedSet {
        let mut blocked: BlockedSet = self.others(id).map(|e| e.cell).collect();
        if with_next {
            blocked.extend(self.others(id).filter_map(|e| e.next));
        }
        blocked.remove(goal);
        blocked
    }
}
