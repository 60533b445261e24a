//! `GreedyDispatcher`: first-come task assignment over a handful of fixed
//! rules.

use std::collections::VecDeque;

use tracing::{debug, trace};

use wh_core::{BotId, Coord, SimRng};
use wh_storage::{CellKind, Grid};

use crate::{Assignment, DispatchContext, Dispatcher};

/// Where outbound requests are delivered: the bottom cell of the last column.
pub fn outbound_dock(grid: &Grid) -> Coord {
    Coord::new(grid.width() as i32 - 1, 0)
}

// ── OutboundRequest ───────────────────────────────────────────────────────────

/// "Ship `quantity` items with this code."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub code:     String,
    pub quantity: u32,
}

impl OutboundRequest {
    pub fn new(code: impl Into<String>, quantity: u32) -> Self {
        Self { code: code.into(), quantity }
    }
}

// ── GreedyDispatcher ──────────────────────────────────────────────────────────

/// Hands out work in a fixed order each tick, one idle bot per assignment:
///
/// 1. the request at the head of the outbound queue, if its item is on the
///    floor;
/// 2. put-away: every non-empty inbound cell sends its top item to a random
///    storage cell with room;
/// 3. the head of the auto-ship queue (see [`with_auto_ship`]);
/// 4. resort: every storage cell stacked out of preference order.
///
/// Bots still idle after that are parked if they stand on a dock or on a cell
/// some task is heading for: each walks to the nearest free storage cell.
///
/// A cell that an in-flight task already targets is skipped as a pickup
/// source, put-away destination or resort cell, so two bots never fight over
/// one stack.  The outbound dock is exempt; it takes any number of
/// deliveries.  Requests whose item is not on the floor stay queued.
///
/// [`with_auto_ship`]: GreedyDispatcher::with_auto_ship
#[derive(Debug, Clone, Default)]
pub struct GreedyDispatcher {
    requests:      VecDeque<OutboundRequest>,
    auto_requests: VecDeque<OutboundRequest>,
    auto_ship:     bool,
}

impl GreedyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// After every preference evolution pass, queue the highest-preference
    /// stored item for shipping.
    pub fn with_auto_ship(mut self, enabled: bool) -> Self {
        self.auto_ship = enabled;
        self
    }

    /// Queue a request to ship `quantity` items with `code`.  Zero is ignored.
    pub fn request_outbound(&mut self, code: impl Into<String>, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let request = OutboundRequest::new(code, quantity);
        debug!(code = %request.code, quantity, "outbound requested");
        self.requests.push_back(request);
    }

    pub fn pending_requests(&self) -> impl ExactSizeIterator<Item = &OutboundRequest> + '_ {
        self.requests.iter()
    }

    pub fn pending_auto_requests(&self) -> impl ExactSizeIterator<Item = &OutboundRequest> + '_ {
        self.auto_requests.iter()
    }
}

impl Dispatcher for GreedyDispatcher {
    fn dispatch(&mut self, ctx: &DispatchContext<'_>, rng: &mut SimRng) -> Vec<Assignment> {
        if self.auto_ship && ctx.preferences_evolved {
            if let Some((_, item)) = ctx.grid.highest_preference_item(&[CellKind::Storage]) {
                debug!(code = %item.code(), preference = item.preference(), "auto-ship queued");
                self.auto_requests.push_back(OutboundRequest::new(item.code(), 1));
            }
        }

        let mut round = Round::new(ctx);
        round.serve_head(&mut self.requests);
        round.put_away_inbound(rng);
        round.serve_head(&mut self.auto_requests);
        round.resort();
        round.park();
        round.assignments
    }
}

// ── One dispatch round ────────────────────────────────────────────────────────

struct Round<'a> {
    grid:        &'a Grid,
    idle:        VecDeque<BotId>,
    bot_cells:   &'a [Coord],
    next_cells:  &'a [Coord],
    reserved:    Vec<Coord>,
    assignments: Vec<Assignment>,
}

impl<'a> Round<'a> {
    fn new(ctx: &DispatchContext<'a>) -> Self {
        Self {
            grid:        ctx.grid,
            idle:        ctx.idle.iter().copied().collect(),
            bot_cells:   ctx.bot_cells,
            next_cells:  ctx.next_cells,
            reserved:    ctx.busy_targets.to_vec(),
            assignments: Vec::new(),
        }
    }

    fn is_reserved(&self, c: Coord) -> bool {
        self.reserved.contains(&c)
    }

    /// Serve at most one unit of the request at the head of `queue`.
    fn serve_head(&mut self, queue: &mut VecDeque<OutboundRequest>) {
        let Some(request) = queue.front_mut() else { return };
        if self.idle.is_empty() {
            return;
        }
        let Some((source, _)) = self.grid.find_item(&request.code) else {
            trace!(code = %request.code, "requested item not on the floor");
            return;
        };
        if self.is_reserved(source) {
            return;
        }
        let Some(bot) = self.idle.pop_front() else { return };

        self.reserved.push(source);
        self.assignments.push(Assignment::Delivery {
            bot,
            source,
            dest: outbound_dock(self.grid),
            item_code: Some(request.code.clone()),
        });
        request.quantity -= 1;
        if request.quantity == 0 {
            queue.pop_front();
        }
    }

    fn put_away_inbound(&mut self, rng: &mut SimRng) {
        for inbound in self.grid.coords_of_kind(CellKind::Inbound) {
            if self.idle.is_empty() {
                return;
            }
            let has_goods = self.grid.cell(inbound).is_some_and(|c| !c.is_empty());
            if !has_goods || self.is_reserved(inbound) {
                continue;
            }
            let Some(dest) = self.grid.find_empty_storage_cell(&self.reserved, rng) else {
                trace!(%inbound, "no storage room for put-away");
                return;
            };
            let Some(bot) = self.idle.pop_front() else { return };
            self.reserved.extend([inbound, dest]);
            self.assignments.push(Assignment::Delivery { bot, source: inbound, dest, item_code: None });
        }
    }

    fn resort(&mut self) {
        for cell in self.grid.cells_needing_resort() {
            if self.is_reserved(cell) {
                continue;
            }
            let Some(bot) = self.idle.pop_front() else { return };
            self.reserved.push(cell);
            self.assignments.push(Assignment::Resort { bot, cell });
        }
    }

    /// Send leftover idle bots off docks and off cells other work targets.
    fn park(&mut self) {
        let idle = std::mem::take(&mut self.idle);
        for bot in idle {
            let Some(&at) = self.bot_cells.get(bot.index()) else { continue };
            let in_the_way = self.is_reserved(at)
                || self.grid.cell(at).is_some_and(|cell| cell.kind() != CellKind::Storage);
            if !in_the_way {
                continue;
            }
            let Some(rest) = self.rest_cell(at) else {
                trace!(%bot, %at, "nowhere to park");
                continue;
            };
            self.reserved.push(rest);
            self.assignments.push(Assignment::Park { bot, cell: rest });
        }
    }

    /// The nearest storage cell that no bot stands on or is stepping into
    /// and no task targets.  Ties go to the first in column order.
    fn rest_cell(&self, from: Coord) -> Option<Coord> {
        self.grid
            .coords_of_kind(CellKind::Storage)
            .into_iter()
            .filter(|c| !self.is_reserved(*c))
            .filter(|c| !self.bot_cells.contains(c) && !self.next_cells.contains(c))
            .min_by_key(|c| c.manhattan(from))
    }
}
