//! warehouse — a small grid warehouse run end to end.
//!
//! Three bots work a 10×10 floor.  Goods arrive on the inbound column every
//! simulated second, and every second the most wanted item on the floor is
//! requested for shipping.  The greedy dispatcher puts goods away, ships
//! requests to the outbound dock and restacks cells whose order drifted as
//! preferences evolve.
//!
//! ```text
//! cargo run -p warehouse -- [config.json]
//! RUST_LOG=debug cargo run -p warehouse     # every bot event
//! ```

use std::env;
use std::fs;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use wh_core::{Coord, Tick, WarehouseConfig};
use wh_mobility::{Bot, BotEvent, BotTask};
use wh_sim::{GreedyDispatcher, SimBuilder, SimObserver};
use wh_spatial::AStarPathfinder;
use wh_storage::{CellKind, Grid, Item};

// ── Constants ─────────────────────────────────────────────────────────────────

const BOT_COUNT:     i32 = 3;
const INITIAL_STOCK: u32 = 10;
const SNAPSHOT_SECS: f32 = 10.0;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs every bot event at debug level and a floor summary at each snapshot.
#[derive(Default)]
struct FloorLog {
    events:    usize,
    snapshots: usize,
}

impl SimObserver for FloorLog {
    fn on_tick_end(&mut self, tick: Tick, events: &[BotEvent]) {
        for event in events {
            debug!(%tick, ?event, "bot event");
        }
        self.events += events.len();
    }

    fn on_snapshot(&mut self, tick: Tick, grid: &Grid, bots: &[Bot]) {
        self.snapshots += 1;
        let busy = bots.iter().filter(|b| !b.is_idle()).count();
        let carrying = bots.iter().filter(|b| b.carried().is_some()).count();
        info!(
            %tick,
            items = grid.total_items(),
            inbound = count_items(grid, CellKind::Inbound),
            shipped = count_items(grid, CellKind::Outbound),
            unsorted = grid.cells_needing_resort().len(),
            busy,
            carrying,
            "floor"
        );
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        info!(%final_tick, events = self.events, snapshots = self.snapshots, "run finished");
    }
}

fn count_items(grid: &Grid, kind: CellKind) -> usize {
    grid.cells().filter(|c| c.kind() == kind).map(|c| c.len()).sum()
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// The config file named by the first argument, or the defaults.
fn load_config() -> Result<WarehouseConfig> {
    let Some(path) = env::args().nth(1) else {
        return Ok(WarehouseConfig::default());
    };
    let text = fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {path}"))?;
    Ok(config)
}

/// `true` if `code` is queued for shipping or a bot is on its way to fetch it.
fn already_wanted(dispatcher: &GreedyDispatcher, bots: &[Bot], code: &str) -> bool {
    dispatcher.pending_requests().any(|r| r.code == code)
        || bots.iter().any(|b| {
            matches!(b.task(), BotTask::ToPickup { item_code: Some(wanted), .. } if wanted == code)
        })
}

fn item_code(n: u32) -> String {
    format!("ITEM{n:03}")
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();
    let config = load_config()?;
    if config.inbound_cells == 0 {
        bail!("the demo feeds goods through inbound cells; inbound_cells must be positive");
    }

    // Bots start along the top row, clear of the docks.
    let top = config.grid_height as i32 - 1;
    let starts = (0..BOT_COUNT).map(|x| Coord::new(x + 1, top));

    let snapshot_every = config.make_clock().ticks_for_secs(SNAPSHOT_SECS);

    let mut sim = SimBuilder::new(config, GreedyDispatcher::new(), AStarPathfinder)
        .bots(starts)
        .snapshot_every(snapshot_every)
        .build()?;
    let per_second = sim.clock.ticks_for_secs(1.0);

    let mut log = FloorLog::default();
    for n in 0..INITIAL_STOCK {
        sim.receive_inbound(Item::new(item_code(n)))?;
    }
    let mut next_code = INITIAL_STOCK;

    info!(
        width = sim.grid.width(),
        height = sim.grid.height(),
        bots = sim.fleet.len(),
        ticks = sim.config.total_ticks,
        "warehouse demo starting"
    );

    let t0 = Instant::now();
    while sim.clock.current_tick < sim.config.end_tick() {
        let now = sim.clock.current_tick;
        if now.0 > 0 && now.0.is_multiple_of(per_second) {
            sim.receive_inbound(Item::new(item_code(next_code)))?;
            next_code += 1;

            let wanted = sim
                .grid
                .highest_preference_item(&[CellKind::Storage, CellKind::Inbound])
                .map(|(_, item)| item.code().to_owned());
            if let Some(code) = wanted.filter(|code| !already_wanted(&sim.dispatcher, sim.fleet.bots(), code)) {
                sim.dispatcher.request_outbound(code, 1);
            }
        }
        sim.run_ticks(1, &mut log)?;
    }
    log.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    // ── Summary ───────────────────────────────────────────────────────────
    println!();
    println!("Simulated {} in {:.3} s", sim.clock, elapsed.as_secs_f64());
    println!("Items in system: {}", sim.items_in_system());
    println!(
        "Requests still queued: {}",
        sim.dispatcher.pending_requests().map(|r| r.quantity as usize).sum::<usize>()
    );
    println!("{}", serde_json::to_string_pretty(&sim.stats)?);
    println!();

    println!("{:<8} {:<10} {:<24} {:<12}", "Bot", "Cell", "State", "Carrying");
    println!("{}", "-".repeat(56));
    for bot in sim.fleet.bots() {
        println!(
            "{:<8} {:<10} {:<24} {:<12}",
            bot.id().label(),
            bot.cell().to_string(),
            bot.state().as_str(),
            bot.carried().map_or("-", Item::code),
        );
    }

    Ok(())
}
