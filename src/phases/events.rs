//! Phase 6: world events.
//!
//! With fixed probability, one globally scoped flavor line is drawn
//! uniformly from the catalog. Events carry no mechanical effect yet, but
//! the hook runs every turn so future effects slot in without changing the
//! pipeline.

use crate::config::GameConfig;
use crate::rng::PhaseRng;
use crate::world::LogEntry;

const EVENT_CATALOG: [&str; 8] = [
    "A meteor shower streaks over the frontier, scattering rare minerals.",
    "A great storm sweeps across the lands, battering every coast.",
    "Merchant caravans arrive bearing exotic goods and distant rumors.",
    "Ancient ruins surface from the dunes, drawing scholars and looters alike.",
    "A solar eclipse casts an uneasy shadow over the world.",
    "Vast herds migrate across the plains, trampling old borders.",
    "A comet crosses the night sky, read as an omen in every court.",
    "The seasons turn early this year, catching farmers unprepared.",
];

pub fn run(turn: u32, cfg: &GameConfig, rng: &mut PhaseRng, logs: &mut Vec<LogEntry>) {
    if rng.next_f64() < cfg.event_chance {
        let message = *rng.pick(&EVENT_CATALOG);
        logs.push(LogEntry::global(turn, message));
    }
}
