//! Phase 1: army upkeep.
//!
//! Every non-eliminated empire pays `army * upkeepPerUnit` food. A shortfall
//! zeroes the food and disbands `ceil(deficit / upkeepPerUnit)` army units,
//! floored at zero; an empire whose army starves to nothing is eliminated.
//! Empires are independent here, so iteration order only affects log order
//! (kept deterministic by ascending empire id).

use crate::config::GameConfig;
use crate::world::{LogEntry, WorldState};

pub fn run(world: &mut WorldState, turn: u32, cfg: &GameConfig, logs: &mut Vec<LogEntry>) {
    for empire in world.empires.values_mut() {
        if empire.eliminated {
            continue;
        }
        let cost = empire.army * cfg.upkeep_per_unit;
        if empire.food >= cost {
            empire.food -= cost;
            if cost > 0 {
                logs.push(LogEntry::empire(
                    turn,
                    empire.id,
                    format!("Army upkeep: -{} food", cost),
                ));
            }
        } else {
            let deficit = cost - empire.food;
            let reduction = deficit.div_ceil(cfg.upkeep_per_unit);
            let before = empire.army;
            empire.food = 0;
            empire.army = empire.army.saturating_sub(reduction);
            logs.push(LogEntry::empire(
                turn,
                empire.id,
                format!(
                    "Insufficient food! Army reduced from {} to {}",
                    before, empire.army
                ),
            ));
            if empire.army == 0 {
                empire.eliminated = true;
                logs.push(LogEntry::empire(
                    turn,
                    empire.id,
                    "Empire eliminated due to starvation!",
                ));
            }
        }
    }
}
