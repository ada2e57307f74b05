//! Phase 5: tile upgrades.
//!
//! Each pending Build order is re-validated against processing-time state
//! (ownership, max level, level-dependent cost). Success raises the tile
//! one level and deducts the cost; any failure logs its specific reason and
//! changes nothing.

use crate::config::GameConfig;
use crate::rules;
use crate::world::{LogEntry, Order, OrderKind, WorldState};

pub fn run(
    world: &mut WorldState,
    turn: u32,
    cfg: &GameConfig,
    orders: &[Order],
    logs: &mut Vec<LogEntry>,
) {
    for order in orders {
        let OrderKind::Build { target } = order.kind else {
            continue;
        };
        let Some(empire) = world.empire(order.empire) else {
            continue;
        };
        if empire.eliminated {
            logs.push(LogEntry::empire(
                turn,
                order.empire,
                "Build failed: empire is eliminated",
            ));
            continue;
        }
        if let Err(reason) = rules::validate_build(world, cfg, empire, target) {
            logs.push(LogEntry::empire(
                turn,
                order.empire,
                format!("Build failed: {}", reason),
            ));
            continue;
        }

        let mut new_level = 0;
        if let Some(tile) = world.tile_mut(target) {
            tile.level += 1;
            new_level = tile.level;
        }
        let cost = cfg.build_cost(new_level);
        if let Some(empire) = world.empire_mut(order.empire) {
            empire.spend(cost.wood, cost.stone);
        }
        logs.push(LogEntry::empire(
            turn,
            order.empire,
            format!("Upgraded {} to level {}", target, new_level),
        ));
    }
}
