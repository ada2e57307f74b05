//! Phase 2: resource production.
//!
//! Each non-eliminated empire collects every owned tile's terrain yield
//! scaled by tile level. Totals are computed per empire in parallel (tile
//! scans are read-only and independent), then applied in ascending empire
//! id order so the wallet updates and log output stay deterministic.

use rayon::prelude::*;

use crate::world::{EmpireId, LogEntry, WorldState, Yield};

pub fn run(world: &mut WorldState, turn: u32, logs: &mut Vec<LogEntry>) {
    let producers: Vec<EmpireId> = world
        .empires
        .values()
        .filter(|e| !e.eliminated)
        .map(|e| e.id)
        .collect();

    let tiles = &world.tiles;
    let totals: Vec<(EmpireId, Yield)> = producers
        .par_iter()
        .map(|&id| {
            let mut total = Yield::default();
            for tile in tiles.iter().filter(|t| t.owner == Some(id)) {
                total.add(tile.production());
            }
            (id, total)
        })
        .collect();

    for (id, total) in totals {
        if total.is_zero() {
            continue;
        }
        let Some(empire) = world.empire_mut(id) else {
            continue;
        };
        empire.food += total.food;
        empire.wood += total.wood;
        empire.stone += total.stone;
        empire.gold += total.gold;
        logs.push(LogEntry::empire(
            turn,
            id,
            format!(
                "Production: +{} food, +{} wood, +{} stone, +{} gold",
                total.food, total.wood, total.stone, total.gold
            ),
        ));
    }
}
