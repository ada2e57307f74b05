//! Phase 3: expansion and claim-conflict resolution.
//!
//! Pending Expand orders are grouped by target tile. A lone claimant is
//! re-validated against processing-time state and applied; multiple
//! claimants form a conflict resolved deterministically: contenders ranked
//! by descending current army, exact ties broken by a phase-RNG coin flip
//! per tied pair. Only the winner expands; every loser gets a
//! "conflict lost" log entry and no state change.

use std::collections::BTreeMap;

use crate::config::GameConfig;
use crate::rng::PhaseRng;
use crate::rules;
use crate::world::{Coord, EmpireId, LogEntry, Order, OrderKind, WorldState};

pub fn run(
    world: &mut WorldState,
    turn: u32,
    cfg: &GameConfig,
    orders: &[Order],
    rng: &mut PhaseRng,
    logs: &mut Vec<LogEntry>,
) {
    // BTreeMap keyed by coordinate: conflict groups resolve in grid order.
    let mut by_target: BTreeMap<Coord, Vec<&Order>> = BTreeMap::new();
    for order in orders {
        if let OrderKind::Expand { target } = order.kind {
            by_target.entry(target).or_default().push(order);
        }
    }

    for (target, contenders) in by_target {
        if contenders.len() == 1 {
            apply_expansion(world, turn, cfg, contenders[0].empire, target, logs);
            continue;
        }
        // Winner's outcome is narrated first, then each loser's.
        let winner = resolve_conflict(world, &contenders, rng);
        apply_expansion(world, turn, cfg, winner.empire, target, logs);
        for loser in contenders.iter().filter(|o| o.id != winner.id) {
            logs.push(LogEntry::empire(
                turn,
                loser.empire,
                format!("Expansion conflict lost at {}", target),
            ));
        }
    }
}

/// Ranks contenders by descending processing-time army; the sort is stable,
/// so equal-army contenders stay in submission order before tie-breaking.
/// Ties for the top spot are then settled by one coin flip per tied pair,
/// the incumbent surviving on heads.
fn resolve_conflict<'a>(
    world: &WorldState,
    contenders: &[&'a Order],
    rng: &mut PhaseRng,
) -> &'a Order {
    let army_of =
        |id: EmpireId| world.empire(id).map_or(0, |e| e.army);

    let mut ranked: Vec<(&Order, u32)> =
        contenders.iter().map(|o| (*o, army_of(o.empire))).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let top_army = ranked[0].1;
    let mut winner = ranked[0].0;
    for &(challenger, army) in &ranked[1..] {
        if army != top_army {
            break;
        }
        if rng.next_f64() < 0.5 {
            winner = challenger;
        }
    }
    winner
}

/// Applies one expansion after an authoritative re-check. State may have
/// drifted since submission, so failures here are logged, never thrown.
fn apply_expansion(
    world: &mut WorldState,
    turn: u32,
    cfg: &GameConfig,
    empire_id: EmpireId,
    target: Coord,
    logs: &mut Vec<LogEntry>,
) {
    let Some(empire) = world.empire(empire_id) else {
        return;
    };
    if empire.eliminated {
        logs.push(LogEntry::empire(
            turn,
            empire_id,
            "Expansion failed: empire is eliminated",
        ));
        return;
    }
    if let Err(reason) = rules::validate_expand(world, cfg, empire, target) {
        logs.push(LogEntry::empire(
            turn,
            empire_id,
            format!("Expansion failed: {}", reason),
        ));
        return;
    }

    if let Some(tile) = world.tile_mut(target) {
        tile.owner = Some(empire_id);
    }
    if let Some(empire) = world.empire_mut(empire_id) {
        empire.spend(cfg.expand_cost_wood, cfg.expand_cost_stone);
        empire.tiles_owned += 1;
    }
    logs.push(LogEntry::empire(
        turn,
        empire_id,
        format!("Expanded to {}", target),
    ));
}
