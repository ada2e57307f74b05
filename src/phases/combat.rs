//! Phase 4: combat resolution.
//!
//! Attacks are processed independently, in order id sequence. Each attack
//! re-fetches its target at processing time; a missing, unowned, or own
//! tile (or an attacker no longer able to field the commitment) is a logged
//! failure that spends nothing and consumes no RNG draws. A resolved fight
//! draws variance for the attacker first, then the defender, so replays are
//! deterministic. The committed army is spent win or lose.

use crate::config::GameConfig;
use crate::rng::PhaseRng;
use crate::world::{Coord, EmpireId, LogEntry, Order, OrderKind, WorldState};

pub fn run(
    world: &mut WorldState,
    turn: u32,
    cfg: &GameConfig,
    orders: &[Order],
    rng: &mut PhaseRng,
    logs: &mut Vec<LogEntry>,
) {
    for order in orders {
        if let OrderKind::Attack { target, commit } = order.kind {
            resolve_attack(world, turn, cfg, order.empire, target, commit, rng, logs);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn resolve_attack(
    world: &mut WorldState,
    turn: u32,
    cfg: &GameConfig,
    attacker_id: EmpireId,
    target: Coord,
    commit: u32,
    rng: &mut PhaseRng,
    logs: &mut Vec<LogEntry>,
) {
    let Some(attacker) = world.empire(attacker_id) else {
        return;
    };
    if attacker.eliminated {
        logs.push(LogEntry::empire(
            turn,
            attacker_id,
            format!("Attack on {} failed: empire is eliminated", target),
        ));
        return;
    }
    if commit > attacker.army {
        logs.push(LogEntry::empire(
            turn,
            attacker_id,
            format!("Attack on {} failed: committed army no longer available", target),
        ));
        return;
    }
    let attacker_army = attacker.army;
    let attacker_name = attacker.name.clone();

    let defender_id = match world.tile(target).and_then(|t| t.owner) {
        Some(owner) if owner != attacker_id => owner,
        _ => {
            logs.push(LogEntry::empire(
                turn,
                attacker_id,
                "Attack failed: target tile not found or unowned",
            ));
            return;
        }
    };
    let Some(defender) = world.empire(defender_id) else {
        return;
    };
    let defender_name = defender.name.clone();
    let tile_level = world.tile(target).map_or(1, |t| t.level);

    let attacker_power = f64::from(commit + attacker_army);
    let defender_power = f64::from(defender.army + u32::from(tile_level));

    // Attacker draw first, defender second; the order is part of the replay
    // contract.
    let attacker_variance = 1.0 + (rng.next_f64() - 0.5) * 2.0 * cfg.variance_pct;
    let defender_variance = 1.0 + (rng.next_f64() - 0.5) * 2.0 * cfg.variance_pct;
    let attacker_wins =
        attacker_power * attacker_variance > defender_power * defender_variance;

    if attacker_wins {
        if let Some(tile) = world.tile_mut(target) {
            tile.owner = Some(attacker_id);
            tile.level = tile.level.saturating_sub(1).max(1);
        }
        if let Some(a) = world.empire_mut(attacker_id) {
            a.tiles_owned += 1;
            a.gold += cfg.capture_bonus_gold;
            a.army -= commit;
        }
        if let Some(d) = world.empire_mut(defender_id) {
            debug_assert!(d.tiles_owned > 0, "defender owned the contested tile");
            d.tiles_owned = d.tiles_owned.saturating_sub(1);
        }
        logs.push(LogEntry::empire(
            turn,
            attacker_id,
            format!(
                "Captured {} from {}! +{} gold",
                target, defender_name, cfg.capture_bonus_gold
            ),
        ));
        logs.push(LogEntry::empire(
            turn,
            defender_id,
            format!("Lost {} to {}", target, attacker_name),
        ));
    } else {
        if let Some(a) = world.empire_mut(attacker_id) {
            a.army -= commit;
        }
        logs.push(LogEntry::empire(
            turn,
            attacker_id,
            format!("Attack on {} failed", target),
        ));
        logs.push(LogEntry::empire(
            turn,
            defender_id,
            format!("Defended {} from {}", target, attacker_name),
        ));
    }
}
