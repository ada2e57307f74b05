//! Order validation.
//!
//! `validate_order` is a pure function of a world snapshot and a candidate
//! order. It runs at submission time as an advisory gate; the consuming
//! phases re-run the same checks authoritatively at processing time,
//! because the world can change between submission and the nightly pass.

use thiserror::Error;

use crate::config::GameConfig;
use crate::world::{Coord, Empire, EmpireId, OrderKind, OrderType, WorldState, MAX_TILE_LEVEL};

/// Why an order was rejected. The message is surfaced to the submitter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Reject {
    #[error("empire not found")]
    UnknownEmpire,

    #[error("empire is eliminated")]
    Eliminated,

    #[error("maximum {0} orders per turn")]
    QuotaExceeded(u32),

    #[error("target coordinates required")]
    MissingTarget,

    #[error("target coordinates out of bounds")]
    OutOfBounds,

    #[error("target tile not found")]
    TileNotFound,

    #[error("target tile is already owned")]
    TileOwned,

    #[error("target tile must be owned by another empire")]
    NotEnemyTile,

    #[error("target tile must be adjacent to owned territory")]
    NotAdjacent,

    #[error("must commit at least {0} army for attack")]
    CommitTooSmall(u32),

    #[error("cannot commit more army than available")]
    CommitExceedsArmy,

    #[error("can only build on owned tiles")]
    NotOwnedTile,

    #[error("can only defend owned tiles")]
    NotDefendableTile,

    #[error("tile is already at maximum level")]
    MaxLevel,

    #[error("insufficient resources")]
    InsufficientResources,
}

/// The raw submission shape: a type tag plus optional target and amount.
/// Validation turns a draft into a typed [`OrderKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDraft {
    pub order_type: OrderType,
    pub target: Option<Coord>,
    pub amount: Option<u32>,
}

/// Validates a candidate order against the current world state.
///
/// Checks run in a fixed sequence and short-circuit on the first failure:
/// empire exists, not eliminated, pending-order quota, then the
/// type-specific legality rules. `pending_count` is the empire's current
/// number of Pending orders for the target turn.
pub fn validate_order(
    world: &WorldState,
    cfg: &GameConfig,
    empire_id: EmpireId,
    pending_count: u32,
    draft: &OrderDraft,
) -> Result<OrderKind, Reject> {
    let empire = world.empire(empire_id).ok_or(Reject::UnknownEmpire)?;
    if empire.eliminated {
        return Err(Reject::Eliminated);
    }
    if pending_count >= cfg.order_quota {
        return Err(Reject::QuotaExceeded(cfg.order_quota));
    }

    match draft.order_type {
        OrderType::Expand => {
            let target = require_target(world, draft)?;
            validate_expand(world, cfg, empire, target)?;
            Ok(OrderKind::Expand { target })
        }
        OrderType::Attack => {
            let target = require_target(world, draft)?;
            let commit = draft.amount.ok_or(Reject::CommitTooSmall(cfg.attack_commit_min))?;
            validate_attack(world, cfg, empire, target, commit)?;
            Ok(OrderKind::Attack { target, commit })
        }
        OrderType::Build => {
            let target = require_target(world, draft)?;
            validate_build(world, cfg, empire, target)?;
            Ok(OrderKind::Build { target })
        }
        OrderType::Defend => {
            let target = require_target(world, draft)?;
            let tile = world.tile(target).ok_or(Reject::TileNotFound)?;
            if tile.owner != Some(empire.id) {
                return Err(Reject::NotDefendableTile);
            }
            Ok(OrderKind::Defend { target })
        }
        // Placeholder: no economic effect yet, always legal.
        OrderType::Trade => Ok(OrderKind::Trade),
    }
}

fn require_target(world: &WorldState, draft: &OrderDraft) -> Result<Coord, Reject> {
    let target = draft.target.ok_or(Reject::MissingTarget)?;
    if !world.in_bounds(target) {
        return Err(Reject::OutOfBounds);
    }
    Ok(target)
}

/// Expansion legality, shared verbatim with the expansion phase's
/// defensive re-check.
pub(crate) fn validate_expand(
    world: &WorldState,
    cfg: &GameConfig,
    empire: &Empire,
    target: Coord,
) -> Result<(), Reject> {
    let tile = world.tile(target).ok_or(Reject::TileNotFound)?;
    if tile.owner.is_some() {
        return Err(Reject::TileOwned);
    }
    if !world.owns_adjacent_tile(empire.id, target) {
        return Err(Reject::NotAdjacent);
    }
    if !empire.can_afford(cfg.expand_cost_wood, cfg.expand_cost_stone) {
        return Err(Reject::InsufficientResources);
    }
    Ok(())
}

fn validate_attack(
    world: &WorldState,
    cfg: &GameConfig,
    empire: &Empire,
    target: Coord,
    commit: u32,
) -> Result<(), Reject> {
    if commit < cfg.attack_commit_min {
        return Err(Reject::CommitTooSmall(cfg.attack_commit_min));
    }
    if commit > empire.army {
        return Err(Reject::CommitExceedsArmy);
    }
    let tile = world.tile(target).ok_or(Reject::TileNotFound)?;
    match tile.owner {
        None => return Err(Reject::NotEnemyTile),
        Some(owner) if owner == empire.id => return Err(Reject::NotEnemyTile),
        Some(_) => {}
    }
    if !world.owns_adjacent_tile(empire.id, target) {
        return Err(Reject::NotAdjacent);
    }
    Ok(())
}

/// Build legality, shared with the building phase's re-check.
pub(crate) fn validate_build(
    world: &WorldState,
    cfg: &GameConfig,
    empire: &Empire,
    target: Coord,
) -> Result<(), Reject> {
    let tile = world.tile(target).ok_or(Reject::TileNotFound)?;
    if tile.owner != Some(empire.id) {
        return Err(Reject::NotOwnedTile);
    }
    if tile.level >= MAX_TILE_LEVEL {
        return Err(Reject::MaxLevel);
    }
    let cost = cfg.build_cost(tile.level + 1);
    if !empire.can_afford(cost.wood, cost.stone) {
        return Err(Reject::InsufficientResources);
    }
    Ok(())
}
