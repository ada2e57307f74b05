//! Orders: a player's declared intent for a specific turn.
//!
//! The order kind is a tagged variant carrying exactly the data that kind
//! needs, so a new kind cannot be added without updating validation, phase
//! dispatch, and tests together. The raw submission shape (type tag plus
//! optional coordinates and amount) exists only at the validator boundary.

use serde::{Deserialize, Serialize};

use super::empire::EmpireId;
use super::tile::Coord;

/// Identifier of a submitted order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct OrderId(pub u64);

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "O{}", self.0)
    }
}

/// The five order types a player can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    Expand,
    Attack,
    Build,
    Defend,
    Trade,
}

impl OrderType {
    /// Parses the lowercase command-line spelling.
    pub fn parse(s: &str) -> Option<OrderType> {
        match s {
            "expand" => Some(OrderType::Expand),
            "attack" => Some(OrderType::Attack),
            "build" => Some(OrderType::Build),
            "defend" => Some(OrderType::Defend),
            "trade" => Some(OrderType::Trade),
            _ => None,
        }
    }
}

/// A validated order, with per-kind payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    /// Claim an unowned adjacent tile.
    Expand { target: Coord },
    /// Attack an enemy tile, committing `commit` army.
    Attack { target: Coord, commit: u32 },
    /// Upgrade an owned tile by one level.
    Build { target: Coord },
    /// Hold an owned tile (no mechanical effect yet).
    Defend { target: Coord },
    /// Placeholder with no economic effect.
    Trade,
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Expand { .. } => OrderType::Expand,
            OrderKind::Attack { .. } => OrderType::Attack,
            OrderKind::Build { .. } => OrderType::Build,
            OrderKind::Defend { .. } => OrderType::Defend,
            OrderKind::Trade => OrderType::Trade,
        }
    }
}

/// Lifecycle of an order.
///
/// `Pending -> Applied` when its turn is processed, or
/// `Pending -> Cancelled` by its owner before the pass starts. No other
/// transition exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Applied,
    Cancelled,
}

/// A submitted order. Immutable after creation except for `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub empire: EmpireId,
    pub turn: u32,
    pub kind: OrderKind,
    pub status: OrderStatus,
}
