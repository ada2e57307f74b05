//! Empires: the persistent player entities.

use serde::{Deserialize, Serialize};

/// Identifier of an empire, assigned at founding and never reused.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EmpireId(pub u32);

impl std::fmt::Display for EmpireId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A player's empire: wallet, army, tile counter, and elimination flag.
///
/// Resource fields are unsigned so they can never go negative; every
/// deduction in the engine checks sufficiency first (or clamps where the
/// rules say so). `eliminated` is one-way: once true it never resets, and
/// an eliminated empire takes no further part in any phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empire {
    pub id: EmpireId,
    /// Globally unique display name.
    pub name: String,
    /// Display color (hex string, UI concern only).
    pub color: String,
    pub food: u32,
    pub wood: u32,
    pub stone: u32,
    pub gold: u32,
    pub army: u32,
    /// Derived counter, kept consistent with actual tile ownership.
    pub tiles_owned: u32,
    pub eliminated: bool,
}

impl Empire {
    /// True if the empire can pay `wood` and `stone` at once.
    pub fn can_afford(&self, wood: u32, stone: u32) -> bool {
        self.wood >= wood && self.stone >= stone
    }

    /// Deducts `wood` and `stone`. Caller must have checked `can_afford`.
    pub fn spend(&mut self, wood: u32, stone: u32) {
        debug_assert!(self.can_afford(wood, stone));
        self.wood -= wood;
        self.stone -= stone;
    }
}
