//! Game configuration.
//!
//! Every tunable constant of the simulation lives here and is passed into
//! the orchestrator at construction. Nothing in the engine reads ambient
//! process state, so two engines with equal configs and seeds are
//! interchangeable.

use serde::{Deserialize, Serialize};

/// Cost of one tile upgrade, in wood and stone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCost {
    pub wood: u32,
    pub stone: u32,
}

/// Full game configuration.
///
/// `Default` reproduces the canonical rule set; tests construct variants to
/// probe edge cases (zero upkeep, guaranteed events, and so on).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// World seed string; the root of all per-turn randomness.
    pub world_seed: String,
    /// Grid width in tiles.
    pub width: u16,
    /// Grid height in tiles.
    pub height: u16,
    /// Maximum Pending orders one empire may hold for a single turn.
    pub order_quota: u32,
    /// Wood cost of claiming one unowned tile.
    pub expand_cost_wood: u32,
    /// Stone cost of claiming one unowned tile.
    pub expand_cost_stone: u32,
    /// Upgrade cost to reach level 2.
    pub build_cost_level2: BuildCost,
    /// Upgrade cost to reach level 3.
    pub build_cost_level3: BuildCost,
    /// Food consumed per army unit per turn.
    pub upkeep_per_unit: u32,
    /// Smallest army commitment accepted for an attack.
    pub attack_commit_min: u32,
    /// Combat variance, as a fraction of power (0.1 = plus or minus 10%).
    pub variance_pct: f64,
    /// Gold awarded for capturing a tile.
    pub capture_bonus_gold: u32,
    /// Probability of a global flavor event per turn.
    pub event_chance: f64,
    /// Starting wallet and army for a newly founded empire.
    pub starting_food: u32,
    pub starting_wood: u32,
    pub starting_stone: u32,
    pub starting_gold: u32,
    pub starting_army: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            world_seed: "hegemon-001".to_string(),
            width: 20,
            height: 20,
            order_quota: 3,
            expand_cost_wood: 1,
            expand_cost_stone: 1,
            build_cost_level2: BuildCost { wood: 2, stone: 2 },
            build_cost_level3: BuildCost { wood: 4, stone: 4 },
            upkeep_per_unit: 1,
            attack_commit_min: 1,
            variance_pct: 0.1,
            capture_bonus_gold: 1,
            event_chance: 0.3,
            starting_food: 5,
            starting_wood: 5,
            starting_stone: 5,
            starting_gold: 5,
            starting_army: 1,
        }
    }
}

impl GameConfig {
    /// Returns the upgrade cost for raising a tile to `next_level`.
    ///
    /// Only levels 2 and 3 are reachable; anything else is a programming
    /// error caught by the caller's max-level check.
    pub fn build_cost(&self, next_level: u8) -> BuildCost {
        match next_level {
            2 => self.build_cost_level2,
            _ => self.build_cost_level3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_canonical_rules() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.order_quota, 3);
        assert_eq!(cfg.expand_cost_wood, 1);
        assert_eq!(cfg.expand_cost_stone, 1);
        assert_eq!(cfg.upkeep_per_unit, 1);
        assert_eq!(cfg.attack_commit_min, 1);
        assert!((cfg.variance_pct - 0.1).abs() < f64::EPSILON);
        assert_eq!(cfg.capture_bonus_gold, 1);
    }

    #[test]
    fn build_cost_scales_with_level() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.build_cost(2), BuildCost { wood: 2, stone: 2 });
        assert_eq!(cfg.build_cost(3), BuildCost { wood: 4, stone: 4 });
    }
}
