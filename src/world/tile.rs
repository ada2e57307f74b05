//! Tiles and terrain.
//!
//! A tile is one cell of the fixed grid: a terrain type assigned at world
//! generation, an upgrade level in `[1, 3]` that scales production and
//! defense, and at most one owning empire.

use serde::{Deserialize, Serialize};

use super::empire::EmpireId;

/// The highest level a tile can be upgraded to.
pub const MAX_TILE_LEVEL: u8 = 3;

/// A grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub fn new(x: u16, y: u16) -> Self {
        Coord { x, y }
    }

    /// True if `other` is one of this coordinate's eight neighbours.
    pub fn is_adjacent(self, other: Coord) -> bool {
        let dx = (i32::from(self.x) - i32::from(other.x)).abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).abs();
        dx <= 1 && dy <= 1 && self != other
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Per-turn resource production of one tile at level 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Yield {
    pub food: u32,
    pub wood: u32,
    pub stone: u32,
    pub gold: u32,
}

impl Yield {
    pub fn is_zero(self) -> bool {
        self.food == 0 && self.wood == 0 && self.stone == 0 && self.gold == 0
    }

    /// Scales the yield by a tile level.
    pub fn scaled(self, level: u8) -> Yield {
        let m = u32::from(level);
        Yield {
            food: self.food * m,
            wood: self.wood * m,
            stone: self.stone * m,
            gold: self.gold * m,
        }
    }

    pub fn add(&mut self, other: Yield) {
        self.food += other.food;
        self.wood += other.wood;
        self.stone += other.stone;
        self.gold += other.gold;
    }
}

/// Terrain of a tile, fixed at world generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Terrain {
    Plain,
    Farm,
    Forest,
    Mine,
    Harbor,
    Ruin,
}

impl Terrain {
    /// Base per-turn yield at level 1.
    pub const fn base_yield(self) -> Yield {
        match self {
            Terrain::Plain => Yield { food: 1, wood: 0, stone: 0, gold: 0 },
            Terrain::Farm => Yield { food: 2, wood: 0, stone: 0, gold: 0 },
            Terrain::Forest => Yield { food: 0, wood: 2, stone: 0, gold: 0 },
            Terrain::Mine => Yield { food: 0, wood: 0, stone: 2, gold: 0 },
            Terrain::Harbor => Yield { food: 1, wood: 0, stone: 0, gold: 1 },
            Terrain::Ruin => Yield { food: 0, wood: 0, stone: 0, gold: 0 },
        }
    }
}

/// One cell of the world grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: Coord,
    pub terrain: Terrain,
    /// Upgrade level in `[1, MAX_TILE_LEVEL]`.
    pub level: u8,
    pub owner: Option<EmpireId>,
}

impl Tile {
    pub fn new(coord: Coord, terrain: Terrain) -> Self {
        Tile { coord, terrain, level: 1, owner: None }
    }

    /// Per-turn production of this tile at its current level.
    pub fn production(&self) -> Yield {
        self.terrain.base_yield().scaled(self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacency_covers_all_eight_neighbours() {
        let c = Coord::new(5, 5);
        for dx in -1i32..=1 {
            for dy in -1i32..=1 {
                let n = Coord::new((5 + dx) as u16, (5 + dy) as u16);
                if dx == 0 && dy == 0 {
                    assert!(!c.is_adjacent(n), "a tile is not adjacent to itself");
                } else {
                    assert!(c.is_adjacent(n), "{} should neighbour {}", c, n);
                }
            }
        }
    }

    #[test]
    fn adjacency_rejects_distance_two() {
        let c = Coord::new(5, 5);
        assert!(!c.is_adjacent(Coord::new(7, 5)));
        assert!(!c.is_adjacent(Coord::new(5, 3)));
        assert!(!c.is_adjacent(Coord::new(7, 7)));
    }

    #[test]
    fn yields_follow_terrain_table() {
        assert_eq!(Terrain::Farm.base_yield().food, 2);
        assert_eq!(Terrain::Forest.base_yield().wood, 2);
        assert_eq!(Terrain::Mine.base_yield().stone, 2);
        let harbor = Terrain::Harbor.base_yield();
        assert_eq!((harbor.food, harbor.gold), (1, 1));
        assert!(Terrain::Ruin.base_yield().is_zero());
    }

    #[test]
    fn production_scales_with_level() {
        let mut tile = Tile::new(Coord::new(0, 0), Terrain::Mine);
        assert_eq!(tile.production().stone, 2);
        tile.level = 3;
        assert_eq!(tile.production().stone, 6);
    }
}
