//! One-time world generation and empire founding.
//!
//! Map generation is a deterministic seeding step, not part of per-turn
//! simulation: the same seed always produces the same terrain layout.
//! Founding an empire assigns the first unowned tile (lowest grid index)
//! as its capital and the configured starting wallet and army.

use thiserror::Error;

use crate::config::GameConfig;
use crate::rng::PhaseRng;
use crate::world::{Coord, Empire, EmpireId, Terrain, Tile, WorldState};

/// Cumulative terrain distribution rolled per tile at generation.
const TERRAIN_DISTRIBUTION: [(Terrain, f64); 6] = [
    (Terrain::Plain, 0.40),
    (Terrain::Farm, 0.20),
    (Terrain::Forest, 0.20),
    (Terrain::Mine, 0.15),
    (Terrain::Harbor, 0.04),
    (Terrain::Ruin, 0.01),
];

/// Errors from empire founding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FoundingError {
    #[error("empire name already taken")]
    NameTaken,

    #[error("no available starting territory")]
    NoFreeTile,

    #[error("world map has not been generated")]
    MapMissing,
}

/// Generates the tile grid from the world seed.
///
/// A no-op when the map already exists, matching the one-time nature of
/// world seeding.
pub fn generate_map(world: &mut WorldState, cfg: &GameConfig) {
    if !world.tiles.is_empty() {
        return;
    }
    let mut rng = PhaseRng::from_key(&cfg.world_seed, 0, "worldgen");
    world.width = cfg.width;
    world.height = cfg.height;
    world.tiles.reserve(usize::from(cfg.width) * usize::from(cfg.height));
    for y in 0..cfg.height {
        for x in 0..cfg.width {
            let terrain = roll_terrain(&mut rng);
            world.tiles.push(Tile::new(Coord::new(x, y), terrain));
        }
    }
}

fn roll_terrain(rng: &mut PhaseRng) -> Terrain {
    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    for (terrain, probability) in TERRAIN_DISTRIBUTION {
        cumulative += probability;
        if roll <= cumulative {
            return terrain;
        }
    }
    Terrain::Plain
}

/// Founds a new empire: unique name, starting resources, and the first
/// unowned tile as capital. Returns the new empire's id.
pub fn found_empire(
    world: &mut WorldState,
    cfg: &GameConfig,
    name: &str,
    color: &str,
) -> Result<EmpireId, FoundingError> {
    if world.tiles.is_empty() {
        return Err(FoundingError::MapMissing);
    }
    if world.empires.values().any(|e| e.name == name) {
        return Err(FoundingError::NameTaken);
    }

    let capital = world
        .tiles
        .iter()
        .find(|t| t.owner.is_none())
        .map(|t| t.coord)
        .ok_or(FoundingError::NoFreeTile)?;

    let id = EmpireId(
        world
            .empires
            .keys()
            .last()
            .map_or(1, |last| last.0 + 1),
    );
    world.empires.insert(
        id,
        Empire {
            id,
            name: name.to_string(),
            color: color.to_string(),
            food: cfg.starting_food,
            wood: cfg.starting_wood,
            stone: cfg.starting_stone,
            gold: cfg.starting_gold,
            army: cfg.starting_army,
            tiles_owned: 1,
            eliminated: false,
        },
    );
    if let Some(tile) = world.tile_mut(capital) {
        tile.owner = Some(id);
    }
    Ok(id)
}
