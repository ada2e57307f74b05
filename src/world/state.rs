//! The full world snapshot.
//!
//! One `WorldState` holds every tile and empire. A turn pass clones the
//! snapshot, mutates the clone through the phase pipeline, and commits the
//! result in one atomic store operation, so partial passes are never
//! visible.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::empire::{Empire, EmpireId};
use super::tile::{Coord, Tile};

/// Complete world state at a point in time.
///
/// Tiles are stored row-major (`index = y * width + x`) for O(1) coordinate
/// lookup. Empires live in a `BTreeMap` so every iteration over them is in
/// ascending id order, which keeps log output deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    pub width: u16,
    pub height: u16,
    pub tiles: Vec<Tile>,
    pub empires: BTreeMap<EmpireId, Empire>,
}

impl WorldState {
    /// Creates a world with no tiles and no empires (worldgen fills it in).
    pub fn empty(width: u16, height: u16) -> Self {
        WorldState {
            width,
            height,
            tiles: Vec::new(),
            empires: BTreeMap::new(),
        }
    }

    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: Coord) -> usize {
        usize::from(coord.y) * usize::from(self.width) + usize::from(coord.x)
    }

    /// Tile at `coord`, if the coordinate is in bounds and the map is
    /// generated.
    pub fn tile(&self, coord: Coord) -> Option<&Tile> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.tiles.get(self.index(coord))
    }

    pub fn tile_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        if !self.in_bounds(coord) {
            return None;
        }
        let idx = self.index(coord);
        self.tiles.get_mut(idx)
    }

    pub fn empire(&self, id: EmpireId) -> Option<&Empire> {
        self.empires.get(&id)
    }

    pub fn empire_mut(&mut self, id: EmpireId) -> Option<&mut Empire> {
        self.empires.get_mut(&id)
    }

    /// Coordinates of every tile owned by `id`, in grid order.
    pub fn tiles_of(&self, id: EmpireId) -> Vec<Coord> {
        self.tiles
            .iter()
            .filter(|t| t.owner == Some(id))
            .map(|t| t.coord)
            .collect()
    }

    /// True if `id` owns at least one of `target`'s eight neighbours.
    pub fn owns_adjacent_tile(&self, id: EmpireId, target: Coord) -> bool {
        self.tiles
            .iter()
            .any(|t| t.owner == Some(id) && t.coord.is_adjacent(target))
    }

    /// Recounts actual ownership for `id`. Used by invariant checks; the
    /// engine keeps `tiles_owned` in sync as it mutates ownership.
    pub fn count_owned(&self, id: EmpireId) -> u32 {
        self.tiles.iter().filter(|t| t.owner == Some(id)).count() as u32
    }
}
