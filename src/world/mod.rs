//! World model: tiles, empires, orders, turns, and narration logs.

pub mod empire;
pub mod log;
pub mod order;
pub mod state;
pub mod tile;
pub mod turn;

pub use empire::{Empire, EmpireId};
pub use log::{LogEntry, LogScope};
pub use order::{Order, OrderId, OrderKind, OrderStatus, OrderType};
pub use state::WorldState;
pub use tile::{Coord, Terrain, Tile, Yield, MAX_TILE_LEVEL};
pub use turn::{TurnRecord, TurnState};
