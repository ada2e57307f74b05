//! The six-phase turn pipeline.
//!
//! Phases run strictly in the order below; later phases observe the
//! mutations of earlier ones. Each phase module exposes one `run` function
//! that mutates the in-memory world snapshot and appends narration log
//! entries. Failures of a single order are logged and never abort the
//! phase.

pub mod building;
pub mod combat;
pub mod events;
pub mod expansion;
pub mod production;
pub mod upkeep;

/// One of the six fixed simulation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Upkeep,
    Production,
    Expansion,
    Combat,
    Building,
    Events,
}

/// The authoritative phase sequence for one turn.
pub const PHASE_ORDER: [Phase; 6] = [
    Phase::Upkeep,
    Phase::Production,
    Phase::Expansion,
    Phase::Combat,
    Phase::Building,
    Phase::Events,
];

impl Phase {
    /// Stable name used to key this phase's RNG stream. Changing a name
    /// changes every replay, so these are part of the wire format.
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Upkeep => "upkeep",
            Phase::Production => "production",
            Phase::Expansion => "expansion",
            Phase::Combat => "combat",
            Phase::Building => "building",
            Phase::Events => "events",
        }
    }
}
