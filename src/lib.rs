//! Hegemon engine library.
//!
//! A deterministic, seed-reproducible turn engine for an asynchronous
//! territorial strategy game: empires submit a bounded number of orders per
//! day, and one nightly pass consumes them through a fixed six-phase
//! pipeline (upkeep, production, expansion, combat, building, events).
//! Exposes the world model, order validator, phase pipeline, storage
//! contract, and turn orchestrator for use by integration tests and the
//! binary front end.

pub mod command;
pub mod config;
pub mod engine;
pub mod phases;
pub mod processor;
pub mod rng;
pub mod rules;
pub mod store;
pub mod world;
pub mod worldgen;
