//! Engine state management for the admin console.
//!
//! Owns the store and configuration between commands and maps each parsed
//! command to the core operations: worldgen, empire founding, order
//! submission and cancellation, turn processing, and log/state inspection.
//! Responses go line-by-line to the provided writer.

use std::io::Write;

use crate::command::Command;
use crate::config::GameConfig;
use crate::processor::{ProcessError, TurnProcessor};
use crate::rules::{self, OrderDraft};
use crate::store::{MemStore, Store};
use crate::world::{Coord, EmpireId, LogScope, OrderId};
use crate::worldgen;

/// Holds the mutable state of the engine between console commands.
pub struct Engine {
    config: GameConfig,
    store: MemStore,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Engine {
    pub fn new(config: GameConfig) -> Self {
        Engine { config, store: MemStore::new() }
    }

    pub fn store(&self) -> &MemStore {
        &self.store
    }

    /// Dispatches one parsed command. Returns false when the loop should
    /// exit.
    pub fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> bool {
        match command {
            Command::NewWorld { seed } => self.handle_newworld(seed, out),
            Command::Empire { name, color } => self.handle_empire(&name, &color, out),
            Command::Order { empire, order_type, target, amount } => {
                let draft = OrderDraft {
                    order_type,
                    target: target.map(|(x, y)| Coord::new(x, y)),
                    amount,
                };
                self.handle_order(EmpireId(empire), draft, out);
            }
            Command::Cancel { empire, order } => {
                self.handle_cancel(EmpireId(empire), OrderId(order), out);
            }
            Command::Process { through } => self.handle_process(through, out),
            Command::Turn => self.handle_turn(out),
            Command::Log { empire } => self.handle_log(empire.map(EmpireId), out),
            Command::Dump => self.handle_dump(out),
            Command::Quit => return false,
        }
        true
    }

    fn handle_newworld<W: Write>(&mut self, seed: Option<String>, out: &mut W) {
        if let Some(seed) = seed {
            self.config.world_seed = seed;
        }
        match self.store.world() {
            Ok(mut world) => {
                worldgen::generate_map(&mut world, &self.config);
                let (w, h) = (world.width, world.height);
                if let Err(e) = self.store.replace_world(world) {
                    writeln!(out, "error: {}", e).unwrap();
                    return;
                }
                writeln!(out, "world {}x{} seed {}", w, h, self.config.world_seed).unwrap();
            }
            Err(e) => writeln!(out, "error: {}", e).unwrap(),
        }
    }

    fn handle_empire<W: Write>(&mut self, name: &str, color: &str, out: &mut W) {
        let mut world = match self.store.world() {
            Ok(w) => w,
            Err(e) => {
                writeln!(out, "error: {}", e).unwrap();
                return;
            }
        };
        match worldgen::found_empire(&mut world, &self.config, name, color) {
            Ok(id) => {
                let capital = world.tiles_of(id).first().copied();
                if let Err(e) = self.store.replace_world(world) {
                    writeln!(out, "error: {}", e).unwrap();
                    return;
                }
                match capital {
                    Some(c) => writeln!(out, "empire {} founded, capital {}", id, c).unwrap(),
                    None => writeln!(out, "empire {} founded", id).unwrap(),
                }
            }
            Err(e) => writeln!(out, "rejected: {}", e).unwrap(),
        }
    }

    fn handle_order<W: Write>(&mut self, empire: EmpireId, draft: OrderDraft, out: &mut W) {
        let result = (|| {
            let processor = TurnProcessor::new(&self.store, &self.config);
            let turn = processor.active_turn()?;
            let world = self.store.world()?;
            let pending = self.store.pending_count(empire, turn)?;
            match rules::validate_order(&world, &self.config, empire, pending, &draft) {
                Ok(kind) => {
                    let id = self.store.insert_order(empire, turn, kind)?;
                    Ok::<_, ProcessError>(Ok((id, turn)))
                }
                Err(reason) => Ok(Err(reason)),
            }
        })();
        match result {
            Ok(Ok((id, turn))) => writeln!(out, "order {} accepted for turn {}", id, turn).unwrap(),
            Ok(Err(reason)) => writeln!(out, "rejected: {}", reason).unwrap(),
            Err(e) => writeln!(out, "error: {}", e).unwrap(),
        }
    }

    fn handle_cancel<W: Write>(&mut self, empire: EmpireId, order: OrderId, out: &mut W) {
        match self.store.cancel_order(order, empire) {
            Ok(()) => writeln!(out, "order {} cancelled", order).unwrap(),
            Err(e) => writeln!(out, "rejected: {}", e).unwrap(),
        }
    }

    fn handle_process<W: Write>(&mut self, through: Option<u32>, out: &mut W) {
        let processor = TurnProcessor::new(&self.store, &self.config);
        let reports = match through {
            Some(target) => processor.catch_up(target),
            None => processor
                .active_turn()
                .and_then(|t| processor.process_turn(t).map(|r| vec![r])),
        };
        match reports {
            Ok(reports) if reports.is_empty() => writeln!(out, "no turns to process").unwrap(),
            Ok(reports) => {
                for r in reports {
                    if r.already_processed {
                        writeln!(out, "turn {} already processed", r.turn).unwrap();
                    } else {
                        writeln!(
                            out,
                            "turn {} processed: {} orders, {} log entries",
                            r.turn, r.orders_consumed, r.logs_appended
                        )
                        .unwrap();
                    }
                }
            }
            Err(e) => writeln!(out, "error: {}", e).unwrap(),
        }
    }

    fn handle_turn<W: Write>(&self, out: &mut W) {
        let processor = TurnProcessor::new(&self.store, &self.config);
        match processor.active_turn() {
            Ok(turn) => writeln!(out, "turn {}", turn).unwrap(),
            Err(e) => writeln!(out, "error: {}", e).unwrap(),
        }
    }

    fn handle_log<W: Write>(&self, empire: Option<EmpireId>, out: &mut W) {
        match self.store.logs() {
            Ok(logs) => {
                for entry in logs {
                    match (entry.scope, empire) {
                        (LogScope::Empire(id), Some(wanted)) if id != wanted => continue,
                        (LogScope::Global, Some(_)) => continue,
                        _ => {}
                    }
                    let scope = match entry.scope {
                        LogScope::Global => "GLOBAL".to_string(),
                        LogScope::Empire(id) => id.to_string(),
                    };
                    writeln!(out, "[T{}] {} {}", entry.turn, scope, entry.message).unwrap();
                }
            }
            Err(e) => writeln!(out, "error: {}", e).unwrap(),
        }
    }

    fn handle_dump<W: Write>(&self, out: &mut W) {
        match self.store.world() {
            Ok(world) => match serde_json::to_string(&world) {
                Ok(json) => writeln!(out, "{}", json).unwrap(),
                Err(e) => writeln!(out, "error: {}", e).unwrap(),
            },
            Err(e) => writeln!(out, "error: {}", e).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::parse_command;

    fn run(engine: &mut Engine, line: &str) -> String {
        let mut out = Vec::new();
        let cmd = parse_command(line).expect("test command should parse");
        engine.handle(cmd, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn newworld_reports_size_and_seed() {
        let mut engine = Engine::default();
        let out = run(&mut engine, "newworld test-seed");
        assert_eq!(out.trim(), "world 20x20 seed test-seed");
    }

    #[test]
    fn founding_before_worldgen_is_rejected() {
        let mut engine = Engine::default();
        let out = run(&mut engine, "empire Aurelia #aa3355");
        assert!(out.contains("rejected"));
        assert!(out.contains("not been generated"));
    }

    #[test]
    fn full_session_accepts_orders_and_processes() {
        let mut engine = Engine::default();
        run(&mut engine, "newworld test-seed");
        let founded = run(&mut engine, "empire Aurelia #aa3355");
        assert!(founded.starts_with("empire E1 founded"));

        let trade = run(&mut engine, "order 1 trade");
        assert!(trade.contains("accepted for turn 1"), "{}", trade);

        let processed = run(&mut engine, "process");
        assert!(processed.contains("turn 1 processed"), "{}", processed);

        assert_eq!(run(&mut engine, "turn").trim(), "turn 2");
    }

    #[test]
    fn invalid_order_surfaces_the_reason() {
        let mut engine = Engine::default();
        run(&mut engine, "newworld test-seed");
        run(&mut engine, "empire Aurelia #aa3355");
        let out = run(&mut engine, "order 1 expand 19 19");
        assert!(out.contains("rejected"), "{}", out);
    }

    #[test]
    fn quota_rejects_a_fourth_order() {
        let mut engine = Engine::default();
        run(&mut engine, "newworld test-seed");
        run(&mut engine, "empire Aurelia #aa3355");
        for _ in 0..3 {
            assert!(run(&mut engine, "order 1 trade").contains("accepted"));
        }
        let out = run(&mut engine, "order 1 trade");
        assert!(out.contains("maximum 3 orders"), "{}", out);
    }

    #[test]
    fn cancel_restores_quota_headroom() {
        let mut engine = Engine::default();
        run(&mut engine, "newworld test-seed");
        run(&mut engine, "empire Aurelia #aa3355");
        for _ in 0..3 {
            run(&mut engine, "order 1 trade");
        }
        let out = run(&mut engine, "cancel 1 1");
        assert!(out.contains("cancelled"), "{}", out);
        assert!(run(&mut engine, "order 1 trade").contains("accepted"));
    }

    #[test]
    fn dump_emits_world_json() {
        let mut engine = Engine::default();
        run(&mut engine, "newworld test-seed");
        let out = run(&mut engine, "dump");
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["width"], 20);
        assert_eq!(value["tiles"].as_array().unwrap().len(), 400);
    }

    #[test]
    fn quit_ends_the_loop() {
        let mut engine = Engine::default();
        let mut out = Vec::new();
        assert!(!engine.handle(Command::Quit, &mut out));
    }
}
