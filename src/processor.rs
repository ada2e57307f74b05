//! The turn orchestrator.
//!
//! Sequences the six phases for one target turn, guarantees idempotency
//! (a processed turn is never reprocessed), and commits the whole pass as
//! one atomic state transition. Because every phase is deterministic given
//! `(seed, turn, orders, prior state)`, a failed pass can simply be retried
//! from the top.

use thiserror::Error;

use crate::config::GameConfig;
use crate::phases::{building, combat, events, expansion, production, upkeep, Phase};
use crate::rng::PhaseRng;
use crate::store::{Store, StoreError, TurnClaim, TurnOutcome};
use crate::world::LogEntry;

/// Failures of a turn pass. Store errors leave the turn Unprocessed.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("turn {0} is already being processed")]
    ClaimHeld(u32),
}

/// What one `process_turn` call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub turn: u32,
    /// True when the call was an idempotent no-op.
    pub already_processed: bool,
    pub orders_consumed: usize,
    pub logs_appended: usize,
}

/// Drives turn processing against a storage collaborator.
pub struct TurnProcessor<'a, S: Store> {
    store: &'a S,
    config: &'a GameConfig,
}

impl<'a, S: Store> TurnProcessor<'a, S> {
    pub fn new(store: &'a S, config: &'a GameConfig) -> Self {
        TurnProcessor { store, config }
    }

    /// The turn players currently submit orders for: last processed + 1.
    pub fn active_turn(&self) -> Result<u32, ProcessError> {
        Ok(self.store.last_processed_turn()?.unwrap_or(0) + 1)
    }

    /// Processes every unprocessed turn up to and including `target`,
    /// in sequence. Used by the external time-based trigger to catch up
    /// after missed invocations. A `target` at or before the last
    /// processed turn yields that turn's idempotent no-op report.
    pub fn catch_up(&self, target: u32) -> Result<Vec<TurnReport>, ProcessError> {
        let start = self.active_turn()?;
        if target < start {
            return Ok(vec![self.process_turn(target)?]);
        }
        let mut reports = Vec::new();
        for turn in start..=target {
            reports.push(self.process_turn(turn)?);
        }
        Ok(reports)
    }

    /// Runs one full turn pass.
    ///
    /// The atomic claim makes this safe under redundant invocation: a turn
    /// already processed returns a no-op report, a claim held elsewhere is
    /// an error without mutation, and any failure mid-pass releases the
    /// claim so a retry re-runs the pipeline from the top.
    pub fn process_turn(&self, number: u32) -> Result<TurnReport, ProcessError> {
        let _span = tracing::info_span!("process_turn", turn = number).entered();

        let seed = match self.store.begin_turn(number, &self.config.world_seed)? {
            TurnClaim::AlreadyProcessed => {
                tracing::info!("turn already processed, skipping");
                return Ok(TurnReport {
                    turn: number,
                    already_processed: true,
                    orders_consumed: 0,
                    logs_appended: 0,
                });
            }
            TurnClaim::InProgress => return Err(ProcessError::ClaimHeld(number)),
            TurnClaim::Claimed { seed } => seed,
        };

        match self.run_pipeline(number, &seed) {
            Ok(outcome) => {
                let report = TurnReport {
                    turn: number,
                    already_processed: false,
                    orders_consumed: outcome.applied_orders.len(),
                    logs_appended: outcome.logs.len(),
                };
                self.store.commit_turn(outcome)?;
                tracing::info!(
                    orders = report.orders_consumed,
                    logs = report.logs_appended,
                    "turn committed"
                );
                Ok(report)
            }
            Err(e) => {
                tracing::warn!(error = %e, "turn pass failed, releasing claim");
                self.store.abort_turn(number)?;
                Err(e)
            }
        }
    }

    fn run_pipeline(&self, turn: u32, seed: &str) -> Result<TurnOutcome, ProcessError> {
        let mut world = self.store.world()?;
        let mut orders = self.store.pending_orders(turn)?;
        orders.sort_by_key(|o| o.id);
        tracing::debug!(pending = orders.len(), "loaded pending orders");

        let cfg = self.config;
        let mut logs: Vec<LogEntry> = Vec::new();

        upkeep::run(&mut world, turn, cfg, &mut logs);
        production::run(&mut world, turn, &mut logs);
        {
            let mut rng = PhaseRng::for_phase(seed, turn, Phase::Expansion);
            expansion::run(&mut world, turn, cfg, &orders, &mut rng, &mut logs);
        }
        {
            let mut rng = PhaseRng::for_phase(seed, turn, Phase::Combat);
            combat::run(&mut world, turn, cfg, &orders, &mut rng, &mut logs);
        }
        building::run(&mut world, turn, cfg, &orders, &mut logs);
        {
            let mut rng = PhaseRng::for_phase(seed, turn, Phase::Events);
            events::run(turn, cfg, &mut rng, &mut logs);
        }

        Ok(TurnOutcome {
            turn,
            world,
            applied_orders: orders.iter().map(|o| o.id).collect(),
            logs,
        })
    }
}
