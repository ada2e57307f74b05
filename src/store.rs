//! The storage collaborator.
//!
//! The engine never embeds persistence logic; it consumes this contract.
//! Everything one turn pass writes travels in a single [`TurnOutcome`] and
//! must land atomically: either the whole pass is visible or none of it is.
//! [`MemStore`] is the reference implementation, a mutex-protected world
//! where every commit is one critical section.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::SystemTime;

use thiserror::Error;

use crate::world::{
    EmpireId, LogEntry, Order, OrderId, OrderKind, OrderStatus, TurnRecord, TurnState,
    WorldState,
};

/// Storage failures. These abort a turn pass and leave it Unprocessed.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("order not found or no longer cancellable")]
    OrderNotCancellable,

    #[error("orders for turn {0} are locked by a running pass")]
    TurnLocked(u32),
}

/// Result of attempting to claim a turn for processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnClaim {
    /// The claim succeeded; `seed` is the seed stored on the turn record.
    Claimed { seed: String },
    /// The turn committed earlier; reprocessing must be a no-op.
    AlreadyProcessed,
    /// Another pass holds the claim right now.
    InProgress,
}

/// Everything a committed turn writes, applied as one atomic set.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub turn: u32,
    pub world: WorldState,
    pub applied_orders: Vec<OrderId>,
    pub logs: Vec<LogEntry>,
}

/// Read/write contract the turn engine and submission path require.
pub trait Store {
    /// A clone of the current world snapshot.
    fn world(&self) -> Result<WorldState, StoreError>;

    /// Replaces the world wholesale (worldgen and empire founding).
    fn replace_world(&self, world: WorldState) -> Result<(), StoreError>;

    fn turn_record(&self, number: u32) -> Result<Option<TurnRecord>, StoreError>;

    /// Highest turn number with a committed pass, if any.
    fn last_processed_turn(&self) -> Result<Option<u32>, StoreError>;

    /// Atomically claims `number` for processing, creating the record with
    /// `seed` if absent. Exactly one concurrent caller can win the claim.
    fn begin_turn(&self, number: u32, seed: &str) -> Result<TurnClaim, StoreError>;

    /// Commits a finished pass: world, order statuses, logs, and the
    /// `processed_at` stamp, all-or-nothing.
    fn commit_turn(&self, outcome: TurnOutcome) -> Result<(), StoreError>;

    /// Releases a held claim after a failed pass; the turn reverts to
    /// Unprocessed.
    fn abort_turn(&self, number: u32) -> Result<(), StoreError>;

    fn insert_order(
        &self,
        empire: EmpireId,
        turn: u32,
        kind: OrderKind,
    ) -> Result<OrderId, StoreError>;

    /// Cancels a Pending order owned by `empire`, but only while its turn
    /// is still unclaimed.
    fn cancel_order(&self, id: OrderId, empire: EmpireId) -> Result<(), StoreError>;

    /// Pending orders for `turn`, in submission (id) order.
    fn pending_orders(&self, turn: u32) -> Result<Vec<Order>, StoreError>;

    fn pending_count(&self, empire: EmpireId, turn: u32) -> Result<u32, StoreError>;

    fn logs(&self) -> Result<Vec<LogEntry>, StoreError>;
}

struct Inner {
    world: WorldState,
    orders: BTreeMap<OrderId, Order>,
    next_order: u64,
    turns: BTreeMap<u32, TurnRecord>,
    logs: Vec<LogEntry>,
}

/// In-memory store. One mutex guards all state, so every trait operation
/// is atomic with respect to every other.
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        MemStore {
            inner: Mutex::new(Inner {
                world: WorldState::empty(0, 0),
                orders: BTreeMap::new(),
                next_order: 1,
                turns: BTreeMap::new(),
                logs: Vec::new(),
            }),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>, StoreError> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("state lock poisoned".to_string()))
    }
}

impl Store for MemStore {
    fn world(&self) -> Result<WorldState, StoreError> {
        Ok(self.lock()?.world.clone())
    }

    fn replace_world(&self, world: WorldState) -> Result<(), StoreError> {
        self.lock()?.world = world;
        Ok(())
    }

    fn turn_record(&self, number: u32) -> Result<Option<TurnRecord>, StoreError> {
        Ok(self.lock()?.turns.get(&number).cloned())
    }

    fn last_processed_turn(&self) -> Result<Option<u32>, StoreError> {
        Ok(self
            .lock()?
            .turns
            .values()
            .filter(|t| t.is_processed())
            .map(|t| t.number)
            .next_back())
    }

    fn begin_turn(&self, number: u32, seed: &str) -> Result<TurnClaim, StoreError> {
        let mut inner = self.lock()?;
        let record = inner
            .turns
            .entry(number)
            .or_insert_with(|| TurnRecord::new(number, seed));
        match record.state {
            TurnState::Processed => Ok(TurnClaim::AlreadyProcessed),
            TurnState::Processing => Ok(TurnClaim::InProgress),
            TurnState::Unprocessed => {
                record.state = TurnState::Processing;
                Ok(TurnClaim::Claimed { seed: record.seed.clone() })
            }
        }
    }

    fn commit_turn(&self, outcome: TurnOutcome) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        inner.world = outcome.world;
        for id in &outcome.applied_orders {
            if let Some(order) = inner.orders.get_mut(id) {
                if order.status == OrderStatus::Pending {
                    order.status = OrderStatus::Applied;
                }
            }
        }
        inner.logs.extend(outcome.logs);
        if let Some(record) = inner.turns.get_mut(&outcome.turn) {
            record.state = TurnState::Processed;
            record.processed_at = Some(SystemTime::now());
        }
        Ok(())
    }

    fn abort_turn(&self, number: u32) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        if let Some(record) = inner.turns.get_mut(&number) {
            if record.state == TurnState::Processing {
                record.state = TurnState::Unprocessed;
            }
        }
        Ok(())
    }

    fn insert_order(
        &self,
        empire: EmpireId,
        turn: u32,
        kind: OrderKind,
    ) -> Result<OrderId, StoreError> {
        let mut inner = self.lock()?;
        if matches!(
            inner.turns.get(&turn).map(|t| t.state),
            Some(TurnState::Processing) | Some(TurnState::Processed)
        ) {
            return Err(StoreError::TurnLocked(turn));
        }
        let id = OrderId(inner.next_order);
        inner.next_order += 1;
        inner.orders.insert(
            id,
            Order { id, empire, turn, kind, status: OrderStatus::Pending },
        );
        Ok(id)
    }

    fn cancel_order(&self, id: OrderId, empire: EmpireId) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let turn = match inner.orders.get(&id) {
            Some(order)
                if order.empire == empire && order.status == OrderStatus::Pending =>
            {
                order.turn
            }
            _ => return Err(StoreError::OrderNotCancellable),
        };
        if matches!(
            inner.turns.get(&turn).map(|t| t.state),
            Some(TurnState::Processing) | Some(TurnState::Processed)
        ) {
            return Err(StoreError::TurnLocked(turn));
        }
        if let Some(order) = inner.orders.get_mut(&id) {
            order.status = OrderStatus::Cancelled;
        }
        Ok(())
    }

    fn pending_orders(&self, turn: u32) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .lock()?
            .orders
            .values()
            .filter(|o| o.turn == turn && o.status == OrderStatus::Pending)
            .cloned()
            .collect())
    }

    fn pending_count(&self, empire: EmpireId, turn: u32) -> Result<u32, StoreError> {
        Ok(self
            .lock()?
            .orders
            .values()
            .filter(|o| {
                o.empire == empire && o.turn == turn && o.status == OrderStatus::Pending
            })
            .count() as u32)
    }

    fn logs(&self) -> Result<Vec<LogEntry>, StoreError> {
        Ok(self.lock()?.logs.clone())
    }
}
